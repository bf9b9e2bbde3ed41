//! Read-only detectors run over the remediated package.
//!
//! Each detector builds its records completely before touching the report,
//! so a detector that fails on a malformed part leaves its sections absent
//! and the counts untouched.
use super::config::RemediationConfig;
use super::report::{PartFailure, Report, Stage};
use crate::ooxml::docx::{Document, StyleNames};
use crate::ooxml::opc::constants::part_name;
use crate::ooxml::opc::{Package, Relationships};
use tracing::{debug, warn};

pub mod anchors;
pub mod contrast;
pub mod forms;
pub mod header_footer;
pub mod headings;
pub mod images;
pub mod links;
pub mod media;
pub mod tables;

/// A part parsed once for every detector. `None` when the package lacks it.
type Parsed<T> = Option<Result<T, String>>;

/// Parsed views of the package shared by all detectors.
pub struct DetectionContext<'a> {
    pub package: &'a Package,
    pub config: &'a RemediationConfig,
    document: Parsed<Document>,
    relationships: Parsed<Relationships>,
    styles: Parsed<StyleNames>,
}

impl<'a> DetectionContext<'a> {
    pub fn new(package: &'a Package, config: &'a RemediationConfig) -> Self {
        Self {
            package,
            config,
            document: package
                .read(part_name::DOCUMENT)
                .map(|xml| Document::parse(xml).map_err(|e| e.to_string())),
            relationships: package
                .read(part_name::DOCUMENT_RELS)
                .map(|xml| Relationships::parse(xml).map_err(|e| e.to_string())),
            styles: package
                .read(part_name::STYLES)
                .map(|xml| StyleNames::parse(xml).map_err(|e| e.to_string())),
        }
    }

    /// The main document. Required by every detector that reads the body.
    pub fn document(&self) -> Result<&Document, PartFailure> {
        match &self.document {
            Some(Ok(document)) => Ok(document),
            Some(Err(message)) => Err(PartFailure::new(Stage::Detect, part_name::DOCUMENT, message)),
            None => Err(PartFailure::new(Stage::Detect, part_name::DOCUMENT, "part is missing")),
        }
    }

    /// Relationships of the main document, `None` when the package has none.
    pub fn relationships(&self) -> Result<Option<&Relationships>, PartFailure> {
        optional(&self.relationships, part_name::DOCUMENT_RELS)
    }

    /// Style names, `None` when the package has no styles part.
    pub fn styles(&self) -> Result<Option<&StyleNames>, PartFailure> {
        optional(&self.styles, part_name::STYLES)
    }
}

fn optional<'p, T>(parsed: &'p Parsed<T>, part: &str) -> Result<Option<&'p T>, PartFailure> {
    match parsed {
        Some(Ok(value)) => Ok(Some(value)),
        Some(Err(message)) => Err(PartFailure::new(Stage::Detect, part, message)),
        None => Ok(None),
    }
}

/// A read-only check that appends its findings to the report.
///
/// Implementations must add exactly as many to `flagged` as records they
/// append, and must not touch the report when returning an error.
pub trait Detector: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn detect(&self, context: &DetectionContext<'_>, report: &mut Report) -> Result<(), PartFailure>;
}

/// Every detector, in the order they run.
pub fn detectors() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(headings::HeadingStructure),
        Box::new(contrast::ColorContrast),
        Box::new(links::LinkQuality),
        Box::new(tables::TableCellIntegrity),
        Box::new(header_footer::HeaderFooterAudit),
        Box::new(media::MediaAudit),
        Box::new(images::ImageAltText),
        Box::new(anchors::AnchoredDrawings),
        Box::new(forms::FormFields),
    ]
}

/// Run every detector over `package`, isolating failures per detector.
pub fn run_all(package: &Package, config: &RemediationConfig, report: &mut Report) {
    let context = DetectionContext::new(package, config);
    for detector in detectors() {
        let flagged_before = report.summary.flagged;
        match detector.detect(&context, report) {
            Ok(()) => debug!(
                detector = detector.name(),
                flagged = report.summary.flagged - flagged_before,
                "detector finished"
            ),
            Err(failure) => {
                warn!(
                    detector = detector.name(),
                    part = %failure.part,
                    "detector skipped: {}",
                    failure.message
                );
                report.record_failure(failure);
            },
        }
    }
}
