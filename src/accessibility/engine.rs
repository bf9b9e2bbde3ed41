//! The remediation pipeline.
//!
//! 1. The upload is checked to be a `.docx` package and opened.
//! 2. The table header repeater rewrites `word/document.xml`, then each
//!    XML-level rule rewrites its part. A rule that fails on a malformed part
//!    is recorded and skipped.
//! 3. The package is rebuilt with the replacements and opened again.
//! 4. The rebuilt package must contain every required part.
//! 5. Detectors run over the rebuilt package and the file name is classified.
use super::config::RemediationConfig;
use super::detect;
use super::filename::{self, FileNameVerdict};
use super::fixes::{PART_RULES, table_header};
use super::report::{PartFailure, Report, Stage};
use crate::common::{Error, Result};
use crate::ooxml::opc::constants::{content_type, part_name};
use crate::ooxml::opc::{Package, ReplacementSet};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

/// An uploaded package with the name and media type the client declared.
#[derive(Debug, Clone)]
pub struct Upload<'a> {
    bytes: &'a [u8],
    file_name: String,
    media_type: Option<String>,
}

impl<'a> Upload<'a> {
    pub fn new(bytes: &'a [u8], file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            media_type: None,
        }
    }

    /// Attach the media type the client declared for the upload.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[inline]
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    /// A `.docx` name (any case) or the WordprocessingML package media type.
    pub fn is_docx(&self) -> bool {
        let by_name = self.file_name.to_ascii_lowercase().ends_with(".docx");
        let by_type = self.media_type.as_deref().is_some_and(|media_type| {
            media_type
                .split(';')
                .next()
                .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(content_type::WML_DOCUMENT))
        });
        by_name || by_type
    }

    fn check(&self) -> Result<()> {
        if self.is_docx() {
            return Ok(());
        }
        Err(Error::UnsupportedInput {
            name: self.file_name.clone(),
            media_type: self.media_type.clone(),
        })
    }
}

/// A rebuilt package that passed the integrity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediatedPackage {
    bytes: Vec<u8>,
    sha256: String,
    file_name: String,
}

impl RemediatedPackage {
    fn new(bytes: Vec<u8>, file_name: String) -> Self {
        let sha256 = Sha256::digest(&bytes)
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect();

        Self {
            bytes,
            sha256,
            file_name,
        }
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Lowercase hex SHA-256 of [`bytes`](Self::bytes).
    #[inline]
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Name to present the package under.
    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[inline]
    pub fn media_type(&self) -> &'static str {
        content_type::WML_DOCUMENT
    }
}

/// Result of [`Remediator::remediate_and_report`].
#[derive(Debug, Clone)]
pub struct RemediationOutcome {
    pub report: Report,
    /// `None` when the rebuilt package failed the integrity check
    pub package: Option<RemediatedPackage>,
}

/// Rebuilt package bytes plus the outcome of the integrity check.
struct Rebuilt {
    bytes: Vec<u8>,
    package: Package,
    missing_parts: Vec<String>,
}

/// Applies the fix rules and detectors to uploaded packages.
///
/// A `Remediator` holds no per-request state and can serve any number of
/// uploads, concurrently if shared by reference.
#[derive(Debug, Clone, Default)]
pub struct Remediator {
    config: RemediationConfig,
}

impl Remediator {
    pub fn new(config: RemediationConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &RemediationConfig {
        &self.config
    }

    /// Remediate the upload and report what was fixed and what still needs
    /// attention.
    ///
    /// The rebuilt package is included when it passes the integrity check;
    /// otherwise the report lists the missing parts under `partFailures`.
    ///
    /// # Errors
    /// [`Error::UnsupportedInput`] for anything but a `.docx` upload,
    /// [`Error::CorruptArchive`] when the bytes are not a readable package and
    /// [`Error::RebuildFailed`] when the rebuilt archive cannot be written.
    pub fn remediate_and_report(&self, upload: &Upload<'_>) -> Result<RemediationOutcome> {
        let mut report = Report::new(upload.file_name());
        let rebuilt = self.remediate(upload, &mut report)?;

        for part in &rebuilt.missing_parts {
            report.record_failure(PartFailure::new(
                Stage::Validate,
                part.as_str(),
                "required part is missing from the rebuilt package",
            ));
        }

        detect::run_all(&rebuilt.package, &self.config, &mut report);
        filename::apply(&mut report);

        let package = rebuilt.missing_parts.is_empty().then(|| {
            let file_name = report
                .suggested_file_name
                .clone()
                .unwrap_or_else(|| upload.file_name().to_string());
            RemediatedPackage::new(rebuilt.bytes, file_name)
        });

        info!(
            file = upload.file_name(),
            fixed = report.summary.fixed,
            flagged = report.summary.flagged,
            part_failures = report.details.part_failures.len(),
            "report ready"
        );
        Ok(RemediationOutcome { report, package })
    }

    /// Remediate the upload and return the validated package.
    ///
    /// # Errors
    /// As [`remediate_and_report`](Self::remediate_and_report), plus
    /// [`Error::RemediationInvalid`] when the rebuilt package lacks a required
    /// part. The invalid bytes are never returned.
    pub fn remediate_and_download(&self, upload: &Upload<'_>) -> Result<RemediatedPackage> {
        let mut report = Report::new(upload.file_name());
        let rebuilt = self.remediate(upload, &mut report)?;

        if !rebuilt.missing_parts.is_empty() {
            warn!(
                file = upload.file_name(),
                missing = ?rebuilt.missing_parts,
                "rebuilt package failed the integrity check"
            );
            return Err(Error::RemediationInvalid {
                missing_parts: rebuilt.missing_parts,
                entries: rebuilt.package.member_names(),
            });
        }

        let file_name = match filename::classify(upload.file_name()) {
            FileNameVerdict::Rename { suggested } => suggested,
            FileNameVerdict::Descriptive | FileNameVerdict::NeedsAttention => {
                upload.file_name().to_string()
            },
        };
        let package = RemediatedPackage::new(rebuilt.bytes, file_name);
        info!(
            file = package.file_name(),
            bytes = package.bytes().len(),
            sha256 = package.sha256(),
            "package ready"
        );
        Ok(package)
    }

    /// Steps shared by both operations: check, fix, rebuild, reopen.
    fn remediate(&self, upload: &Upload<'_>, report: &mut Report) -> Result<Rebuilt> {
        upload.check()?;
        debug!(file = upload.file_name(), bytes = upload.bytes().len(), "upload accepted");

        let package = Package::open(upload.bytes())?;
        let replacements = self.apply_fixes(&package, report);

        let bytes = package
            .rebuild(&replacements)
            .map_err(|e| Error::RebuildFailed(e.to_string()))?;
        let package = Package::open(&bytes).map_err(|e| Error::RebuildFailed(e.to_string()))?;
        let missing_parts = package.missing_required_parts();

        Ok(Rebuilt {
            bytes,
            package,
            missing_parts,
        })
    }

    fn apply_fixes(&self, package: &Package, report: &mut Report) -> ReplacementSet {
        let mut replacements = ReplacementSet::new();

        if let Some(xml) = package.read(part_name::DOCUMENT) {
            match table_header::repeat_table_headers(xml, report) {
                Ok(Some(bytes)) => {
                    debug!(part = part_name::DOCUMENT, "table header rows marked");
                    replacements.insert(part_name::DOCUMENT, bytes);
                },
                Ok(None) => debug!(part = part_name::DOCUMENT, "no table header rows to mark"),
                Err(e) => {
                    warn!(part = part_name::DOCUMENT, "table header fix skipped: {}", e);
                    report.record_failure(PartFailure::new(Stage::Fix, part_name::DOCUMENT, e));
                },
            }
        }

        for rule in &PART_RULES {
            let Some(xml) = package.read(rule.part) else {
                debug!(rule = rule.name, part = rule.part, "part absent, rule skipped");
                continue;
            };
            match (rule.apply)(xml, &self.config) {
                Ok(Some(bytes)) => {
                    debug!(rule = rule.name, part = rule.part, "rule applied");
                    replacements.insert(rule.part, bytes);
                    (rule.record)(report, &self.config);
                },
                Ok(None) => debug!(rule = rule.name, part = rule.part, "part already compliant"),
                Err(e) => {
                    warn!(rule = rule.name, part = rule.part, "rule skipped: {}", e);
                    report.record_failure(PartFailure::new(Stage::Fix, rule.part, e));
                },
            }
        }

        replacements
    }
}
