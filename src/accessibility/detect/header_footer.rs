//! Header and footer text for manual review.
use super::{DetectionContext, Detector};
use crate::accessibility::report::{HeaderFooterText, PartFailure, Report, Stage, truncate_chars};
use crate::ooxml::docx::header_footer::{is_header_footer_part, visible_text};
use crate::ooxml::opc::constants::part_name::DOCUMENT_BASE;

/// Text repeated on every page is easy to miss with a screen reader, so any
/// meaningful header or footer text is listed for a person to check.
pub struct HeaderFooterAudit;

impl Detector for HeaderFooterAudit {
    fn name(&self) -> &'static str {
        "header_footer"
    }

    fn detect(&self, context: &DetectionContext<'_>, report: &mut Report) -> Result<(), PartFailure> {
        let config = context.config;
        let mut notes = Vec::new();

        for name in context.package.iter_names().filter(|n| is_header_footer_part(n)) {
            let Some(xml) = context.package.read(name) else {
                continue;
            };
            let text = visible_text(xml).map_err(|e| PartFailure::new(Stage::Detect, name, e))?;
            if text.chars().count() >= config.min_header_footer_chars {
                notes.push(HeaderFooterText {
                    part: name.strip_prefix(DOCUMENT_BASE).unwrap_or(name).to_string(),
                    preview: truncate_chars(&text, config.preview_chars),
                });
            }
        }

        report.summary.flag(notes.len());
        report.details.header_footer_audit = Some(notes);
        Ok(())
    }
}
