//! Color contrast of explicitly colored runs against a white page.
use super::{DetectionContext, Detector};
use crate::accessibility::report::{ContrastIssue, PartFailure, Report, take_chars};
use crate::common::style::color::WHITE;

/// WCAG AA ratio for normal text.
const NORMAL_TEXT_RATIO: f64 = 4.5;
/// WCAG AA ratio for large or bold text.
const LARGE_TEXT_RATIO: f64 = 3.0;
/// Point size from which text counts as large.
const LARGE_TEXT_PT: f64 = 18.0;

pub struct ColorContrast;

impl Detector for ColorContrast {
    fn name(&self) -> &'static str {
        "contrast"
    }

    fn detect(&self, context: &DetectionContext<'_>, report: &mut Report) -> Result<(), PartFailure> {
        let document = context.document()?;
        let sample_chars = context.config.sample_chars;

        let mut issues = Vec::new();
        for (paragraph_index, paragraph) in document.paragraphs().iter().enumerate() {
            for run in paragraph.runs() {
                let Some(color) = run.color() else {
                    continue;
                };
                let size_pt = run.size_pt();
                let bold = run.bold();
                let required = if bold || size_pt.is_some_and(|pt| pt >= LARGE_TEXT_PT) {
                    LARGE_TEXT_RATIO
                } else {
                    NORMAL_TEXT_RATIO
                };

                let ratio = color.contrast_ratio(&WHITE);
                if ratio < required {
                    issues.push(ContrastIssue {
                        paragraph_index,
                        color: color.to_hex(),
                        size_pt,
                        bold,
                        ratio: (ratio * 100.0).round() / 100.0,
                        sample: take_chars(&run.text(), sample_chars),
                    });
                }
            }
        }

        report.summary.flag(issues.len());
        report.details.color_contrast_issues = Some(issues);
        Ok(())
    }
}
