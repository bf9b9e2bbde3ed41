//! Link text quality.
use super::{DetectionContext, Detector};
use crate::accessibility::patterns;
use crate::accessibility::report::{BadLink, LinkProblem, PartFailure, Report};

pub struct LinkQuality;

impl Detector for LinkQuality {
    fn name(&self) -> &'static str {
        "links"
    }

    fn detect(&self, context: &DetectionContext<'_>, report: &mut Report) -> Result<(), PartFailure> {
        let document = context.document()?;
        let relationships = context.relationships()?;
        let max_chars = context.config.max_link_text_chars;

        let mut bad = Vec::new();
        for (paragraph_index, paragraph) in document.all_paragraphs().iter().enumerate() {
            for link in paragraph.hyperlinks() {
                let display = link.text().trim().to_string();
                let target = link
                    .r_id()
                    .and_then(|r_id| Some(relationships?.target_ref(&r_id)?.to_string()))
                    .filter(|target| !target.is_empty());

                let mut reasons = Vec::new();
                if patterns::is_generic_link_text(&display) {
                    reasons.push(LinkProblem::Generic);
                }
                if !display.is_empty() && target.as_deref() == Some(display.as_str()) {
                    reasons.push(LinkProblem::RawUrl);
                }
                if display.chars().count() > max_chars {
                    reasons.push(LinkProblem::TooLong);
                }

                if !reasons.is_empty() {
                    bad.push(BadLink {
                        paragraph_index,
                        display,
                        target,
                        reasons,
                    });
                }
            }
        }

        report.summary.flag(bad.len());
        report.details.bad_links = Some(bad);
        Ok(())
    }
}
