//! Floating drawings, which assistive technology reads out of order.
use super::{DetectionContext, Detector};
use crate::accessibility::report::{ParagraphRef, PartFailure, Report};

pub struct AnchoredDrawings;

impl Detector for AnchoredDrawings {
    fn name(&self) -> &'static str {
        "anchors"
    }

    fn detect(&self, context: &DetectionContext<'_>, report: &mut Report) -> Result<(), PartFailure> {
        let document = context.document()?;

        let anchored: Vec<ParagraphRef> = document
            .all_paragraphs()
            .iter()
            .enumerate()
            .flat_map(|(paragraph_index, paragraph)| {
                paragraph
                    .drawings()
                    .into_iter()
                    .filter(|drawing| drawing.is_anchored())
                    .map(move |_| ParagraphRef { paragraph_index })
            })
            .collect();

        report.summary.flag(anchored.len());
        report.details.anchored_drawings_detected = Some(anchored.len());
        report.details.anchored_drawings = Some(anchored);
        Ok(())
    }
}
