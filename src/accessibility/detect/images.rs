//! Alternative text of embedded pictures.
use super::{DetectionContext, Detector};
use crate::accessibility::patterns;
use crate::accessibility::report::{AltTextProblem, ImageIssue, PartFailure, Report};
use crate::ooxml::docx::Drawing;
use crate::ooxml::opc::Relationships;
use crate::ooxml::opc::constants::part_name::DOCUMENT_BASE;

pub struct ImageAltText;

/// Why a picture's alternative text is inadequate, if it is.
fn alt_text_problem(drawing: &Drawing<'_>) -> Option<AltTextProblem> {
    match drawing.description().or_else(|| drawing.title()) {
        None => Some(AltTextProblem::Missing),
        Some(alt) if patterns::looks_like_file_name(&alt) => Some(AltTextProblem::FileName),
        Some(_) => None,
    }
}

fn image_path(relationships: Option<&Relationships>, r_id: &str) -> Option<String> {
    relationships?.get(r_id)?.target_member(DOCUMENT_BASE)
}

impl Detector for ImageAltText {
    fn name(&self) -> &'static str {
        "images"
    }

    fn detect(&self, context: &DetectionContext<'_>, report: &mut Report) -> Result<(), PartFailure> {
        let document = context.document()?;
        let relationships = context.relationships()?;

        let mut issues = Vec::new();
        for (paragraph_index, paragraph) in document.all_paragraphs().iter().enumerate() {
            for drawing in paragraph.drawings() {
                let Some(r_id) = drawing.image_rel_ids().into_iter().next() else {
                    continue;
                };
                if let Some(reason) = alt_text_problem(&drawing) {
                    issues.push(ImageIssue {
                        paragraph_index,
                        image_path: image_path(relationships, &r_id),
                        reason,
                    });
                }
            }
        }

        report.summary.flag(issues.len());
        report.details.images_missing_or_bad_alt = Some(issues.len());
        report.details.image_locations = Some(issues);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessibility::detect::test_support::run;

    const RELS: &str = concat!(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>"#,
        r#"</Relationships>"#
    );

    fn picture(doc_pr_attrs: &str) -> String {
        format!(
            concat!(
                r#"<w:p><w:r><w:drawing><wp:inline><wp:docPr id="1" name="Picture 1" {}/>"#,
                r#"<a:graphic><a:graphicData><a:blip r:embed="rId5"/></a:graphicData></a:graphic>"#,
                r#"</wp:inline></w:drawing></w:r></w:p>"#
            ),
            doc_pr_attrs
        )
    }

    #[test]
    fn test_missing_and_file_name_alt_text() {
        let body = [
            picture(""),
            picture(r#"descr="  ""#),
            picture(r#"descr="IMG_0042.jpg""#),
            picture(r#"descr="Sales by region, 2024""#),
            picture(r#"title="Company logo""#),
        ]
        .concat();
        let (report, outcome) = run(&ImageAltText, &body, &[("word/_rels/document.xml.rels", RELS)]);
        outcome.unwrap();

        let issues = report.details.image_locations.unwrap();
        let summary: Vec<_> = issues.iter().map(|i| (i.paragraph_index, i.reason)).collect();
        assert_eq!(
            summary,
            [
                (0, AltTextProblem::Missing),
                (1, AltTextProblem::Missing),
                (2, AltTextProblem::FileName),
            ]
        );
        assert_eq!(issues[0].image_path.as_deref(), Some("word/media/image1.png"));
        assert_eq!(report.details.images_missing_or_bad_alt, Some(3));
        assert_eq!(report.summary.flagged, 3);
    }

    #[test]
    fn test_drawings_without_pictures_are_ignored() {
        let body = r#"<w:p><w:r><w:drawing><wp:anchor><wp:docPr id="2" name="Shape"/></wp:anchor></w:drawing></w:r></w:p>"#;
        let (report, _) = run(&ImageAltText, body, &[]);
        assert_eq!(report.details.images_missing_or_bad_alt, Some(0));
        assert_eq!(report.details.image_locations, Some(Vec::new()));
    }
}
