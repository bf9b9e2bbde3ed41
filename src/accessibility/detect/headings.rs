//! Heading structure: empty headings and skipped levels.
use super::{DetectionContext, Detector};
use crate::accessibility::patterns;
use crate::accessibility::report::{HeadingOrderIssue, ParagraphRef, PartFailure, Report};

pub struct HeadingStructure;

impl Detector for HeadingStructure {
    fn name(&self) -> &'static str {
        "headings"
    }

    fn detect(&self, context: &DetectionContext<'_>, report: &mut Report) -> Result<(), PartFailure> {
        let document = context.document()?;
        let styles = context.styles()?;

        let mut empty = Vec::new();
        let mut order = Vec::new();
        let mut previous: Option<u8> = None;

        for (paragraph_index, paragraph) in document.paragraphs().iter().enumerate() {
            let Some(style_id) = paragraph.style_id() else {
                continue;
            };
            let style_name = styles.map_or(style_id.as_str(), |s| s.display_name(&style_id));
            let Some(level) = patterns::heading_level(style_name) else {
                continue;
            };

            if paragraph.text().trim().is_empty() {
                empty.push(ParagraphRef { paragraph_index });
            }
            if let Some(previous_level) = previous
                && level > previous_level + 1
            {
                order.push(HeadingOrderIssue {
                    paragraph_index,
                    previous_level,
                    current_level: level,
                });
            }
            previous = Some(level);
        }

        report.summary.flag(empty.len() + order.len());
        report.details.empty_headings = Some(empty);
        report.details.heading_order_issues = Some(order);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessibility::detect::test_support::run;

    fn heading(style: &str, text: &str) -> String {
        format!(
            r#"<w:p><w:pPr><w:pStyle w:val="{style}"/></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"#
        )
    }

    #[test]
    fn test_skipped_level_and_empty_heading() {
        let body = [
            heading("Heading1", "Intro"),
            "<w:p><w:r><w:t>Body</w:t></w:r></w:p>".to_string(),
            heading("Heading3", "Deep"),
            heading("Heading2", " "),
            heading("Heading3", "Fine"),
        ]
        .concat();
        let (report, outcome) = run(&HeadingStructure, &body, &[]);
        outcome.unwrap();

        assert_eq!(
            report.details.heading_order_issues,
            Some(vec![HeadingOrderIssue {
                paragraph_index: 2,
                previous_level: 1,
                current_level: 3
            }])
        );
        assert_eq!(
            report.details.empty_headings,
            Some(vec![ParagraphRef { paragraph_index: 3 }])
        );
        assert_eq!(report.summary.flagged, 2);
    }

    #[test]
    fn test_style_names_resolve_through_styles_part() {
        let styles = concat!(
            r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            r#"<w:style w:type="paragraph" w:styleId="Titre1"><w:name w:val="heading 1"/></w:style>"#,
            r#"<w:style w:type="paragraph" w:styleId="Titre4"><w:name w:val="heading 4"/></w:style>"#,
            r#"</w:styles>"#
        );
        let body = [heading("Titre1", "Un"), heading("Titre4", "Quatre")].concat();
        let (report, outcome) = run(&HeadingStructure, &body, &[("word/styles.xml", styles)]);
        outcome.unwrap();

        let issues = report.details.heading_order_issues.unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!((issues[0].previous_level, issues[0].current_level), (1, 4));
    }

    #[test]
    fn test_first_heading_may_start_deep() {
        let (report, _) = run(&HeadingStructure, &heading("Heading3", "Start"), &[]);
        assert_eq!(report.details.heading_order_issues, Some(Vec::new()));
        assert_eq!(report.summary.flagged, 0);
    }
}
