//! Legacy form fields and content controls.
use super::{DetectionContext, Detector};
use crate::accessibility::report::{FormKind, FormLocation, PartFailure, Report};
use crate::common::xml::XmlElement;
use crate::ooxml::opc::constants::namespace::WML_MAIN;

pub struct FormFields;

/// Kind named by a field instruction such as ` FORMCHECKBOX `.
fn instruction_kind(instruction: &str) -> Option<FormKind> {
    let instruction = instruction.to_ascii_uppercase();
    if instruction.contains("FORMTEXT") {
        Some(FormKind::TextField)
    } else if instruction.contains("FORMCHECKBOX") {
        Some(FormKind::CheckboxField)
    } else if instruction.contains("FORMDROPDOWN") {
        Some(FormKind::DropdownField)
    } else {
        None
    }
}

/// Kind of form content `element` introduces, if any.
fn element_kind(element: &XmlElement) -> Option<FormKind> {
    if element.namespace.as_deref() != Some(WML_MAIN) {
        return None;
    }
    match element.local.as_str() {
        "ffData" => Some(
            if element.child(WML_MAIN, "textInput").is_some() {
                FormKind::TextField
            } else if element.child(WML_MAIN, "checkBox").is_some() {
                FormKind::CheckboxField
            } else if element.child(WML_MAIN, "ddList").is_some() {
                FormKind::DropdownField
            } else {
                FormKind::FormField
            },
        ),
        "fldSimple" => instruction_kind(&element.attribute_ns(WML_MAIN, "instr")?),
        "instrText" => instruction_kind(&element.text_content()),
        "sdt" => Some(FormKind::ContentControl),
        _ => None,
    }
}

impl Detector for FormFields {
    fn name(&self) -> &'static str {
        "forms"
    }

    fn detect(&self, context: &DetectionContext<'_>, report: &mut Report) -> Result<(), PartFailure> {
        let document = context.document()?;

        let locations: Vec<FormLocation> = document
            .all_paragraphs()
            .iter()
            .enumerate()
            .filter_map(|(paragraph_index, paragraph)| {
                let kind = paragraph
                    .elements()
                    .filter_map(element_kind)
                    .max_by_key(|kind| kind.specificity())?;
                Some(FormLocation { paragraph_index, kind })
            })
            .collect();

        report.summary.flag(locations.len());
        report.details.forms_detected = Some(!locations.is_empty());
        report.details.form_locations = Some(locations);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessibility::detect::test_support::run;

    #[test]
    fn test_kinds_and_precedence() {
        let body = concat!(
            // legacy checkbox inside a content control: the checkbox wins
            r#"<w:p><w:sdt><w:sdtContent><w:r><w:fldChar w:fldCharType="begin"><w:ffData><w:checkBox/></w:ffData></w:fldChar></w:r></w:sdtContent></w:sdt></w:p>"#,
            r#"<w:p><w:r><w:t>No fields</w:t></w:r></w:p>"#,
            r#"<w:p><w:r><w:instrText xml:space="preserve"> FORMTEXT </w:instrText></w:r></w:p>"#,
            r#"<w:p><w:fldSimple w:instr=" FORMDROPDOWN "><w:r><w:t>Pick</w:t></w:r></w:fldSimple></w:p>"#,
            r#"<w:p><w:sdt><w:sdtContent><w:r><w:t>Date</w:t></w:r></w:sdtContent></w:sdt></w:p>"#,
            r#"<w:p><w:r><w:fldChar w:fldCharType="begin"><w:ffData><w:name w:val="F1"/></w:ffData></w:fldChar></w:r></w:p>"#,
            r#"<w:p><w:fldSimple w:instr=" PAGE "/></w:p>"#,
        );
        let (report, outcome) = run(&FormFields, body, &[]);
        outcome.unwrap();

        let kinds: Vec<_> = report
            .details
            .form_locations
            .unwrap()
            .into_iter()
            .map(|l| (l.paragraph_index, l.kind))
            .collect();
        assert_eq!(
            kinds,
            [
                (0, FormKind::CheckboxField),
                (2, FormKind::TextField),
                (3, FormKind::DropdownField),
                (4, FormKind::ContentControl),
                (5, FormKind::FormField),
            ]
        );
        assert_eq!(report.details.forms_detected, Some(true));
        assert_eq!(report.summary.flagged, 5);
    }

    #[test]
    fn test_no_forms() {
        let (report, _) = run(&FormFields, "<w:p/>", &[]);
        assert_eq!(report.details.forms_detected, Some(false));
        assert_eq!(report.details.form_locations, Some(Vec::new()));
    }
}
