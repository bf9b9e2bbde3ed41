//! The remediation report and its issue records.
//!
//! Serialized field names are camelCase. Every section a check ran for is
//! present, as an empty list when nothing was found. Sections whose check did
//! not run, or failed on a malformed part, serialize as `null`; failures are
//! listed in `partFailures`.
use crate::ooxml::docx::VMergeState;
use serde::Serialize;

/// Outcome of one remediation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub file_name: String,
    pub suggested_file_name: Option<String>,
    pub summary: Summary,
    pub details: Details,
}

impl Report {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            suggested_file_name: None,
            summary: Summary::default(),
            details: Details::default(),
        }
    }

    /// Record a per-part failure. Failures never count as fixed or flagged.
    pub fn record_failure(&mut self, failure: PartFailure) {
        self.details.part_failures.push(failure);
    }
}

/// Applied edits versus detected issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub fixed: usize,
    pub flagged: usize,
}

impl Summary {
    #[inline]
    pub fn fix(&mut self, count: usize) {
        self.fixed += count;
    }

    #[inline]
    pub fn flag(&mut self, count: usize) {
        self.flagged += count;
    }
}

/// Everything the fix rules did and the detectors found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    pub removed_protection: bool,
    pub language_default_fixed: Option<LanguageFix>,
    pub title_needs_fixing: bool,
    pub file_name_fixed: bool,
    pub file_name_needs_fixing: bool,
    pub tables_header_row_set: Option<Vec<TableRef>>,
    pub empty_headings: Option<Vec<ParagraphRef>>,
    pub heading_order_issues: Option<Vec<HeadingOrderIssue>>,
    pub bad_links: Option<Vec<BadLink>>,
    pub merged_split_empty_cells: Option<Vec<CellIssue>>,
    pub header_footer_audit: Option<Vec<HeaderFooterText>>,
    pub color_contrast_issues: Option<Vec<ContrastIssue>>,
    pub embedded_media: Option<Vec<MediaRef>>,
    pub gifs_detected: Option<Vec<String>>,
    pub images_missing_or_bad_alt: Option<usize>,
    pub image_locations: Option<Vec<ImageIssue>>,
    pub anchored_drawings_detected: Option<usize>,
    pub anchored_drawings: Option<Vec<ParagraphRef>>,
    pub forms_detected: Option<bool>,
    pub form_locations: Option<Vec<FormLocation>>,
    pub part_failures: Vec<PartFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageFix {
    pub set_to: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRef {
    pub table_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphRef {
    pub paragraph_index: usize,
}

/// A heading more than one level deeper than the heading before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingOrderIssue {
    pub paragraph_index: usize,
    pub previous_level: u8,
    pub current_level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkProblem {
    Generic,
    RawUrl,
    TooLong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadLink {
    pub paragraph_index: usize,
    pub display: String,
    pub target: Option<String>,
    pub reasons: Vec<LinkProblem>,
}

/// A merged, spanning or empty table cell. Indices are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellIssue {
    pub table_index: usize,
    pub row: usize,
    pub col: usize,
    pub grid_span: Option<u32>,
    pub v_merge: Option<VMergeState>,
    pub is_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderFooterText {
    /// Part name relative to `word/`
    pub part: String,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastIssue {
    pub paragraph_index: usize,
    /// Uppercase hex without `#`
    pub color: String,
    pub size_pt: Option<f64>,
    pub bold: bool,
    pub ratio: f64,
    pub sample: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaRef {
    pub id: String,
    pub target: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AltTextProblem {
    Missing,
    FileName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageIssue {
    pub paragraph_index: usize,
    pub image_path: Option<String>,
    pub reason: AltTextProblem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    ContentControl,
    FormField,
    TextField,
    CheckboxField,
    DropdownField,
}

impl FormKind {
    /// Ranking used when a paragraph holds several kinds; higher wins.
    pub fn specificity(self) -> u8 {
        match self {
            FormKind::ContentControl => 0,
            FormKind::FormField => 1,
            FormKind::TextField | FormKind::CheckboxField | FormKind::DropdownField => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormLocation {
    pub paragraph_index: usize,
    pub kind: FormKind,
}

/// Pipeline stage a part failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Fix,
    Validate,
    Detect,
}

/// A fix rule or detector that could not process one part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartFailure {
    pub stage: Stage,
    pub part: String,
    pub message: String,
}

impl PartFailure {
    pub fn new(stage: Stage, part: impl Into<String>, message: impl ToString) -> Self {
        Self {
            stage,
            part: part.into(),
            message: message.to_string(),
        }
    }
}

/// `text` cut to `max` characters, with `…` appended when anything was cut.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

/// First `max` characters of `text`.
pub(crate) fn take_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_report_shape() {
        let value = serde_json::to_value(Report::new("Quarterly.docx")).unwrap();
        assert_eq!(value["fileName"], "Quarterly.docx");
        assert_eq!(value["suggestedFileName"], serde_json::Value::Null);
        assert_eq!(value["summary"], json!({"fixed": 0, "flagged": 0}));
        assert_eq!(value["details"]["removedProtection"], false);
        assert_eq!(value["details"]["badLinks"], serde_json::Value::Null);
        assert_eq!(value["details"]["partFailures"], json!([]));
    }

    #[test]
    fn test_record_shapes() {
        let cell = CellIssue {
            table_index: 0,
            row: 1,
            col: 2,
            grid_span: Some(2),
            v_merge: Some(VMergeState::Continue),
            is_empty: true,
        };
        assert_eq!(
            serde_json::to_value(cell).unwrap(),
            json!({"tableIndex": 0, "row": 1, "col": 2, "gridSpan": 2, "vMerge": "continue", "isEmpty": true})
        );

        let link = BadLink {
            paragraph_index: 3,
            display: "here".into(),
            target: None,
            reasons: vec![LinkProblem::Generic, LinkProblem::RawUrl],
        };
        assert_eq!(
            serde_json::to_value(link).unwrap(),
            json!({"paragraphIndex": 3, "display": "here", "target": null, "reasons": ["generic", "rawUrl"]})
        );

        let media = MediaRef {
            id: "rId9".into(),
            target: "media/clip.mp4".into(),
            media_type: "video".into(),
        };
        assert_eq!(serde_json::to_value(media).unwrap()["type"], "video");

        let form = FormLocation {
            paragraph_index: 0,
            kind: FormKind::CheckboxField,
        };
        assert_eq!(serde_json::to_value(form).unwrap()["kind"], "checkbox-field");

        let failure = PartFailure::new(Stage::Detect, "word/styles.xml", "bad xml");
        assert_eq!(serde_json::to_value(failure).unwrap()["stage"], "detect");
    }

    #[test]
    fn test_truncation() {
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc…");
        assert_eq!(truncate_chars("ééééé", 2), "éé…");
        assert_eq!(take_chars("ééééé", 2), "éé");
    }
}
