//! Table-Header Repeater for `word/document.xml`.
use crate::accessibility::report::{Report, TableRef};
use crate::common::xml::XmlError;
use crate::ooxml::docx::{Document, HeaderRowOutcome};

/// Mark the first row of every body-level table as a repeating header.
///
/// Returns the rewritten part when at least one table was newly marked.
/// Each newly marked table is listed in `tablesHeaderRowSet` and counted as
/// fixed. The list is present, possibly empty, whenever the part parsed.
pub fn repeat_table_headers(xml: &[u8], report: &mut Report) -> Result<Option<Vec<u8>>, XmlError> {
    let mut document = Document::parse(xml)?;

    let mut marked = Vec::new();
    for (table_index, table) in document.tables_mut().iter_mut().enumerate() {
        if table.repeat_header_row()? == HeaderRowOutcome::Marked {
            marked.push(TableRef { table_index });
        }
    }

    let rewritten = if marked.is_empty() {
        None
    } else {
        Some(document.to_bytes()?)
    };

    report.summary.fix(marked.len());
    report
        .details
        .tables_header_row_set
        .get_or_insert_with(Vec::new)
        .extend(marked);
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::document_xml;

    const ROW: &str = r#"<w:tr><w:tc><w:p><w:r><w:t>x</w:t></w:r></w:p></w:tc></w:tr>"#;

    #[test]
    fn test_two_tables_are_fixed() {
        let body = format!(
            "<w:tbl>{ROW}{ROW}</w:tbl><w:p/><w:tbl>{ROW}</w:tbl>"
        );
        let mut report = Report::new("Tables.docx");
        let out = repeat_table_headers(document_xml(&body).as_bytes(), &mut report)
            .unwrap()
            .unwrap();

        assert_eq!(report.summary.fixed, 2);
        assert_eq!(
            report.details.tables_header_row_set,
            Some(vec![TableRef { table_index: 0 }, TableRef { table_index: 1 }])
        );

        let document = Document::parse(&out).unwrap();
        assert!(document.tables().iter().all(|t| t.rows()[0].is_header()));
        assert!(!document.tables()[0].rows()[1].is_header());
    }

    #[test]
    fn test_marked_and_empty_tables_are_skipped() {
        let body = format!(
            concat!(
                r#"<w:tbl/>"#,
                r#"<w:tbl><w:tr><w:trPr><w:tblHeader/></w:trPr></w:tr></w:tbl>"#,
                r#"<w:tbl>{}</w:tbl>"#
            ),
            ROW
        );
        let mut report = Report::new("Tables.docx");
        repeat_table_headers(document_xml(&body).as_bytes(), &mut report).unwrap();
        assert_eq!(
            report.details.tables_header_row_set,
            Some(vec![TableRef { table_index: 2 }])
        );
        assert_eq!(report.summary.fixed, 1);
    }

    #[test]
    fn test_nothing_to_mark() {
        let mut report = Report::new("Plain.docx");
        let out = repeat_table_headers(document_xml("<w:p/>").as_bytes(), &mut report).unwrap();
        assert_eq!(out, None);
        assert_eq!(report.details.tables_header_row_set, Some(Vec::new()));
        assert_eq!(report.summary.fixed, 0);
    }
}
