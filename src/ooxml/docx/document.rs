/// The main document part (`word/document.xml`).
use crate::common::xml::{Namespace, XmlDocument, XmlElement, XmlError};
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::table::{Table, TableMut};
use crate::ooxml::opc::constants::namespace::WML_MAIN;

/// A parsed `word/document.xml`.
///
/// Body-level accessors (`paragraphs`, `tables`) return only direct children
/// of `w:body`. The `all_*` accessors also return content nested in tables,
/// content controls and text boxes, in document order.
///
/// # Example
///
/// ```rust,no_run
/// use docx_remediate::ooxml::docx::Document;
///
/// # fn run(xml: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
/// let mut document = Document::parse(xml)?;
/// for (index, paragraph) in document.paragraphs().iter().enumerate() {
///     println!("{}: {}", index, paragraph.text());
/// }
/// for mut table in document.tables_mut() {
///     table.repeat_header_row()?;
/// }
/// let bytes = document.to_bytes()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    xml: XmlDocument,
}

impl Document {
    /// Parse the main document part.
    pub fn parse(bytes: &[u8]) -> Result<Self, XmlError> {
        Ok(Self {
            xml: XmlDocument::parse(bytes)?,
        })
    }

    /// `w:body`, if the document has one.
    pub fn body(&self) -> Option<&XmlElement> {
        self.xml.root.child(WML_MAIN, "body")
    }

    /// Paragraphs that are direct children of the body.
    pub fn paragraphs(&self) -> Vec<Paragraph<'_>> {
        self.body()
            .map(|body| {
                body.children_named(WML_MAIN, "p")
                    .map(Paragraph::new)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every paragraph in the body at any depth.
    pub fn all_paragraphs(&self) -> Vec<Paragraph<'_>> {
        self.body()
            .map(|body| {
                body.descendants()
                    .filter(|e| e.is(WML_MAIN, "p"))
                    .map(Paragraph::new)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Tables that are direct children of the body.
    pub fn tables(&self) -> Vec<Table<'_>> {
        self.body()
            .map(|body| {
                body.children_named(WML_MAIN, "tbl")
                    .map(Table::new)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every table in the body at any depth, nested tables included.
    pub fn all_tables(&self) -> Vec<Table<'_>> {
        self.body()
            .map(|body| {
                body.descendants()
                    .filter(|e| e.is(WML_MAIN, "tbl"))
                    .map(Table::new)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// WordprocessingML binding used when new elements are written, declared
    /// on the root if the part has no prefixed binding yet.
    pub fn wml_namespace(&mut self) -> Namespace {
        self.xml.bind_namespace(WML_MAIN, "w")
    }

    /// Mutable views of the body-level tables, in document order.
    pub fn tables_mut(&mut self) -> Vec<TableMut<'_>> {
        let w = self.wml_namespace();
        match self.xml.root.child_mut(WML_MAIN, "body") {
            Some(body) => body
                .elements_mut()
                .filter(|e| e.is(WML_MAIN, "tbl"))
                .map(|table| TableMut::new(table, w.clone()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Serialize the part.
    pub fn to_bytes(&self) -> Result<Vec<u8>, XmlError> {
        self.xml.to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::table::HeaderRowOutcome;
    use crate::testing::document_xml;

    const BODY: &str = concat!(
        r#"<w:p><w:r><w:t>First</w:t></w:r></w:p>"#,
        r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p>"#,
        r#"<w:tbl><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl>"#,
        r#"</w:tc></w:tr></w:tbl>"#,
        r#"<w:p><w:r><w:t>Last</w:t></w:r></w:p>"#,
        r#"<w:tbl/>"#,
    );

    #[test]
    fn test_body_level_and_nested_views() {
        let document = Document::parse(document_xml(BODY).as_bytes()).unwrap();

        let texts: Vec<_> = document.paragraphs().iter().map(|p| p.text()).collect();
        assert_eq!(texts, ["First", "Last"]);
        assert_eq!(document.all_paragraphs().len(), 4);
        assert_eq!(document.tables().len(), 2);
        assert_eq!(document.all_tables().len(), 3);
    }

    #[test]
    fn test_tables_mut_marks_body_level_tables() {
        let mut document = Document::parse(document_xml(BODY).as_bytes()).unwrap();
        let outcomes: Vec<_> = document
            .tables_mut()
            .iter_mut()
            .map(|table| table.repeat_header_row().unwrap())
            .collect();
        assert_eq!(outcomes, [HeaderRowOutcome::Marked, HeaderRowOutcome::NoRows]);

        let reparsed = Document::parse(&document.to_bytes().unwrap()).unwrap();
        let tables = reparsed.all_tables();
        assert!(tables[0].rows()[0].is_header());
        assert!(!tables[1].rows()[0].is_header());
    }

    #[test]
    fn test_document_without_body() {
        let xml = format!(r#"<w:document xmlns:w="{}"/>"#, WML_MAIN);
        let document = Document::parse(xml.as_bytes()).unwrap();
        assert!(document.paragraphs().is_empty());
        assert!(document.all_tables().is_empty());
    }
}
