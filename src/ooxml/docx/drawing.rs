/// Drawing objects (`w:drawing`) in DOCX paragraphs.
///
/// A drawing is either inline (`wp:inline`, flows with the text) or anchored
/// (`wp:anchor`, floats at a position on the page). Its `wp:docPr` carries the
/// alternative text, and embedded pictures reference their image part through
/// `a:blip r:embed`.
use crate::common::xml::XmlElement;
use crate::ooxml::opc::constants::namespace::{DML_MAIN, DML_WORDPROCESSING_DRAWING, OFC_RELATIONSHIPS};

#[derive(Debug, Clone, Copy)]
pub struct Drawing<'a> {
    element: &'a XmlElement,
}

impl<'a> Drawing<'a> {
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    /// Whether the drawing floats (`wp:anchor`) rather than sitting in line.
    pub fn is_anchored(&self) -> bool {
        self.element
            .child(DML_WORDPROCESSING_DRAWING, "anchor")
            .is_some()
    }

    fn doc_pr(&self) -> Option<&'a XmlElement> {
        self.element.find(DML_WORDPROCESSING_DRAWING, "docPr")
    }

    /// `descr` of `wp:docPr`, trimmed, `None` when absent or blank.
    pub fn description(&self) -> Option<String> {
        non_blank(self.doc_pr()?.attribute("descr"))
    }

    /// `title` of `wp:docPr`, trimmed, `None` when absent or blank.
    pub fn title(&self) -> Option<String> {
        non_blank(self.doc_pr()?.attribute("title"))
    }

    /// Relationship ids of embedded pictures, in document order.
    pub fn image_rel_ids(&self) -> Vec<String> {
        self.element
            .descendants()
            .filter(|e| e.is(DML_MAIN, "blip"))
            .filter_map(|blip| blip.attribute_ns(OFC_RELATIONSHIPS, "embed"))
            .collect()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
