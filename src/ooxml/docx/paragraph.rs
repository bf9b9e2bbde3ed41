/// Paragraph, Run and Hyperlink views over WordprocessingML elements.
use crate::common::RGBColor;
use crate::common::xml::XmlElement;
use crate::ooxml::docx::drawing::Drawing;
use crate::ooxml::opc::constants::namespace::{OFC_RELATIONSHIPS, WML_MAIN};

/// Whether an on/off property element (`<w:b/>`, `<w:tblHeader w:val="0"/>`)
/// is switched on. Absent `w:val` means on.
pub(crate) fn is_on(element: &XmlElement) -> bool {
    !matches!(
        element.attribute_ns(WML_MAIN, "val").as_deref(),
        Some("0" | "false" | "off")
    )
}

/// A paragraph in a Word document.
///
/// Represents a `<w:p>` element. Content nested in another paragraph (text
/// boxes inside a drawing, for instance) belongs to that inner paragraph and
/// is not visited from here.
#[derive(Debug, Clone, Copy)]
pub struct Paragraph<'a> {
    element: &'a XmlElement,
}

impl<'a> Paragraph<'a> {
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    #[inline]
    pub fn element(&self) -> &'a XmlElement {
        self.element
    }

    /// Style id from `w:pPr/w:pStyle`.
    pub fn style_id(&self) -> Option<String> {
        self.element
            .child(WML_MAIN, "pPr")?
            .child(WML_MAIN, "pStyle")?
            .attribute_ns(WML_MAIN, "val")
    }

    /// Runs that are direct children of the paragraph.
    pub fn runs(&self) -> Vec<Run<'a>> {
        self.element
            .children_named(WML_MAIN, "r")
            .map(Run::new)
            .collect()
    }

    /// Visible text: direct runs and runs inside hyperlinks, in order.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in self.element.elements() {
            if child.is(WML_MAIN, "r") {
                text.push_str(&Run::new(child).text());
            } else if child.is(WML_MAIN, "hyperlink") {
                for run in child.children_named(WML_MAIN, "r") {
                    text.push_str(&Run::new(run).text());
                }
            }
        }
        text
    }

    /// Every element inside this paragraph, not entering nested paragraphs.
    pub fn elements(self) -> impl Iterator<Item = &'a XmlElement> {
        self.element
            .descendants_pruned(|e| e.is(WML_MAIN, "p"))
    }

    /// Hyperlinks anywhere in the paragraph.
    pub fn hyperlinks(&self) -> Vec<Hyperlink<'a>> {
        self.elements()
            .filter(|e| e.is(WML_MAIN, "hyperlink"))
            .map(Hyperlink::new)
            .collect()
    }

    /// Drawings (`w:drawing`) anywhere in the paragraph.
    pub fn drawings(&self) -> Vec<Drawing<'a>> {
        self.elements()
            .filter(|e| e.is(WML_MAIN, "drawing"))
            .map(Drawing::new)
            .collect()
    }
}

/// A run of text with uniform formatting (`<w:r>`).
#[derive(Debug, Clone, Copy)]
pub struct Run<'a> {
    element: &'a XmlElement,
}

impl<'a> Run<'a> {
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    fn property(&self, local: &str) -> Option<&'a XmlElement> {
        self.element.child(WML_MAIN, "rPr")?.child(WML_MAIN, local)
    }

    /// Text of the run. Tabs become `\t`, breaks become `\n`.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in self.element.elements() {
            if child.namespace.as_deref() != Some(WML_MAIN) {
                continue;
            }
            match child.local.as_str() {
                "t" => text.push_str(&child.text_content()),
                "tab" => text.push('\t'),
                "br" | "cr" => text.push('\n'),
                _ => {},
            }
        }
        text
    }

    /// Explicit font color. `auto` and malformed values count as no color.
    pub fn color(&self) -> Option<RGBColor> {
        let value = self.property("color")?.attribute_ns(WML_MAIN, "val")?;
        RGBColor::from_hex(&value)
    }

    /// Font size in points (`w:sz` holds half-points).
    pub fn size_pt(&self) -> Option<f64> {
        let value = self.property("sz")?.attribute_ns(WML_MAIN, "val")?;
        let half_points = atoi_simd::parse_pos::<u32, true>(value.trim().as_bytes()).ok()?;
        Some(f64::from(half_points) / 2.0)
    }

    /// Whether bold is switched on directly on the run.
    pub fn bold(&self) -> bool {
        self.property("b").is_some_and(is_on)
    }
}

/// A hyperlink (`<w:hyperlink>`).
#[derive(Debug, Clone, Copy)]
pub struct Hyperlink<'a> {
    element: &'a XmlElement,
}

impl<'a> Hyperlink<'a> {
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    /// Relationship id of an external target (`r:id`).
    pub fn r_id(&self) -> Option<String> {
        self.element.attribute_ns(OFC_RELATIONSHIPS, "id")
    }

    /// Concatenated `w:t` text inside the hyperlink.
    pub fn text(&self) -> String {
        self.element
            .descendants()
            .filter(|e| e.is(WML_MAIN, "t"))
            .map(XmlElement::text_content)
            .collect()
    }
}
