//! Title Ensurer for `docProps/core.xml`.
use crate::accessibility::config::RemediationConfig;
use crate::accessibility::patterns;
use crate::accessibility::report::Report;
use crate::common::xml::{XmlDocument, XmlElement, XmlError};
use crate::ooxml::opc::constants::namespace::DC_ELEMENTS;

/// Replace a missing, blank or generic `dc:title` with the placeholder.
///
/// A title that already equals the placeholder is written again, so the
/// document keeps being reported until someone gives it a real title.
pub fn ensure_title(xml: &[u8], config: &RemediationConfig) -> Result<Option<Vec<u8>>, XmlError> {
    let mut document = XmlDocument::parse(xml)?;

    let current = document
        .root
        .child(DC_ELEMENTS, "title")
        .map(XmlElement::text_content)
        .unwrap_or_default();
    if !patterns::is_non_descriptive_title(&current, &config.title_placeholder) {
        return Ok(None);
    }

    let dc = document.bind_namespace(DC_ELEMENTS, "dc");
    document
        .root
        .get_or_insert_child(&dc, "title", usize::MAX)?
        .set_text(&config.title_placeholder);

    document.to_bytes().map(Some)
}

/// A placeholder is not a real title: the document is flagged, not fixed.
pub fn record(report: &mut Report, _config: &RemediationConfig) {
    report.details.title_needs_fixing = true;
    report.summary.flag(1);
}
