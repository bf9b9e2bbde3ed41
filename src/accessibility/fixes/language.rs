//! Language Default Setter for `word/styles.xml`.
use crate::accessibility::config::RemediationConfig;
use crate::accessibility::report::{LanguageFix, Report};
use crate::common::xml::{XmlDocument, XmlError};
use crate::ooxml::opc::constants::namespace::WML_MAIN;

/// Ensure `w:docDefaults/w:rPrDefault/w:rPr/w:lang/@w:val` is the configured
/// language, creating whatever is missing along the path.
///
/// `docDefaults` is the first child of `w:styles` in the schema and
/// `rPrDefault` the first of `docDefaults`, so missing ones go in front.
pub fn set_default_language(
    xml: &[u8],
    config: &RemediationConfig,
) -> Result<Option<Vec<u8>>, XmlError> {
    let mut document = XmlDocument::parse(xml)?;
    let w = document.bind_namespace(WML_MAIN, "w");
    let language = config.default_language.as_str();

    let r_pr = document
        .root
        .get_or_insert_child(&w, "docDefaults", 0)?
        .get_or_insert_child(&w, "rPrDefault", 0)?
        .get_or_insert_child(&w, "rPr", 0)?;

    match r_pr.child_mut(WML_MAIN, "lang") {
        Some(lang) if lang.attribute_ns(WML_MAIN, "val").as_deref() == Some(language) => {
            return Ok(None);
        },
        Some(lang) => lang.set_attribute_ns(&w, "val", language),
        None => {
            let lang = r_pr.get_or_insert_child(&w, "lang", usize::MAX)?;
            lang.set_attribute_ns(&w, "val", language);
        },
    }

    document.to_bytes().map(Some)
}

pub fn record(report: &mut Report, config: &RemediationConfig) {
    report.details.language_default_fixed = Some(LanguageFix {
        set_to: config.default_language.clone(),
    });
    report.summary.fix(1);
}
