/// Header and footer parts (`word/headerN.xml`, `word/footerN.xml`).
use crate::common::xml::{XmlDocument, XmlError};
use crate::ooxml::opc::constants::namespace::WML_MAIN;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADER_FOOTER_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^word/(header|footer)\d*\.xml$").expect("valid header/footer pattern"));

/// Whether a member name is a header or footer part.
pub fn is_header_footer_part(name: &str) -> bool {
    HEADER_FOOTER_PART.is_match(name)
}

/// Visible text of a header or footer part: every `w:t`, joined with single
/// spaces and trimmed.
pub fn visible_text(xml: &[u8]) -> Result<String, XmlError> {
    let document = XmlDocument::parse(xml)?;
    let pieces: Vec<String> = document
        .root
        .descendants()
        .filter(|e| e.is(WML_MAIN, "t"))
        .map(|t| t.text_content())
        .collect();
    Ok(pieces.join(" ").trim().to_string())
}
