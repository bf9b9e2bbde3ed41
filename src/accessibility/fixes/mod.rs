//! Fix rules.
//!
//! Each XML-level rule maps one part's bytes to `Some(new bytes)` or `None`
//! when the part already complies. The table header repeater works on the
//! document model instead and runs first.
use super::config::RemediationConfig;
use super::report::Report;
use crate::common::xml::XmlError;
use crate::ooxml::opc::constants::part_name;

pub mod language;
pub mod protection;
pub mod table_header;
pub mod title;

/// A fix rule bound to the part it rewrites.
pub struct PartRule {
    pub name: &'static str,
    pub part: &'static str,
    /// Rewrite the part, or `None` when nothing needs changing
    pub apply: fn(&[u8], &RemediationConfig) -> Result<Option<Vec<u8>>, XmlError>,
    /// Record an applied rewrite in the report
    pub record: fn(&mut Report, &RemediationConfig),
}

/// XML-level rules in the order they run.
pub static PART_RULES: [PartRule; 3] = [
    PartRule {
        name: "protection",
        part: part_name::SETTINGS,
        apply: protection::remove_protection,
        record: protection::record,
    },
    PartRule {
        name: "language",
        part: part_name::STYLES,
        apply: language::set_default_language,
        record: language::record,
    },
    PartRule {
        name: "title",
        part: part_name::CORE_PROPERTIES,
        apply: title::ensure_title,
        record: title::record,
    },
];
