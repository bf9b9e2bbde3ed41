//! Protection Remover for `word/settings.xml`.
use crate::accessibility::config::RemediationConfig;
use crate::accessibility::report::Report;
use crate::common::xml::{XmlDocument, XmlError};
use crate::ooxml::opc::constants::namespace::WML_MAIN;

/// Settings children that restrict editing.
const PROTECTION_ELEMENTS: [&str; 5] = [
    "documentProtection",
    "writeProtection",
    "readOnlyRecommended",
    "editRestrictions",
    "formProtection",
];

/// Strip editing restrictions and every `w:locked` element or attribute.
pub fn remove_protection(
    xml: &[u8],
    _config: &RemediationConfig,
) -> Result<Option<Vec<u8>>, XmlError> {
    let mut document = XmlDocument::parse(xml)?;
    let root = &mut document.root;

    let mut removed = root.remove_children_where(|e| {
        e.namespace.as_deref() == Some(WML_MAIN) && PROTECTION_ELEMENTS.contains(&e.local.as_str())
    });
    removed += root.remove_descendants_where(&|e| e.is(WML_MAIN, "locked"));
    root.walk_mut(&mut |e| {
        if e.remove_attribute_ns(WML_MAIN, "locked") {
            removed += 1;
        }
    });

    if removed == 0 {
        return Ok(None);
    }
    document.to_bytes().map(Some)
}

pub fn record(report: &mut Report, _config: &RemediationConfig) {
    report.details.removed_protection = true;
    report.summary.fix(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::W_NS;

    fn settings(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><ns0:settings xmlns:ns0="{}">{}</ns0:settings>"#,
            W_NS, inner
        )
    }

    #[test]
    fn test_removes_protection_under_any_prefix() {
        let xml = settings(concat!(
            r#"<ns0:zoom ns0:percent="100"/>"#,
            r#"<ns0:documentProtection ns0:edit="readOnly" ns0:enforcement="1"/>"#,
            r#"<ns0:writeProtection/>"#,
            r#"<ns0:rsids ns0:locked="1"><ns0:locked/></ns0:rsids>"#,
        ));
        let out = remove_protection(xml.as_bytes(), &RemediationConfig::default())
            .unwrap()
            .unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(!out.contains("documentProtection"));
        assert!(!out.contains("writeProtection"));
        assert!(!out.contains("locked"));
        assert!(out.contains(r#"<ns0:zoom ns0:percent="100"/>"#));
        assert!(out.contains("<ns0:rsids/>"));
    }

    #[test]
    fn test_unprotected_settings_are_unchanged() {
        let xml = settings(r#"<ns0:zoom ns0:percent="100"/>"#);
        assert_eq!(
            remove_protection(xml.as_bytes(), &RemediationConfig::default()).unwrap(),
            None
        );
    }

    #[test]
    fn test_other_namespaces_are_ignored() {
        let xml = format!(
            r#"<w:settings xmlns:w="{}" xmlns:x="urn:other"><x:documentProtection/><w:zoom x:locked="1"/></w:settings>"#,
            W_NS
        );
        assert_eq!(
            remove_protection(xml.as_bytes(), &RemediationConfig::default()).unwrap(),
            None
        );
    }

    #[test]
    fn test_second_pass_is_unchanged() {
        let xml = settings(r#"<ns0:documentProtection/><ns0:locked/>"#);
        let config = RemediationConfig::default();
        let once = remove_protection(xml.as_bytes(), &config).unwrap().unwrap();
        assert_eq!(remove_protection(&once, &config).unwrap(), None);
    }

    #[test]
    fn test_malformed_settings_fail() {
        assert!(remove_protection(b"<w:settings", &RemediationConfig::default()).is_err());
    }
}
