//! End-to-end remediation through the public API and the JSON report shape.
use docx_remediate::{Error, Remediator, Upload};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/plan" TargetMode="External"/></Relationships>"#;

const CORE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title></dc:title><dc:creator>Ann</dc:creator></cp:coreProperties>"#;

fn zip(members: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in members {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn unzip(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut text = String::new();
    archive.by_name(name).unwrap().read_to_string(&mut text).unwrap();
    text
}

fn document(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{W_NS}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{body}</w:body></w:document>"#
    )
}

fn settings() -> String {
    format!(
        r#"<w:settings xmlns:w="{W_NS}"><w:zoom w:percent="100"/><w:documentProtection w:edit="readOnly" w:enforcement="1"/></w:settings>"#
    )
}

fn styles() -> String {
    format!(
        r#"<w:styles xmlns:w="{W_NS}"><w:docDefaults><w:rPrDefault><w:rPr><w:sz w:val="22"/></w:rPr></w:rPrDefault></w:docDefaults></w:styles>"#
    )
}

/// A package exercising every fix rule and several detectors.
fn sample_package() -> Vec<u8> {
    let body = concat!(
        r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Intro</w:t></w:r></w:p>"#,
        r#"<w:p><w:pPr><w:pStyle w:val="Heading3"/></w:pPr><w:r><w:t>Details</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:rPr><w:color w:val="777777"/></w:rPr><w:t>Muted note</w:t></w:r></w:p>"#,
        r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Head</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        r#"<w:p><w:hyperlink r:id="rId2"><w:r><w:t>click here</w:t></w:r></w:hyperlink></w:p>"#,
    );
    let document = document(body);
    let settings = settings();
    let styles = styles();
    zip(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", PACKAGE_RELS),
        ("word/document.xml", document.as_str()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS),
        ("word/settings.xml", settings.as_str()),
        ("word/styles.xml", styles.as_str()),
        ("docProps/core.xml", CORE),
    ])
}

#[test]
fn report_json_shape() {
    let bytes = sample_package();
    let outcome = Remediator::default()
        .remediate_and_report(&Upload::new(&bytes, "my_report_v2.docx"))
        .unwrap();
    let report = serde_json::to_value(&outcome.report).unwrap();

    assert_eq!(report["fileName"], "my_report_v2.docx");
    assert_eq!(report["suggestedFileName"], "my-report-v2.docx");
    // protection, language, one table header, file name
    assert_eq!(report["summary"]["fixed"], 4);
    // title placeholder, heading jump, low contrast, generic link text
    assert_eq!(report["summary"]["flagged"], 4);

    let details = &report["details"];
    assert_eq!(details["removedProtection"], true);
    assert_eq!(details["languageDefaultFixed"], json!({"setTo": "en-US"}));
    assert_eq!(details["titleNeedsFixing"], true);
    assert_eq!(details["fileNameFixed"], true);
    assert_eq!(details["fileNameNeedsFixing"], false);
    assert_eq!(details["tablesHeaderRowSet"], json!([{"tableIndex": 0}]));
    assert_eq!(details["emptyHeadings"], json!([]));
    assert_eq!(
        details["headingOrderIssues"],
        json!([{"paragraphIndex": 1, "previousLevel": 1, "currentLevel": 3}])
    );
    assert_eq!(
        details["badLinks"],
        json!([{
            "paragraphIndex": 4,
            "display": "click here",
            "target": "https://example.com/plan",
            "reasons": ["generic"]
        }])
    );
    assert_eq!(details["colorContrastIssues"][0]["paragraphIndex"], 2);
    assert_eq!(details["colorContrastIssues"][0]["sample"], "Muted note");
    assert_eq!(details["mergedSplitEmptyCells"], json!([]));
    assert_eq!(details["headerFooterAudit"], json!([]));
    assert_eq!(details["embeddedMedia"], json!([]));
    assert_eq!(details["gifsDetected"], json!([]));
    assert_eq!(details["imagesMissingOrBadAlt"], 0);
    assert_eq!(details["anchoredDrawingsDetected"], 0);
    assert_eq!(details["formsDetected"], false);
    assert_eq!(details["partFailures"], json!([]));

    let package = outcome.package.expect("valid package");
    assert_eq!(package.file_name(), "my-report-v2.docx");
}

#[test]
fn download_carries_fixed_parts_and_digest() {
    let bytes = sample_package();
    let package = Remediator::default()
        .remediate_and_download(&Upload::new(&bytes, "my_report_v2.docx"))
        .unwrap();

    assert_eq!(package.file_name(), "my-report-v2.docx");
    assert_eq!(
        package.media_type(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    let expected: String = Sha256::digest(package.bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();
    assert_eq!(package.sha256(), expected);

    let settings = unzip(package.bytes(), "word/settings.xml");
    assert!(!settings.contains("documentProtection"));
    assert!(settings.contains("zoom"));

    let styles = unzip(package.bytes(), "word/styles.xml");
    assert!(styles.contains("lang"));
    assert!(styles.contains(r#"w:val="en-US""#));

    let core = unzip(package.bytes(), "docProps/core.xml");
    assert!(core.contains("Needs Title"));

    let document = unzip(package.bytes(), "word/document.xml");
    assert!(document.contains("tblHeader"));

    // untouched members come through unchanged
    assert_eq!(unzip(package.bytes(), "word/_rels/document.xml.rels"), DOCUMENT_RELS);
}

#[test]
fn second_pass_changes_nothing_further() {
    let remediator = Remediator::default();
    let first = remediator
        .remediate_and_download(&Upload::new(&sample_package(), "Quarterly-Plan.docx"))
        .unwrap();
    let outcome = remediator
        .remediate_and_report(&Upload::new(first.bytes(), "Quarterly-Plan.docx"))
        .unwrap();

    let report = serde_json::to_value(&outcome.report).unwrap();
    assert_eq!(report["summary"]["fixed"], 0);
    assert_eq!(report["details"]["removedProtection"], false);
    assert_eq!(report["details"]["languageDefaultFixed"], Value::Null);
    assert_eq!(report["details"]["tablesHeaderRowSet"], json!([]));
    // the placeholder title is still not a real title
    assert_eq!(report["details"]["titleNeedsFixing"], true);
}

#[test]
fn missing_content_types_is_never_downloadable() {
    let document = document("<w:p/>");
    let bytes = zip(&[("_rels/.rels", PACKAGE_RELS), ("word/document.xml", document.as_str())]);
    let remediator = Remediator::default();

    let err = remediator
        .remediate_and_download(&Upload::new(&bytes, "Annual-Summary.docx"))
        .unwrap_err();
    assert!(matches!(err, Error::RemediationInvalid { .. }));

    let payload = serde_json::to_value(err.to_payload()).unwrap();
    assert_eq!(payload["error"], "remediator_failed");
    assert_eq!(payload["details"]["missingParts"], json!(["[Content_Types].xml"]));
    assert_eq!(
        payload["details"]["entries"],
        json!(["_rels/.rels", "word/document.xml"])
    );

    let outcome = remediator
        .remediate_and_report(&Upload::new(&bytes, "Annual-Summary.docx"))
        .unwrap();
    assert!(outcome.package.is_none());
    let report = serde_json::to_value(&outcome.report).unwrap();
    assert_eq!(report["details"]["partFailures"][0]["stage"], "validate");
    assert_eq!(report["details"]["partFailures"][0]["part"], "[Content_Types].xml");
}

#[test]
fn malformed_styles_only_affects_its_own_sections() {
    let document = document(
        r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Intro</w:t></w:r></w:p>"#,
    );
    let broken_styles = format!(r#"<w:styles xmlns:w="{W_NS}"><w:style></w:styles>"#);
    let bytes = zip(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", PACKAGE_RELS),
        ("word/document.xml", document.as_str()),
        ("word/styles.xml", broken_styles.as_str()),
    ]);

    let outcome = Remediator::default()
        .remediate_and_report(&Upload::new(&bytes, "Annual-Summary.docx"))
        .unwrap();
    assert!(outcome.package.is_some());

    let report = serde_json::to_value(&outcome.report).unwrap();
    let details = &report["details"];
    let stages: Vec<_> = details["partFailures"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["stage"].as_str().unwrap(), f["part"].as_str().unwrap()))
        .collect();
    assert_eq!(stages, [("fix", "word/styles.xml"), ("detect", "word/styles.xml")]);
    assert_eq!(details["languageDefaultFixed"], Value::Null);
    assert_eq!(details["emptyHeadings"], Value::Null);
    assert_eq!(details["headingOrderIssues"], Value::Null);
    assert_eq!(details["badLinks"], json!([]));
}

#[test]
fn unsupported_and_corrupt_uploads() {
    let remediator = Remediator::default();

    let err = remediator
        .remediate_and_report(&Upload::new(b"hello", "notes.txt").with_media_type("text/plain"))
        .unwrap_err();
    let payload = serde_json::to_value(err.to_payload()).unwrap();
    assert_eq!(payload["kind"], "unsupported_input");
    assert_eq!(
        payload["details"]["received"],
        json!({"name": "notes.txt", "mimetype": "text/plain"})
    );

    let err = remediator
        .remediate_and_download(&Upload::new(b"PK not really", "Annual-Summary.docx"))
        .unwrap_err();
    assert!(matches!(err, Error::CorruptArchive(_)));
    assert_eq!(err.to_payload().error, "remediator_failed");
}
