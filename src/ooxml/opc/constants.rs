/// Constant values related to the Open Packaging Convention.
///
/// This module contains content type URIs (like MIME-types) that specify a part's format,
/// XML namespaces, relationship types and the well-known part names of a
/// WordprocessingML package.

/// Content type URIs (like MIME-types) that specify a part's format
pub mod content_type {
    /// Media type of a whole .docx package
    pub const WML_DOCUMENT: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
    pub const WML_DOCUMENT_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const OPC_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
}

/// XML namespace URIs used in OPC packages
pub mod namespace {
    /// DrawingML main namespace
    pub const DML_MAIN: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    /// DrawingML wordprocessing drawing namespace
    pub const DML_WORDPROCESSING_DRAWING: &str =
        "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";

    /// Dublin Core elements, used by the core properties part
    pub const DC_ELEMENTS: &str = "http://purl.org/dc/elements/1.1/";

    /// OPC core properties namespace
    pub const OPC_CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";

    /// Office relationships namespace
    pub const OFC_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// OPC relationships namespace
    pub const OPC_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";

    /// OPC content types namespace
    pub const OPC_CONTENT_TYPES: &str =
        "http://schemas.openxmlformats.org/package/2006/content-types";

    /// WordprocessingML main namespace
    pub const WML_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
}

/// Open XML relationship target modes
pub mod target_mode {
    /// Internal relationship target mode (default)
    pub const INTERNAL: &str = "Internal";

    /// External relationship target mode (e.g., hyperlinks to external URLs)
    pub const EXTERNAL: &str = "External";
}

/// Relationship type URIs used in OPC packages
pub mod relationship_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

    // Images and media
    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    pub const AUDIO: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/audio";
    pub const VIDEO: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/video";

    // External links
    pub const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
}

/// Member names of the parts the remediation engine reads or rewrites
pub mod part_name {
    pub const CONTENT_TYPES: &str = "[Content_Types].xml";
    pub const DOCUMENT: &str = "word/document.xml";
    pub const DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";
    pub const SETTINGS: &str = "word/settings.xml";
    pub const STYLES: &str = "word/styles.xml";
    pub const CORE_PROPERTIES: &str = "docProps/core.xml";

    /// Directory targets of the main document's relationships resolve against
    pub const DOCUMENT_BASE: &str = "word/";
    pub const MEDIA_DIR: &str = "word/media/";

    /// Members every .docx package must contain
    pub const REQUIRED: [&str; 2] = [CONTENT_TYPES, DOCUMENT];
}
