//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from the
//! layer-specific error types to the unified Error type.

use super::types::Error;
use crate::common::xml::XmlError;
use crate::ooxml::opc::error::OpcError;

impl From<XmlError> for Error {
    fn from(err: XmlError) -> Self {
        Error::XmlError(err.to_string())
    }
}

impl From<OpcError> for Error {
    fn from(err: OpcError) -> Self {
        match err {
            OpcError::CorruptArchive(s) => Error::CorruptArchive(s),
            OpcError::DuplicateMember(s) => {
                Error::CorruptArchive(format!("duplicate member name: {}", s))
            },
            OpcError::ZipError(e) => Error::ZipError(e.to_string()),
            OpcError::IoError(e) => Error::Io(e),
            OpcError::Xml(e) => Error::XmlError(e.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_archive_keeps_its_kind() {
        let err = Error::from(OpcError::CorruptArchive("bad central directory".to_string()));
        assert_eq!(err.kind(), "corrupt_archive");
        assert!(err.to_string().contains("bad central directory"));
    }

    #[test]
    fn test_duplicate_member_is_corruption() {
        let err = Error::from(OpcError::DuplicateMember("word/document.xml".to_string()));
        assert!(matches!(err, Error::CorruptArchive(ref s) if s.contains("word/document.xml")));
    }

    #[test]
    fn test_opc_xml_failure_is_xml_error() {
        let err = Error::from(OpcError::Xml(XmlError::MissingRoot));
        assert_eq!(err.kind(), "xml_error");
        assert!(err.to_string().contains("no root element"));
    }
}
