/// Error types for OPC package operations
use crate::common::xml::XmlError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcError {
    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    #[error("Duplicate member name: {0}")]
    DuplicateMember(String),

    #[error("XML parsing error: {0}")]
    Xml(#[from] XmlError),

    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<quick_xml::Error> for OpcError {
    fn from(err: quick_xml::Error) -> Self {
        OpcError::Xml(XmlError::from(err))
    }
}

impl From<quick_xml::events::attributes::AttrError> for OpcError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OpcError::Xml(XmlError::from(err))
    }
}

pub type Result<T> = std::result::Result<T, OpcError>;
