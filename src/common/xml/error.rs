/// Error types for the XML part codec
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Malformed XML: {0}")]
    Malformed(String),

    #[error("XML part has no root element")]
    MissingRoot,

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Failed to serialize XML: {0}")]
    Write(String),
}

impl From<quick_xml::Error> for XmlError {
    fn from(err: quick_xml::Error) -> Self {
        XmlError::Malformed(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for XmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        XmlError::Malformed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, XmlError>;
