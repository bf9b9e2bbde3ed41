//! Unified error types for the remediation engine.
//!
//! Every failure a caller can observe is one of these variants. Problems that
//! only affect a single part (a malformed `styles.xml`, say) never surface here;
//! they are recorded in the report and processing continues.
use thiserror::Error;

/// Main error type for remediation operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The upload is not a WordprocessingML package
    #[error("Not a supported package: {name} ({})", media_type.as_deref().unwrap_or("no media type"))]
    UnsupportedInput {
        name: String,
        media_type: Option<String>,
    },

    /// The input bytes cannot be opened as a ZIP package
    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    /// The rebuilt package lacks parts every .docx must contain
    #[error("Remediation produced an invalid .docx package (missing: {})", missing_parts.join(", "))]
    RemediationInvalid {
        missing_parts: Vec<String>,
        entries: Vec<String>,
    },

    /// The rebuilt package could not be written or read back
    #[error("Failed to rebuild package: {0}")]
    RebuildFailed(String),

    /// XML parsing or serialization error
    #[error("XML error: {0}")]
    XmlError(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// A report or payload could not be encoded as JSON
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable, machine-readable name of the failure kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedInput { .. } => "unsupported_input",
            Self::CorruptArchive(_) => "corrupt_archive",
            Self::RemediationInvalid { .. } => "remediation_invalid",
            Self::RebuildFailed(_) => "rebuild_failed",
            Self::XmlError(_) => "xml_error",
            Self::ZipError(_) => "zip_error",
            Self::Config(_) => "config_error",
            Self::Json(_) => "json_error",
            Self::Io(_) => "io_error",
        }
    }
}

/// Result type for remediation operations.
pub type Result<T> = std::result::Result<T, Error>;
