//! Structured failure payload returned to clients instead of a package.
use super::types::Error;
use serde::Serialize;

/// Error code for every failure that happens after the upload was accepted.
pub const REMEDIATOR_FAILED: &str = "remediator_failed";

/// Error code for uploads rejected before any processing.
pub const UNSUPPORTED_INPUT: &str = "unsupported_input";

/// Transport-neutral description of a failed operation.
///
/// Serializes as `{error, kind, message, details}`. `error` is the coarse code a
/// client switches on, `kind` the precise [`Error::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailurePayload {
    pub error: &'static str,
    pub kind: &'static str,
    pub message: String,
    pub details: FailureDetails,
}

/// Machine-readable details attached to a [`FailurePayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FailureDetails {
    /// Required parts absent from the rebuilt package, plus every member it does have
    MissingParts {
        #[serde(rename = "missingParts")]
        missing_parts: Vec<String>,
        entries: Vec<String>,
    },
    /// What the client uploaded, for rejected inputs
    Received { received: ReceivedUpload },
    /// Free-form diagnostic text
    ErrorText {
        #[serde(rename = "errorText")]
        error_text: String,
    },
}

/// Name and declared media type of a rejected upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceivedUpload {
    pub name: String,
    pub mimetype: Option<String>,
}

impl Error {
    /// Build the failure payload for this error.
    pub fn to_payload(&self) -> FailurePayload {
        let (error, details) = match self {
            Error::UnsupportedInput { name, media_type } => (
                UNSUPPORTED_INPUT,
                FailureDetails::Received {
                    received: ReceivedUpload {
                        name: name.clone(),
                        mimetype: media_type.clone(),
                    },
                },
            ),
            Error::RemediationInvalid {
                missing_parts,
                entries,
            } => (
                REMEDIATOR_FAILED,
                FailureDetails::MissingParts {
                    missing_parts: missing_parts.clone(),
                    entries: entries.clone(),
                },
            ),
            other => (
                REMEDIATOR_FAILED,
                FailureDetails::ErrorText {
                    error_text: other.to_string(),
                },
            ),
        };

        FailurePayload {
            error,
            kind: self.kind(),
            message: self.to_string(),
            details,
        }
    }
}
