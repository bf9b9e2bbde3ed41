//! Unified error types for the remediation engine.
//!
//! This module provides the error type every public operation returns and the
//! transport-neutral failure payload a caller can hand back to a client.

// Submodule declarations
pub mod conversions;
pub mod payload;
pub mod types;

// Re-exports
pub use payload::{FailureDetails, FailurePayload};
pub use types::{Error, Result};
