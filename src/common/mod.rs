//! Common types and utilities shared by the package, document and
//! accessibility layers.
//!
//! This module provides the unified error type, the XML part codec and the
//! small value types (such as colors) that more than one layer needs.

// Submodule declarations
pub mod error;
pub mod style;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, FailurePayload, Result};
pub use style::RGBColor;
