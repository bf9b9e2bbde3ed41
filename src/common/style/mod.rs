//! Common style and formatting types.
//!
//! This module provides the color type used by run formatting lookups and the
//! contrast detector.

// Submodule declarations
pub mod color;

// Re-exports
pub use color::RGBColor;
