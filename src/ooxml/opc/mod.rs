/// Open Packaging Conventions (OPC) implementation.
///
/// This module provides the parts of the OPC specification the remediation
/// engine needs:
///
/// - Package constants (namespaces, relationship types, well-known part names)
/// - ZIP-based physical packaging, read and rebuild
/// - Relationship parsing and target resolution
///
/// # Guarantees
///
/// - Member order of the source archive is kept on rebuild
/// - Members that are not replaced are copied with identical decompressed bytes
/// - Uses `quick-xml` for streaming `.rels` parsing
pub mod constants;
pub mod error;
pub mod package;
pub mod phys_pkg;
pub mod rel;

// Re-export commonly used types
pub use error::OpcError;
pub use package::{Package, ReplacementSet};
pub use rel::{Relationship, Relationships};
