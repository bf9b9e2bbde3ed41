//! Office Open XML (OOXML) package access for Word (.docx) documents.
//!
//! The implementation is based on the Open Packaging Conventions (OPC).
//!
//! # Architecture
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): Low-level package handling (ZIP members, rebuild,
//!    relationships)
//! 2. **Document Layer** (`docx`): Typed views of WordprocessingML content
//!
//! # Example: Reading the main document
//!
//! ```rust,no_run
//! use docx_remediate::ooxml::docx::Document;
//! use docx_remediate::ooxml::opc::Package;
//! use docx_remediate::ooxml::opc::constants::part_name;
//!
//! let bytes = std::fs::read("document.docx")?;
//! let pkg = Package::open(&bytes)?;
//! if let Some(xml) = pkg.read(part_name::DOCUMENT) {
//!     let doc = Document::parse(xml)?;
//!     println!("Document contains {} paragraphs", doc.paragraphs().len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod docx;
pub mod opc;
