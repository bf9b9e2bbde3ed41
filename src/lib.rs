//! docx-remediate - accessibility remediation for Word (.docx) packages
//!
//! This library takes the bytes of a WordprocessingML package, applies a small
//! catalog of low-risk accessibility fixes to individual parts, runs a battery
//! of read-only detectors over the result and produces a single deterministic
//! report, optionally together with the rebuilt package.
//!
//! # Features
//!
//! - **Surgical part replacement**: only the parts a fix touches are rewritten,
//!   every other archive member is carried over unchanged and in order
//! - **Namespace-correct XML edits**: elements are located by namespace URI,
//!   never by the prefix the producing application happened to use
//! - **Detectors**: heading structure, link text, table cells, header/footer
//!   text, color contrast, media, image alt text, floating drawings and forms
//! - **Integrity checks**: a rebuilt package missing a required part is never
//!   handed back to a caller
//!
//! # Example - Producing a report
//!
//! ```no_run
//! use docx_remediate::{Remediator, Upload};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("my_report.docx")?;
//! let remediator = Remediator::default();
//! let outcome = remediator.remediate_and_report(&Upload::new(&bytes, "my_report.docx"))?;
//!
//! println!("{}", serde_json::to_string_pretty(&outcome.report)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Downloading the remediated package
//!
//! ```no_run
//! use docx_remediate::{Remediator, Upload};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("document7.docx")?;
//! let remediator = Remediator::default();
//!
//! match remediator.remediate_and_download(&Upload::new(&bytes, "document7.docx")) {
//!     Ok(package) => {
//!         std::fs::write(package.file_name(), package.bytes())?;
//!         println!("sha256: {}", package.sha256());
//!     },
//!     Err(err) => println!("{}", serde_json::to_string(&err.to_payload())?),
//! }
//! # Ok(())
//! # }
//! ```

/// Shared error types and the XML part codec
pub mod common;

/// OOXML package access and the WordprocessingML document model
pub mod ooxml;

/// Fix rules, detectors, report aggregation and the remediation engine
pub mod accessibility;

pub use accessibility::{
    RemediatedPackage, RemediationConfig, RemediationOutcome, Remediator, Report, Upload,
};
pub use common::{Error, Result};

#[cfg(test)]
pub(crate) mod testing;
