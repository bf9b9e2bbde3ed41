//! Accessibility remediation for WordprocessingML packages.
//!
//! [`Remediator`] drives the whole pipeline: the [`fixes`] rewrite individual
//! parts, the [`detect`] battery inspects the rebuilt package, and everything
//! lands in one [`Report`].

pub mod config;
pub mod detect;
pub mod engine;
pub mod filename;
pub mod fixes;
pub mod patterns;
pub mod report;

pub use config::RemediationConfig;
pub use engine::{RemediatedPackage, RemediationOutcome, Remediator, Upload};
pub use report::Report;
