//! Filename normalizer.
use super::patterns;
use super::report::Report;

/// How an upload's file name should be treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNameVerdict {
    /// The name conveys content; keep it
    Descriptive,
    /// Non-descriptive but safely renameable
    Rename { suggested: String },
    /// Non-descriptive with nothing to salvage; a person must rename it
    NeedsAttention,
}

/// Split `file_name` into stem and extension (with its dot). Names without an
/// extension, or whose only dot is leading, have an empty extension.
fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => file_name.split_at(dot),
        _ => (file_name, ""),
    }
}

/// Classify `file_name`.
pub fn classify(file_name: &str) -> FileNameVerdict {
    let (stem, extension) = split_extension(file_name);
    match patterns::stem_problem(stem) {
        None => FileNameVerdict::Descriptive,
        Some(_) if stem.contains('_') => FileNameVerdict::Rename {
            suggested: format!("{}{}", patterns::slugify(&stem.replace('_', "-")), extension),
        },
        Some(_) => FileNameVerdict::NeedsAttention,
    }
}

/// Classify the report's file name and record the result.
pub fn apply(report: &mut Report) {
    match classify(&report.file_name) {
        FileNameVerdict::Descriptive => {
            report.suggested_file_name = Some(report.file_name.clone());
        },
        FileNameVerdict::Rename { suggested } => {
            report.suggested_file_name = Some(suggested);
            report.details.file_name_fixed = true;
            report.summary.fix(1);
        },
        FileNameVerdict::NeedsAttention => {
            report.suggested_file_name = None;
            report.details.file_name_needs_fixing = true;
            report.summary.flag(1);
        },
    }
}
