//! Pattern rules for names, titles, link text and heading styles.
//!
//! Every text heuristic the engine applies lives here so the rules can be
//! read and tested in one place.
//!
//! Precedence for file names: a stem matching `document`/`untitled` (with
//! optional digits) is generic; otherwise a stem shorter than four characters
//! is too short; otherwise a stem containing `_` is unsafe for sharing. Any of
//! the three makes the name non-descriptive.
use once_cell::sync::Lazy;
use regex::Regex;

static GENERIC_STEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(document|untitled)\d*$").expect("valid generic stem pattern"));

static GENERIC_LINK_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(click here|read more|here|more)\b").expect("valid link text pattern")
});

static HEADING_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Heading\s*([1-9])$").expect("valid heading pattern"));

static IMAGE_FILE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\.(png|jpe?g|gif|bmp|tiff?|emf|wmf|svg|webp)$").expect("valid image name pattern")
});

static SLUG_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid slug pattern"));
static SLUG_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_]+").expect("valid slug pattern"));
static SLUG_HYPHEN_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-{2,}").expect("valid slug pattern"));

/// Minimum stem length, in characters, of a descriptive file name.
pub const MIN_STEM_CHARS: usize = 4;

/// Why a file name stem is not descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StemProblem {
    /// `document`, `untitled`, optionally followed by digits
    Generic,
    /// Fewer than [`MIN_STEM_CHARS`] characters
    TooShort,
    /// Contains an underscore
    Underscore,
}

/// First problem with a file name stem, in precedence order.
pub fn stem_problem(stem: &str) -> Option<StemProblem> {
    if GENERIC_STEM.is_match(stem) {
        Some(StemProblem::Generic)
    } else if stem.chars().count() < MIN_STEM_CHARS {
        Some(StemProblem::TooShort)
    } else if stem.contains('_') {
        Some(StemProblem::Underscore)
    } else {
        None
    }
}

/// Whether a document title needs replacing: blank, generic, or already the
/// placeholder (compared case-insensitively).
pub fn is_non_descriptive_title(title: &str, placeholder: &str) -> bool {
    let title = title.trim();
    title.is_empty()
        || GENERIC_STEM.is_match(title)
        || title.to_lowercase() == placeholder.trim().to_lowercase()
}

/// Whether link text contains a generic phrase as a whole word.
pub fn is_generic_link_text(text: &str) -> bool {
    GENERIC_LINK_TEXT.is_match(text)
}

/// Heading level of a style name such as `heading 2` or `Heading2`.
pub fn heading_level(style_name: &str) -> Option<u8> {
    let captures = HEADING_STYLE.captures(style_name)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Whether alternative text is just an image file name.
pub fn looks_like_file_name(alt: &str) -> bool {
    IMAGE_FILE_NAME.is_match(alt.trim())
}

/// Slug form of `text`: characters other than word characters, whitespace
/// and hyphens are dropped, the rest is trimmed and lowercased, runs of
/// whitespace/underscores become one hyphen and repeated hyphens collapse.
/// Empty results become `document`.
pub fn slugify(text: &str) -> String {
    let stripped = SLUG_DISALLOWED.replace_all(text, "");
    let lowered = stripped.trim().to_lowercase();
    let separated = SLUG_SEPARATORS.replace_all(&lowered, "-");
    let slug = SLUG_HYPHEN_RUNS.replace_all(&separated, "-");
    if slug.is_empty() {
        "document".to_string()
    } else {
        slug.into_owned()
    }
}
