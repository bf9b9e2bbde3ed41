//! Remediation settings.
use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable values used by the fix rules and detectors.
///
/// Every field has a default, so a configuration file only needs the keys it
/// changes:
///
/// ```yaml
/// defaultLanguage: en-GB
/// maxLinkTextChars: 100
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemediationConfig {
    /// Language written to `docDefaults` by the language fix
    pub default_language: String,
    /// Title written to the core properties when the title is missing or generic
    pub title_placeholder: String,
    /// Visible link text longer than this is flagged
    pub max_link_text_chars: usize,
    /// Length of the header/footer preview
    pub preview_chars: usize,
    /// Length of the run text sample in contrast issues
    pub sample_chars: usize,
    /// Header/footer text shorter than this is not reported
    pub min_header_footer_chars: usize,
}

impl Default for RemediationConfig {
    fn default() -> Self {
        Self {
            default_language: "en-US".to_string(),
            title_placeholder: "Needs Title".to_string(),
            max_link_text_chars: 120,
            preview_chars: 140,
            sample_chars: 60,
            min_header_footer_chars: 3,
        }
    }
}

impl RemediationConfig {
    /// Parse a YAML document. Blank input yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_saphyr::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }

    fn validate(&self) -> Result<()> {
        if self.default_language.trim().is_empty() {
            return Err(Error::Config("defaultLanguage must not be empty".to_string()));
        }
        if self.title_placeholder.trim().is_empty() {
            return Err(Error::Config("titlePlaceholder must not be empty".to_string()));
        }
        Ok(())
    }
}
