//! Report configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes.
//!
//! # Example YAML
//!
//! ```yaml
//! required_branch: main
//! suffixes:
//!   plain_text:
//!     - _latest.txt
//!   structured_data:
//!     - _latest.yaml
//!     - _latest.yml
//! output:
//!   report: index.html
//!   snapshot: stats.json
//! preview:
//!   text_chars: 200
//!   structured_chars: 500
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};
use crate::types::FileKind;

/// File name suffixes that select files for each kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuffixConfig {
    pub plain_text: Vec<String>,
    pub structured_data: Vec<String>,
}

impl Default for SuffixConfig {
    fn default() -> Self {
        Self {
            plain_text: vec!["_latest.txt".to_string()],
            structured_data: vec!["_latest.yaml".to_string(), "_latest.yml".to_string()],
        }
    }
}

impl SuffixConfig {
    /// Returns the kind whose suffix list matches `file_name`, if any.
    pub fn classify(&self, file_name: &str) -> Option<FileKind> {
        let matches = |suffixes: &[String]| {
            suffixes
                .iter()
                .any(|suffix| file_name.ends_with(suffix.as_str()))
        };
        if matches(&self.plain_text[..]) {
            Some(FileKind::PlainText)
        } else if matches(&self.structured_data[..]) {
            Some(FileKind::StructuredData)
        } else {
            None
        }
    }

    /// Glob-style patterns (`*_latest.txt`) for display.
    pub fn patterns(&self) -> Vec<String> {
        self.plain_text
            .iter()
            .chain(&self.structured_data)
            .map(|suffix| format!("*{suffix}"))
            .collect()
    }
}

/// Artifact file names, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub report: String,
    pub snapshot: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report: "index.html".to_string(),
            snapshot: "stats.json".to_string(),
        }
    }
}

/// Preview lengths for report tables, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub text_chars: usize,
    pub structured_chars: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            text_chars: 200,
            structured_chars: 500,
        }
    }
}

/// Top-level configuration for a report run.
///
/// # Examples
///
/// ```
/// use latest_stats_core::{FileKind, ReportConfig};
///
/// let config = ReportConfig::default();
/// assert_eq!(config.required_branch, "main");
/// assert_eq!(
///     config.suffixes.classify("deps_latest.yml"),
///     Some(FileKind::StructuredData)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Branch a CI caller must be on before generating reports.
    pub required_branch: String,
    pub suffixes: SuffixConfig,
    pub output: OutputConfig,
    pub preview: PreviewConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            required_branch: crate::context::DEFAULT_BRANCH.to_string(),
            suffixes: SuffixConfig::default(),
            output: OutputConfig::default(),
            preview: PreviewConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Loads and validates configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](ReportError::Io) if the file cannot be read,
    /// [`Yaml`](ReportError::Yaml) if parsing fails, or
    /// [`InvalidConfig`](ReportError::InvalidConfig) if validation fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks structural constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let suffixes = &self.suffixes;
        if suffixes.plain_text.is_empty() || suffixes.structured_data.is_empty() {
            return Err(ReportError::InvalidConfig(
                "both suffix lists need at least one entry".to_string(),
            ));
        }
        if let Some(empty) = suffixes
            .plain_text
            .iter()
            .chain(&suffixes.structured_data)
            .find(|s| s.is_empty())
        {
            return Err(ReportError::InvalidConfig(format!(
                "suffix {empty:?} must not be empty"
            )));
        }
        if let Some(shared) = suffixes
            .plain_text
            .iter()
            .find(|s| suffixes.structured_data.contains(s))
        {
            return Err(ReportError::InvalidConfig(format!(
                "suffix '{shared}' is listed for both kinds"
            )));
        }
        if self.output.report.trim().is_empty() || self.output.snapshot.trim().is_empty() {
            return Err(ReportError::InvalidConfig(
                "output file names must not be empty".to_string(),
            ));
        }
        if self.output.report == self.output.snapshot {
            return Err(ReportError::InvalidConfig(
                "report and snapshot must be different files".to_string(),
            ));
        }
        if self.preview.text_chars == 0 || self.preview.structured_chars == 0 {
            return Err(ReportError::InvalidConfig(
                "preview lengths must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
