//! Per-file record types.
//!
//! A [`FileRecord`] always carries identity and filesystem facts. What was
//! learned from the file's content lives in [`FileDetails`], where each kind
//! wraps its payload in an [`Extracted`] outcome: either the parsed details or
//! a degraded marker holding the error text.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

static NULL: serde_json::Value = serde_json::Value::Null;

/// The two families of files a scan reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Line-oriented text (`*_latest.txt`).
    PlainText,
    /// YAML documents (`*_latest.yaml`, `*_latest.yml`).
    StructuredData,
}

impl FileKind {
    /// Short label used in console output and report headings.
    pub fn label(self) -> &'static str {
        match self {
            Self::PlainText => "TXT",
            Self::StructuredData => "YAML",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlainText => write!(f, "plain_text"),
            Self::StructuredData => write!(f, "structured_data"),
        }
    }
}

/// Shape of a parsed structured-data document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Mapping,
    Sequence,
    Scalar,
    /// Null value or an empty document.
    Empty,
    /// Reading or parsing failed.
    Error,
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mapping => write!(f, "mapping"),
            Self::Sequence => write!(f, "sequence"),
            Self::Scalar => write!(f, "scalar"),
            Self::Empty => write!(f, "empty"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Outcome of reading one file's content.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted<T> {
    /// Content was read (and parsed, where applicable).
    Ok(T),
    /// Reading or parsing failed; metrics fall back to zero/empty.
    Degraded { error: String },
}

impl<T> Extracted<T> {
    pub fn as_ok(&self) -> Option<&T> {
        match self {
            Self::Ok(details) => Some(details),
            Self::Degraded { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Degraded { error } => Some(error),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Content facts for a plain-text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainTextDetails {
    /// Raw file content.
    pub content: String,
    /// Non-empty lines, trimmed, in file order.
    pub lines: Vec<String>,
}

impl PlainTextDetails {
    /// Builds details from raw content, dropping blank lines.
    pub fn from_content(content: String) -> Self {
        let lines = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        Self { content, lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Content facts for a structured-data file.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredDetails {
    /// Raw file content.
    pub content: String,
    /// Parsed document, converted to a JSON value.
    pub data: serde_json::Value,
    pub shape: Shape,
    /// Number of top-level keys; zero unless `shape` is [`Shape::Mapping`].
    pub key_count: usize,
}

/// Kind-specific details of a [`FileRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum FileDetails {
    PlainText(Extracted<PlainTextDetails>),
    StructuredData(Extracted<StructuredDetails>),
}

impl FileDetails {
    pub fn kind(&self) -> FileKind {
        match self {
            Self::PlainText(_) => FileKind::PlainText,
            Self::StructuredData(_) => FileKind::StructuredData,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::PlainText(extracted) => extracted.error(),
            Self::StructuredData(extracted) => extracted.error(),
        }
    }
}

/// One discovered file and everything extracted from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// File name without directories.
    pub name: String,
    /// Absolute path.
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub relative_path: String,
    /// Lowercased extension including the dot (e.g. `.yaml`).
    pub extension: String,
    /// Size in bytes. Zero for unreadable plain-text files.
    pub size: u64,
    pub modified: DateTime<Local>,
    pub created: DateTime<Local>,
    pub details: FileDetails,
}

impl FileRecord {
    pub fn kind(&self) -> FileKind {
        self.details.kind()
    }

    /// Error text when the record is degraded.
    pub fn error(&self) -> Option<&str> {
        self.details.error()
    }

    pub fn is_degraded(&self) -> bool {
        self.error().is_some()
    }

    /// Raw content, empty for degraded records.
    pub fn content(&self) -> &str {
        match &self.details {
            FileDetails::PlainText(Extracted::Ok(text)) => &text.content,
            FileDetails::StructuredData(Extracted::Ok(data)) => &data.content,
            _ => "",
        }
    }

    /// Non-empty line count; zero for structured or degraded records.
    pub fn line_count(&self) -> usize {
        match &self.details {
            FileDetails::PlainText(Extracted::Ok(text)) => text.line_count(),
            _ => 0,
        }
    }

    /// Top-level key count; zero for plain-text or degraded records.
    pub fn key_count(&self) -> usize {
        match &self.details {
            FileDetails::StructuredData(Extracted::Ok(data)) => data.key_count,
            _ => 0,
        }
    }

    /// Shape label for structured records; `None` for plain text.
    pub fn shape(&self) -> Option<Shape> {
        match &self.details {
            FileDetails::StructuredData(Extracted::Ok(data)) => Some(data.shape),
            FileDetails::StructuredData(Extracted::Degraded { .. }) => Some(Shape::Error),
            FileDetails::PlainText(_) => None,
        }
    }

    /// Parsed value for structured records; `Null` otherwise.
    pub fn data(&self) -> &serde_json::Value {
        match &self.details {
            FileDetails::StructuredData(Extracted::Ok(data)) => &data.data,
            _ => &NULL,
        }
    }

    /// Fixed-width `YYYY-MM-DDTHH:MM:SS` form of the modification time.
    pub fn modified_prefix(&self) -> String {
        self.modified.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}
