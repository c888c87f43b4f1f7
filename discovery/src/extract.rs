//! Per-file metadata and content extraction.
//!
//! Content failures never escape this module: they become
//! [`Extracted::Degraded`] records. Only a failing `stat` (which leaves no
//! identity or timestamps to report) is returned as an error.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Local};
use latest_stats_core::{
    Extracted, FileDetails, FileKind, FileRecord, PlainTextDetails, Shape, StructuredDetails,
};
use serde_yaml::Value as YamlValue;
use tracing::{debug, warn};

use crate::discover::DiscoveredFile;

/// Builds a [`FileRecord`] for one discovered file.
///
/// # Errors
///
/// Returns the I/O error when the file cannot be stat'd.
pub fn extract_record(root: &Path, file: &DiscoveredFile) -> io::Result<FileRecord> {
    let path = &file.path;
    let metadata = fs::metadata(path)?;
    let modified = metadata.modified()?;
    // Birth time is not available on every filesystem.
    let created = metadata.created().unwrap_or(modified);

    let mut size = metadata.len();
    let details = match file.kind {
        FileKind::PlainText => {
            let extracted = read_plain_text(path);
            if extracted.is_degraded() {
                size = 0;
            }
            FileDetails::PlainText(extracted)
        }
        FileKind::StructuredData => FileDetails::StructuredData(read_structured(path)),
    };

    if let Some(error) = details.error() {
        warn!(path = %path.display(), error, "degraded record");
    } else {
        debug!(path = %path.display(), size, "extracted");
    }

    Ok(FileRecord {
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        path: std::path::absolute(path).unwrap_or_else(|_| path.clone()),
        relative_path: path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned(),
        extension: path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default(),
        size,
        modified: DateTime::<Local>::from(modified),
        created: DateTime::<Local>::from(created),
        details,
    })
}

/// Extracts every file, skipping (with a warning) those that cannot be stat'd.
pub fn extract_all(root: &Path, files: &[DiscoveredFile]) -> Vec<FileRecord> {
    files
        .iter()
        .filter_map(|file| match extract_record(root, file) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(path = %file.path.display(), %err, "skipping file that cannot be stat'd");
                None
            }
        })
        .collect()
}

fn read_plain_text(path: &Path) -> Extracted<PlainTextDetails> {
    match fs::read_to_string(path) {
        Ok(content) => Extracted::Ok(PlainTextDetails::from_content(content)),
        Err(err) => Extracted::Degraded {
            error: err.to_string(),
        },
    }
}

fn read_structured(path: &Path) -> Extracted<StructuredDetails> {
    let parsed = fs::read_to_string(path)
        .map_err(|err| err.to_string())
        .and_then(|content| parse_structured(content).map_err(|err| err.to_string()));
    match parsed {
        Ok(details) => Extracted::Ok(details),
        Err(error) => Extracted::Degraded { error },
    }
}

/// Parses YAML content into structured details.
pub fn parse_structured(content: String) -> Result<StructuredDetails, serde_yaml::Error> {
    let mut value = if content.trim().is_empty() {
        YamlValue::Null
    } else {
        serde_yaml::from_str::<YamlValue>(&content)?
    };
    value.apply_merge()?;

    Ok(StructuredDetails {
        shape: shape_of(&value),
        key_count: top_level_key_count(&value),
        data: yaml_to_json(value),
        content,
    })
}

fn shape_of(value: &YamlValue) -> Shape {
    match value {
        YamlValue::Null => Shape::Empty,
        YamlValue::Mapping(_) => Shape::Mapping,
        YamlValue::Sequence(_) => Shape::Sequence,
        YamlValue::Tagged(tagged) => shape_of(&tagged.value),
        YamlValue::Bool(_) | YamlValue::Number(_) | YamlValue::String(_) => Shape::Scalar,
    }
}

fn top_level_key_count(value: &YamlValue) -> usize {
    match value {
        YamlValue::Mapping(mapping) => mapping.len(),
        YamlValue::Tagged(tagged) => top_level_key_count(&tagged.value),
        _ => 0,
    }
}

/// Converts a YAML value into JSON.
///
/// Non-string mapping keys are stringified, tags are dropped and non-finite
/// floats become strings.
pub fn yaml_to_json(value: YamlValue) -> serde_json::Value {
    use serde_json::Value as Json;

    match value {
        YamlValue::Null => Json::Null,
        YamlValue::Bool(b) => Json::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Json::from(i)
            } else if let Some(u) = n.as_u64() {
                Json::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or_else(|| Json::String(n.to_string()), Json::Number)
            }
        }
        YamlValue::String(s) => Json::String(s),
        YamlValue::Sequence(items) => Json::Array(items.into_iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(mapping) => Json::Object(
            mapping
                .into_iter()
                .map(|(key, value)| (key_to_string(key), yaml_to_json(value)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn key_to_string(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        other => yaml_to_json(other).to_string(),
    }
}
