//! Machine-readable JSON snapshot of a [`ScanSummary`].
//!
//! Degraded records serialize their zero/empty defaults explicitly plus an
//! `error` field. Timestamps are written as RFC 3339 strings.

use chrono::SecondsFormat;
use latest_stats_core::{Extracted, FileDetails, FileRecord, ScanSummary, Shape};
use serde::Serialize;

/// Serializable view over a summary.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub plain_text_files: Vec<SnapshotRecord<'a>>,
    pub structured_data_files: Vec<SnapshotRecord<'a>>,
    pub total_size: u64,
    pub stats: SnapshotStats,
}

#[derive(Debug, Serialize)]
pub struct SnapshotStats {
    pub plain_text_count: usize,
    pub structured_data_count: usize,
    pub total_count: usize,
}

/// One record, flattened with its kind-specific fields.
#[derive(Debug, Serialize)]
pub struct SnapshotRecord<'a> {
    pub name: &'a str,
    pub path: String,
    pub relative_path: &'a str,
    pub extension: &'a str,
    pub size: u64,
    pub modified: String,
    pub created: String,
    #[serde(flatten)]
    pub details: SnapshotDetails<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotDetails<'a> {
    PlainText {
        content: &'a str,
        line_count: usize,
        lines: &'a [String],
    },
    StructuredData {
        content: &'a str,
        data: &'a serde_json::Value,
        keys_count: usize,
        #[serde(rename = "type")]
        shape: Shape,
    },
}

impl<'a> Snapshot<'a> {
    pub fn new(summary: &'a ScanSummary) -> Self {
        Self {
            plain_text_files: summary.plain_text.iter().map(SnapshotRecord::new).collect(),
            structured_data_files: summary
                .structured_data
                .iter()
                .map(SnapshotRecord::new)
                .collect(),
            total_size: summary.totals.total_size,
            stats: SnapshotStats {
                plain_text_count: summary.totals.plain_text_count,
                structured_data_count: summary.totals.structured_data_count,
                total_count: summary.totals.total_count,
            },
        }
    }
}

impl<'a> SnapshotRecord<'a> {
    pub fn new(record: &'a FileRecord) -> Self {
        let details = match &record.details {
            FileDetails::PlainText(Extracted::Ok(text)) => SnapshotDetails::PlainText {
                content: &text.content,
                line_count: text.line_count(),
                lines: &text.lines,
            },
            FileDetails::PlainText(Extracted::Degraded { .. }) => SnapshotDetails::PlainText {
                content: "",
                line_count: 0,
                lines: &[],
            },
            FileDetails::StructuredData(Extracted::Ok(data)) => SnapshotDetails::StructuredData {
                content: &data.content,
                data: &data.data,
                keys_count: data.key_count,
                shape: data.shape,
            },
            FileDetails::StructuredData(Extracted::Degraded { .. }) => {
                SnapshotDetails::StructuredData {
                    content: "",
                    data: record.data(),
                    keys_count: 0,
                    shape: Shape::Error,
                }
            }
        };

        Self {
            name: &record.name,
            path: record.path.display().to_string(),
            relative_path: &record.relative_path,
            extension: &record.extension,
            size: record.size,
            modified: record.modified.to_rfc3339_opts(SecondsFormat::Micros, false),
            created: record.created.to_rfc3339_opts(SecondsFormat::Micros, false),
            details,
            error: record.error(),
        }
    }
}

/// Renders the snapshot as pretty-printed JSON with a trailing newline.
pub fn render_snapshot(summary: &ScanSummary) -> serde_json::Result<String> {
    let mut raw = serde_json::to_string_pretty(&Snapshot::new(summary))?;
    raw.push('\n');
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::{Local, TimeZone};
    use latest_stats_core::{PlainTextDetails, StructuredDetails};
    use serde_json::{Value, json};

    use super::*;

    fn record(name: &str, size: u64, details: FileDetails) -> FileRecord {
        let stamp = Local.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).single().unwrap();
        FileRecord {
            name: name.to_string(),
            path: PathBuf::from("/repo").join(name),
            relative_path: name.to_string(),
            extension: ".txt".to_string(),
            size,
            modified: stamp,
            created: stamp,
            details,
        }
    }

    fn sample_summary() -> ScanSummary {
        ScanSummary::aggregate(vec![
            record(
                "a_latest.txt",
                6,
                FileDetails::PlainText(Extracted::Ok(PlainTextDetails::from_content(
                    "a\n\nb \n".to_string(),
                ))),
            ),
            record(
                "b_latest.yaml",
                9,
                FileDetails::StructuredData(Extracted::Ok(StructuredDetails {
                    content: "x: 1\ny: 2\n".to_string(),
                    data: json!({"x": 1, "y": 2}),
                    shape: Shape::Mapping,
                    key_count: 2,
                })),
            ),
            record(
                "c_latest.yml",
                4,
                FileDetails::StructuredData(Extracted::Degraded {
                    error: "did not find expected key".to_string(),
                }),
            ),
        ])
    }

    #[test]
    fn test_snapshot_layout() {
        let summary = sample_summary();
        let raw = render_snapshot(&summary).unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(parsed["total_size"], 19);
        assert_eq!(parsed["stats"]["total_count"], 3);
        assert_eq!(parsed["stats"]["plain_text_count"], 1);
        assert_eq!(parsed["stats"]["structured_data_count"], 2);

        let text = &parsed["plain_text_files"][0];
        assert_eq!(text["kind"], "plain_text");
        assert_eq!(text["line_count"], 2);
        assert_eq!(text["lines"], json!(["a", "b"]));
        assert_eq!(text["content"], "a\n\nb \n");
        assert!(text.get("error").is_none());
        assert!(text["modified"].as_str().unwrap().starts_with("2024-01-15T10:30:00.000000"));

        let yaml = &parsed["structured_data_files"][0];
        assert_eq!(yaml["kind"], "structured_data");
        assert_eq!(yaml["type"], "mapping");
        assert_eq!(yaml["keys_count"], 2);
        assert_eq!(yaml["data"], json!({"x": 1, "y": 2}));
    }

    #[test]
    fn test_snapshot_degraded_record_defaults() {
        let summary = sample_summary();
        let snapshot: Value =
            serde_json::from_str(&render_snapshot(&summary).unwrap()).unwrap();

        let degraded = &snapshot["structured_data_files"][1];
        assert_eq!(degraded["name"], "c_latest.yml");
        assert_eq!(degraded["type"], "error");
        assert_eq!(degraded["keys_count"], 0);
        assert!(degraded["data"].is_null());
        assert_eq!(degraded["content"], "");
        assert_eq!(degraded["size"], 4);
        assert_eq!(degraded["error"], "did not find expected key");
    }

    #[test]
    fn test_snapshot_is_deterministic() {
        let summary = sample_summary();
        assert_eq!(
            render_snapshot(&summary).unwrap(),
            render_snapshot(&summary).unwrap()
        );
    }
}
