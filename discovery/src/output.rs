//! Console output formats for scan summaries.

use latest_stats_core::{FileKind, FileRecord, ScanSummary, format_size};

use crate::snapshot::Snapshot;

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats a summary in the requested output format.
pub fn format_summary(summary: &ScanSummary, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&Snapshot::new(summary))
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(&Snapshot::new(summary))
            .map_err(|e| format!("YAML serialization failed: {e}")),
        OutputFormat::Markdown => Ok(summary_to_markdown(summary)),
        OutputFormat::Table => Ok(summary_to_table(summary)),
    }
}

fn record_metric(record: &FileRecord) -> String {
    match record.kind() {
        FileKind::PlainText => format!("{} lines", record.line_count()),
        FileKind::StructuredData => format!(
            "{} ({} keys)",
            record.shape().map(|s| s.to_string()).unwrap_or_default(),
            record.key_count()
        ),
    }
}

fn summary_to_markdown(summary: &ScanSummary) -> String {
    let mut out = String::new();
    let totals = &summary.totals;

    out.push_str("# Latest Files Statistics\n\n");
    out.push_str(&format!("- **Total Files:** {}\n", totals.total_count));
    out.push_str(&format!("- **TXT Files:** {}\n", totals.plain_text_count));
    out.push_str(&format!("- **YAML Files:** {}\n", totals.structured_data_count));
    out.push_str(&format!(
        "- **Total Size:** {}\n\n",
        format_size(totals.total_size)
    ));

    for kind in [FileKind::PlainText, FileKind::StructuredData] {
        let records = summary.records(kind);
        if records.is_empty() {
            continue;
        }
        out.push_str(&format!("## {} Files\n\n", kind.label()));
        out.push_str("| File | Size | Details | Modified |\n");
        out.push_str("|------|------|---------|----------|\n");
        for record in records {
            let mut details = record_metric(record);
            if let Some(error) = record.error() {
                details = format!("error: {error}");
            }
            out.push_str(&format!(
                "| `{}` | {} | {details} | {} |\n",
                record.relative_path,
                format_size(record.size),
                record.modified_prefix()
            ));
        }
        out.push('\n');
    }

    out
}

fn summary_to_table(summary: &ScanSummary) -> String {
    let mut out = String::new();
    let totals = &summary.totals;

    out.push_str(&format!(
        "Files: {}  TXT: {}  YAML: {}  Size: {}\n",
        totals.total_count,
        totals.plain_text_count,
        totals.structured_data_count,
        format_size(totals.total_size)
    ));

    let records: Vec<&FileRecord> = summary
        .plain_text
        .iter()
        .chain(&summary.structured_data)
        .collect();
    if records.is_empty() {
        return out;
    }

    let max_name = records
        .iter()
        .map(|r| r.relative_path.len())
        .max()
        .unwrap_or(4);

    out.push('\n');
    for record in records {
        let status = if record.is_degraded() { "FAIL" } else { "OK" };
        out.push_str(&format!(
            "  {:<width$}  {:<4}  {:>10}  {}",
            record.relative_path,
            status,
            format_size(record.size),
            record_metric(record),
            width = max_name
        ));
        if let Some(error) = record.error() {
            out.push_str(&format!("  [{error}]"));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::{Local, TimeZone};
    use latest_stats_core::{Extracted, FileDetails, PlainTextDetails, Shape, StructuredDetails};

    use super::*;

    fn record(name: &str, size: u64, details: FileDetails) -> FileRecord {
        let stamp = Local.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).single().unwrap();
        FileRecord {
            name: name.to_string(),
            path: PathBuf::from("/repo").join(name),
            relative_path: name.to_string(),
            extension: String::new(),
            size,
            modified: stamp,
            created: stamp,
            details,
        }
    }

    fn sample_summary() -> ScanSummary {
        ScanSummary::aggregate(vec![
            record(
                "notes_latest.txt",
                2048,
                FileDetails::PlainText(Extracted::Ok(PlainTextDetails::from_content(
                    "one\ntwo\nthree\n".to_string(),
                ))),
            ),
            record(
                "deps_latest.yaml",
                10,
                FileDetails::StructuredData(Extracted::Ok(StructuredDetails {
                    content: "a: 1\n".to_string(),
                    data: serde_json::json!({"a": 1}),
                    shape: Shape::Mapping,
                    key_count: 1,
                })),
            ),
            record(
                "broken_latest.yml",
                3,
                FileDetails::StructuredData(Extracted::Degraded {
                    error: "bad yaml".to_string(),
                }),
            ),
        ])
    }

    #[test]
    fn test_format_summary_json() {
        let json = format_summary(&sample_summary(), OutputFormat::Json).unwrap();
        assert!(json.contains("\"total_count\": 3"));
        assert!(json.contains("\"name\": \"notes_latest.txt\""));
    }

    #[test]
    fn test_format_summary_yaml() {
        let yaml = format_summary(&sample_summary(), OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("total_size: 2061"));
        assert!(yaml.contains("kind: structured_data"));
    }

    #[test]
    fn test_format_summary_markdown() {
        let md = format_summary(&sample_summary(), OutputFormat::Markdown).unwrap();
        assert!(md.contains("# Latest Files Statistics"));
        assert!(md.contains("- **Total Files:** 3"));
        assert!(md.contains("## TXT Files"));
        assert!(md.contains("| `notes_latest.txt` | 2.00 KB | 3 lines |"));
        assert!(md.contains("mapping (1 keys)"));
        assert!(md.contains("error: bad yaml"));
    }

    #[test]
    fn test_format_summary_table() {
        let table = format_summary(&sample_summary(), OutputFormat::Table).unwrap();
        assert!(table.starts_with("Files: 3  TXT: 1  YAML: 2"));
        assert!(table.contains("FAIL"));
        assert!(table.contains("[bad yaml]"));
        assert!(table.contains("OK"));
    }

    #[test]
    fn test_format_summary_table_empty() {
        let table = format_summary(&ScanSummary::default(), OutputFormat::Table).unwrap();
        assert_eq!(table, "Files: 0  TXT: 0  YAML: 0  Size: 0 B\n");
    }
}
