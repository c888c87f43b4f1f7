//! HTML dashboard rendering.
//!
//! The page is self-contained: styles and the client-side row filter are
//! inlined. Every string that came from a scanned file or from the run
//! environment is escaped before it is embedded.

use chrono::{DateTime, Local};
use latest_stats_core::{
    FileKind, FileRecord, PreviewConfig, RunContext, ScanSummary, escape_html, format_size,
    truncate_preview,
};

/// Descriptive facts about one report generation.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    /// Name shown as the repository (usually the scan root's directory name).
    pub repository: String,
    pub generated_at: DateTime<Local>,
    /// Glob-style patterns that selected the files, for the scope notice.
    pub patterns: Vec<String>,
}

const TEXT_TABLE_ID: &str = "txt-table";
const STRUCTURED_TABLE_ID: &str = "yaml-table";

const TEXT_HEADERS: &[&str] = &["File Name", "Path", "Size", "Lines", "Modified", "Preview"];
const STRUCTURED_HEADERS: &[&str] = &[
    "File Name",
    "Path",
    "Size",
    "Type",
    "Keys Count",
    "Modified",
    "Preview",
];

const STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, 'Open Sans', 'Helvetica Neue', sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 1200px;
            margin: 0 auto;
            padding: 20px;
            background-color: #f8f9fa;
        }
        .header, .stat-card, .section-title {
            background: white;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        .header { text-align: center; margin-bottom: 30px; padding: 20px; }
        .run-info { background: #e9ecef; padding: 10px; border-radius: 4px; margin: 10px 0; font-size: 0.9em; }
        .notice { background: #fff3cd; border: 1px solid #ffeaa7; color: #856404; padding: 10px; border-radius: 4px; margin: 10px 0; }
        .stats-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; margin-bottom: 30px; }
        .stat-card { padding: 20px; text-align: center; }
        .stat-number { font-size: 2em; font-weight: bold; color: #007bff; }
        .stat-label { color: #6c757d; font-size: 0.9em; }
        .file-section { margin-bottom: 30px; }
        .section-title { padding: 15px; margin-bottom: 15px; border-left: 4px solid #007bff; }
        table { width: 100%; border-collapse: collapse; background: white; border-radius: 8px; overflow: hidden; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        th, td { padding: 12px; text-align: left; border-bottom: 1px solid #dee2e6; vertical-align: top; }
        th { background-color: #f8f9fa; font-weight: 600; }
        tr:hover { background-color: #f8f9fa; }
        .file-path { font-family: monospace; font-size: 0.9em; color: #6c757d; }
        .content-preview { max-height: 100px; overflow-y: auto; font-family: monospace; font-size: 0.8em; background: #f8f9fa; padding: 8px; border-radius: 4px; white-space: pre-wrap; word-break: break-all; cursor: pointer; }
        .content-preview.expanded { max-height: none; }
        .error { color: #dc3545; font-weight: bold; }
        .timestamp { color: #6c757d; font-size: 0.8em; }
        .search-box { margin-bottom: 20px; padding: 10px; border: 1px solid #ddd; border-radius: 4px; width: 100%; box-sizing: border-box; }
        .footer { text-align: center; margin-top: 30px; padding: 20px; color: #6c757d; font-size: 0.8em; }
"#;

// Hides body rows whose cells do not contain the filter text (case-insensitive).
const SCRIPT: &str = r#"
        function filterTable(input, tableId) {
            const filter = input.value.toUpperCase();
            const rows = document.getElementById(tableId).tBodies[0].rows;
            for (const row of rows) {
                const found = Array.from(row.cells)
                    .some(cell => cell.textContent.toUpperCase().includes(filter));
                row.style.display = found ? "" : "none";
            }
        }

        document.addEventListener('DOMContentLoaded', function () {
            document.querySelectorAll('.content-preview').forEach(function (preview) {
                preview.addEventListener('click', function () {
                    this.classList.toggle('expanded');
                });
            });
        });
"#;

/// Renders the complete HTML report.
pub fn render_html(
    summary: &ScanSummary,
    context: &RunContext,
    meta: &ReportMeta,
    preview: &PreviewConfig,
) -> String {
    let repository = escape_html(&meta.repository);
    let generated = meta.generated_at.format("%Y-%m-%d %H:%M:%S").to_string();
    let branch = escape_html(&context.branch);
    let workflow = escape_html(&context.workflow);
    let patterns = escape_html(&meta.patterns.join(", "));

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("    <meta charset=\"UTF-8\">\n");
    out.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    out.push_str(&format!(
        "    <title>Latest Files Statistics - {repository}</title>\n"
    ));
    out.push_str(&format!("    <style>{STYLE}    </style>\n"));
    out.push_str("</head>\n<body>\n");

    out.push_str("    <div class=\"header\">\n");
    out.push_str("        <h1>Latest Files Statistics</h1>\n");
    out.push_str(&format!("        <p>Repository: {repository}</p>\n"));
    out.push_str(&format!(
        "        <p class=\"timestamp\">Generated: {generated}</p>\n"
    ));
    out.push_str(&format!(
        "        <div class=\"run-info\"><strong>Run Info:</strong> Branch: {branch} | Commit: {} | Workflow: {workflow} | Run: #{} | Actor: {}</div>\n",
        escape_html(&context.commit),
        escape_html(&context.run_number),
        escape_html(&context.actor),
    ));
    out.push_str(&format!(
        "        <div class=\"notice\"><strong>Scope:</strong> only files directly in the root directory matching {patterns}</div>\n"
    ));
    out.push_str("    </div>\n\n");

    let totals = &summary.totals;
    out.push_str("    <div class=\"stats-grid\">\n");
    for (value, label) in [
        (totals.total_count.to_string(), "Total Files"),
        (totals.plain_text_count.to_string(), "TXT Files"),
        (totals.structured_data_count.to_string(), "YAML Files"),
        (format_size(totals.total_size), "Total Size"),
    ] {
        out.push_str(&format!(
            "        <div class=\"stat-card\"><div class=\"stat-number\">{value}</div><div class=\"stat-label\">{label}</div></div>\n"
        ));
    }
    out.push_str("    </div>\n\n");

    render_section(&mut out, summary, FileKind::PlainText, preview);
    render_section(&mut out, summary, FileKind::StructuredData, preview);

    out.push_str("    <div class=\"footer\">\n");
    out.push_str(&format!(
        "        <p>Branch: {branch} | Workflow: {workflow}</p>\n"
    ));
    out.push_str(&format!("        <p>Last updated: {generated}</p>\n"));
    out.push_str(&format!(
        "        <p><strong>Scope:</strong> root directory only ({patterns})</p>\n"
    ));
    out.push_str("    </div>\n\n");

    out.push_str(&format!("    <script>{SCRIPT}    </script>\n"));
    out.push_str("</body>\n</html>\n");
    out
}

fn render_section(out: &mut String, summary: &ScanSummary, kind: FileKind, preview: &PreviewConfig) {
    let records = summary.records(kind);
    let label = kind.label();
    let (table_id, headers) = match kind {
        FileKind::PlainText => (TEXT_TABLE_ID, TEXT_HEADERS),
        FileKind::StructuredData => (STRUCTURED_TABLE_ID, STRUCTURED_HEADERS),
    };

    out.push_str("    <div class=\"file-section\">\n");
    out.push_str(&format!(
        "        <h2 class=\"section-title\">{label} Files ({} files)</h2>\n",
        records.len()
    ));
    out.push_str(&format!(
        "        <input type=\"text\" class=\"search-box\" placeholder=\"Search {label} files...\" oninput=\"filterTable(this, '{table_id}')\">\n"
    ));
    out.push_str(&format!("        <table id=\"{table_id}\">\n"));
    out.push_str("            <thead>\n                <tr>");
    for header in headers {
        out.push_str(&format!("<th>{header}</th>"));
    }
    out.push_str("</tr>\n            </thead>\n            <tbody>\n");

    for record in records {
        out.push_str(&render_row(record, preview));
    }

    out.push_str("            </tbody>\n        </table>\n    </div>\n\n");
}

/// Renders one table row; columns depend on the record's kind.
pub fn render_row(record: &FileRecord, preview: &PreviewConfig) -> String {
    let mut cells = Vec::with_capacity(7);

    let mut name_cell = escape_html(&record.name);
    if let Some(error) = record.error() {
        name_cell.push_str(&format!(
            "<br><span class=\"error\">(Error: {})</span>",
            escape_html(error)
        ));
    }
    cells.push(name_cell);
    cells.push(format!(
        "<span class=\"file-path\">{}</span>",
        escape_html(&record.relative_path)
    ));
    cells.push(format_size(record.size));

    let preview_text = match record.kind() {
        FileKind::PlainText => {
            cells.push(record.line_count().to_string());
            truncate_preview(record.content(), preview.text_chars)
        }
        FileKind::StructuredData => {
            let shape = record.shape().map(|s| s.to_string()).unwrap_or_default();
            cells.push(shape);
            cells.push(record.key_count().to_string());
            let pretty = serde_json::to_string_pretty(record.data())
                .unwrap_or_else(|_| "null".to_string());
            truncate_preview(&pretty, preview.structured_chars)
        }
    };

    cells.push(record.modified_prefix());
    cells.push(format!(
        "<div class=\"content-preview\">{}</div>",
        escape_html(&preview_text)
    ));

    let mut row = String::from("                <tr>");
    for cell in cells {
        row.push_str(&format!("<td>{cell}</td>"));
    }
    row.push_str("</tr>\n");
    row
}
