//! Discovery, extraction and rendering for latest-file statistics.
//!
//! The pipeline runs strictly forward:
//!
//! 1. [`discover::discover_files`] lists matching direct children of a root.
//! 2. [`extract::extract_all`] turns each file into a
//!    [`FileRecord`](latest_stats_core::FileRecord); content failures become
//!    degraded records.
//! 3. [`ScanSummary::aggregate`] groups records by kind and totals them.
//! 4. [`write_artifacts`] renders the HTML report and the JSON snapshot.
//!
//! Whether a run should happen at all (for example, only on a given CI
//! branch) is the caller's decision; nothing here inspects the environment.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use chrono::Local;
//! use latest_stats_core::{ReportConfig, RunContext};
//! use latest_stats_discovery::{render::ReportMeta, scan, write_artifacts};
//!
//! let config = ReportConfig::default();
//! let root = Path::new(".");
//! let summary = scan(root, &config).unwrap();
//! let meta = ReportMeta {
//!     repository: "demo".to_string(),
//!     generated_at: Local::now(),
//!     patterns: config.suffixes.patterns(),
//! };
//! let artifacts =
//!     write_artifacts(&summary, &RunContext::from_env(), &meta, &config, root).unwrap();
//! println!("wrote {}", artifacts.report_path.display());
//! ```

pub mod discover;
pub mod extract;
pub mod output;
pub mod render;
pub mod snapshot;

use std::fs;
use std::path::{Path, PathBuf};

use latest_stats_core::{ReportConfig, Result, RunContext, ScanSummary};
use tracing::info;

use render::ReportMeta;

/// Paths of the artifacts written by [`write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifacts {
    pub report_path: PathBuf,
    pub snapshot_path: PathBuf,
}

/// Runs discovery, extraction and aggregation over `root`.
pub fn scan(root: &Path, config: &ReportConfig) -> Result<ScanSummary> {
    let files = discover::discover_files(root, &config.suffixes)?;
    info!(root = %root.display(), count = files.len(), "discovery finished");
    Ok(summarize(root, &files))
}

/// Extracts and aggregates already discovered files.
pub fn summarize(root: &Path, files: &[discover::DiscoveredFile]) -> ScanSummary {
    let records = extract::extract_all(root, files);
    let summary = ScanSummary::aggregate(records);
    info!(
        total = summary.totals.total_count,
        degraded = summary.degraded_count(),
        "extraction finished"
    );
    summary
}

/// Renders and writes the HTML report and JSON snapshot into `output_dir`.
///
/// Existing files are overwritten.
pub fn write_artifacts(
    summary: &ScanSummary,
    context: &RunContext,
    meta: &ReportMeta,
    config: &ReportConfig,
    output_dir: &Path,
) -> Result<ReportArtifacts> {
    fs::create_dir_all(output_dir)?;

    let report_path = output_dir.join(&config.output.report);
    let html = render::render_html(summary, context, meta, &config.preview);
    fs::write(&report_path, html)?;
    info!(path = %report_path.display(), "report written");

    let snapshot_path = output_dir.join(&config.output.snapshot);
    fs::write(&snapshot_path, snapshot::render_snapshot(summary)?)?;
    info!(path = %snapshot_path.display(), "snapshot written");

    Ok(ReportArtifacts {
        report_path,
        snapshot_path,
    })
}

/// Directory name of `root` after resolving it, used as the repository label.
pub fn repository_name(root: &Path) -> String {
    fs::canonicalize(root)
        .ok()
        .and_then(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| root.display().to_string())
}
