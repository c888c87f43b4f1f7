//! Core types for latest-file statistics reports.
//!
//! This crate defines the data model shared by the scanner and the renderers:
//!
//! - [`FileRecord`] — identity, filesystem facts and kind-specific
//!   [`FileDetails`] for one discovered file. Content failures are modeled as
//!   [`Extracted::Degraded`] rather than errors.
//! - [`ScanSummary`] — records grouped by [`FileKind`] with running
//!   [`Totals`].
//! - [`RunContext`] — CI labels attached to rendered reports.
//! - [`ReportConfig`] — suffixes, artifact names and preview lengths, loadable
//!   from YAML.
//!
//! # Example
//!
//! ```
//! use latest_stats_core::*;
//!
//! let summary = ScanSummary::aggregate(Vec::new());
//! assert!(summary.is_empty());
//! assert_eq!(format_size(summary.totals.total_size), "0 B");
//!
//! let context = RunContext::from_lookup(|_| None);
//! assert_eq!(context.branch, "main");
//! ```

mod config;
mod context;
mod error;
mod format;
mod summary;
mod types;

pub use config::{OutputConfig, PreviewConfig, ReportConfig, SuffixConfig};
pub use context::{
    ACTOR_VAR, BRANCH_VAR, COMMIT_VAR, DEFAULT_BRANCH, RUN_NUMBER_VAR, RunContext, UNKNOWN,
    WORKFLOW_VAR,
};
pub use error::{ReportError, Result};
pub use format::{escape_html, format_size, truncate_preview};
pub use summary::{ScanSummary, Totals, path_sort_key};
pub use types::*;
