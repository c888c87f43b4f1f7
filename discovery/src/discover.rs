//! Directory discovery for report inputs.

use std::fs;
use std::path::{Path, PathBuf};

use latest_stats_core::{FileKind, ReportError, Result, SuffixConfig};
use tracing::debug;

/// A file selected for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub kind: FileKind,
}

/// Lists direct children of `root` whose names end with a configured suffix.
///
/// Subdirectories are not entered and directories with matching names are
/// ignored. The result is ordered case-insensitively by path; an empty result
/// is not an error.
pub fn discover_files(root: &Path, suffixes: &SuffixConfig) -> Result<Vec<DiscoveredFile>> {
    if !root.is_dir() {
        return Err(ReportError::InvalidInput(format!(
            "Scan root '{}' is not a directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();

        let name = entry.file_name();
        let Some(kind) = suffixes.classify(&name.to_string_lossy()) else {
            continue;
        };
        if !path.is_file() {
            debug!(path = %path.display(), "skipping matching entry that is not a file");
            continue;
        }

        debug!(path = %path.display(), %kind, "discovered");
        files.push(DiscoveredFile { path, kind });
    }

    files.sort_by_cached_key(|file| file.path.to_string_lossy().to_lowercase());
    Ok(files)
}
