//! Aggregation of file records into a run summary.

use serde::{Deserialize, Serialize};

use crate::types::{FileKind, FileRecord};

/// Running totals for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub plain_text_count: usize,
    pub structured_data_count: usize,
    pub total_count: usize,
    /// Sum of every record's `size`.
    pub total_size: u64,
}

/// Records grouped by kind, plus totals.
///
/// Each group is ordered case-insensitively by full path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSummary {
    pub plain_text: Vec<FileRecord>,
    pub structured_data: Vec<FileRecord>,
    pub totals: Totals,
}

impl ScanSummary {
    /// Folds records into groups in a single pass. No record is dropped.
    pub fn aggregate(records: impl IntoIterator<Item = FileRecord>) -> Self {
        let mut summary = Self::default();

        for record in records {
            summary.totals.total_size += record.size;
            summary.totals.total_count += 1;
            match record.kind() {
                FileKind::PlainText => {
                    summary.totals.plain_text_count += 1;
                    summary.plain_text.push(record);
                }
                FileKind::StructuredData => {
                    summary.totals.structured_data_count += 1;
                    summary.structured_data.push(record);
                }
            }
        }

        summary.plain_text.sort_by_cached_key(path_sort_key);
        summary.structured_data.sort_by_cached_key(path_sort_key);
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.totals.total_count == 0
    }

    /// Records of one kind.
    pub fn records(&self, kind: FileKind) -> &[FileRecord] {
        match kind {
            FileKind::PlainText => &self.plain_text,
            FileKind::StructuredData => &self.structured_data,
        }
    }

    /// Number of records carrying an error.
    pub fn degraded_count(&self) -> usize {
        self.plain_text
            .iter()
            .chain(&self.structured_data)
            .filter(|record| record.is_degraded())
            .count()
    }
}

/// Case-insensitive sort key over the string form of a record's path.
pub fn path_sort_key(record: &FileRecord) -> String {
    record.path.to_string_lossy().to_lowercase()
}
