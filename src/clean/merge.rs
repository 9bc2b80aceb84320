//! Concatenate per-file results into one record set.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;

use crate::domain::CleanSalesRecord;
use crate::error::AppError;

/// Normalized output of one source file.
#[derive(Debug, Clone)]
pub struct NormalizedFile {
    pub path: PathBuf,
    pub rows_read: usize,
    pub records: Vec<CleanSalesRecord>,
}

/// Per-file row counts for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub path: PathBuf,
    pub rows_read: usize,
    pub rows_kept: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub files: Vec<FileSummary>,
}

impl IngestReport {
    pub fn rows_read(&self) -> usize {
        self.files.iter().map(|f| f.rows_read).sum()
    }

    pub fn rows_kept(&self) -> usize {
        self.files.iter().map(|f| f.rows_kept).sum()
    }
}

/// Merged records plus the report of where they came from.
#[derive(Debug, Clone)]
pub struct MergedRecords {
    pub records: Vec<CleanSalesRecord>,
    pub report: IngestReport,
}

/// Concatenate files in path order. Records within a file keep their order;
/// nothing is deduplicated.
///
/// Sorting by path (stable) makes the result independent of the order in which
/// files finished processing. Fails with `SalesOverflow` naming the first file
/// whose rows push the total beyond what `ensure_summable` allows.
pub fn merge(mut files: Vec<NormalizedFile>) -> Result<MergedRecords, AppError> {
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let total = files.iter().map(|f| f.records.len()).sum();
    let mut records = Vec::with_capacity(total);
    let mut report = IngestReport::default();
    let mut abs_total = Decimal::ZERO;

    for file in files {
        abs_total = ensure_summable(&file.path, &file.records, abs_total)?;
        report.files.push(FileSummary {
            path: file.path,
            rows_read: file.rows_read,
            rows_kept: file.records.len(),
        });
        records.extend(file.records);
    }

    Ok(MergedRecords { records, report })
}

/// Add `|sales|` of every record to `running` without overflowing.
///
/// Any grouped sum over the set is bounded by this total, so a record set that
/// passes can be aggregated in any order or grouping.
pub fn ensure_summable(file: &Path, records: &[CleanSalesRecord], running: Decimal) -> Result<Decimal, AppError> {
    records
        .iter()
        .try_fold(running, |acc, r| acc.checked_add(r.sales.abs()))
        .ok_or_else(|| AppError::SalesOverflow {
            file: file.to_path_buf(),
        })
}
