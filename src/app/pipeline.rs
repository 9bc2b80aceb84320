//! Shared pipeline logic used by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! discover -> load -> normalize -> merge -> persist
//!
//! The CLI then only has to decide what to print.

use std::path::Path;

use rayon::prelude::*;
use rust_decimal::Decimal;

use crate::clean::{MergedRecords, NormalizeOptions, NormalizedFile, ensure_summable, merge, normalize_records};
use crate::domain::{CleanSalesRecord, PipelineConfig};
use crate::error::AppError;
use crate::io::{Schema, discover_sources, load_file, write_sales_csv};

/// Load, normalize and merge every source file without writing anything.
pub fn process_sources(config: &PipelineConfig) -> Result<MergedRecords, AppError> {
    let files = discover_sources(&config.input_dir, &config.file_pattern)?;
    let options = NormalizeOptions::from_config(config);

    // Files are independent; results are collected per file so the first
    // failure in path order is the one reported.
    let results: Vec<Result<NormalizedFile, AppError>> = files
        .par_iter()
        .map(|path| process_file(path, options))
        .collect();

    let normalized = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    let merged = merge(normalized)?;

    if merged.records.is_empty() {
        tracing::warn!(
            files = merged.report.files.len(),
            rows_read = merged.report.rows_read(),
            "no rows matched the product filter"
        );
    }
    Ok(merged)
}

/// Run the whole pipeline and persist the merged records.
///
/// The output is only written once every file has been processed, so an
/// ingestion error never leaves a partial output behind.
pub fn run_pipeline(config: &PipelineConfig) -> Result<MergedRecords, AppError> {
    let merged = process_sources(config)?;
    write_sales_csv(&config.output_path, &merged.records)?;
    Ok(merged)
}

/// Re-read a persisted output file through the loader and normalizer.
pub fn load_clean_records(path: &Path) -> Result<Vec<CleanSalesRecord>, AppError> {
    let loaded = load_file(path, Schema::Output)?;
    let records = normalize_records(&loaded.path, &loaded.rows, NormalizeOptions::unfiltered())?;
    ensure_summable(&loaded.path, &records, Decimal::ZERO)?;
    Ok(records)
}

fn process_file(path: &Path, options: NormalizeOptions<'_>) -> Result<NormalizedFile, AppError> {
    let loaded = load_file(path, Schema::Source)?;
    let records = normalize_records(&loaded.path, &loaded.rows, options)?;
    Ok(NormalizedFile {
        rows_read: loaded.rows_read(),
        path: loaded.path,
        records,
    })
}
