//! Persist the merged record set.
//!
//! The output CSV is the only hand-off to the presentation layer, so its shape
//! is fixed: header `sales,date,region`, ISO dates, no index column.

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::domain::CleanSalesRecord;
use crate::error::AppError;

pub const OUTPUT_HEADER: [&str; 3] = ["sales", "date", "region"];

/// Write clean records to `path`, replacing any existing file.
///
/// Rows go to a sibling temp file first and are renamed into place, so a
/// failed write never leaves a truncated output behind.
pub fn write_sales_csv(path: &Path, records: &[CleanSalesRecord]) -> Result<(), AppError> {
    let tmp = temp_sibling(path);
    let fail = |source: std::io::Error| AppError::PersistenceFailure {
        path: path.to_path_buf(),
        source,
    };

    let result = write_rows(&tmp, records).and_then(|()| std::fs::rename(&tmp, path));
    if let Err(source) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(fail(source));
    }

    tracing::info!(path = %path.display(), rows = records.len(), "wrote output");
    Ok(())
}

fn write_rows(path: &Path, records: &[CleanSalesRecord]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(OUTPUT_HEADER)?;
    for r in records {
        writer.write_record([
            r.sales.to_string(),
            r.date.format("%Y-%m-%d").to_string(),
            r.region.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn record(sales: rust_decimal::Decimal, day: u32, region: &str) -> CleanSalesRecord {
        CleanSalesRecord {
            sales,
            date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            region: region.to_string(),
        }
    }

    #[test]
    fn writes_fixed_header_and_iso_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.csv");

        write_sales_csv(&path, &[record(dec!(10.00), 10, "north"), record(dec!(4.5), 2, "south")]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "sales,date,region\n10.00,2021-01-10,north\n4.5,2021-01-02,south\n");
        assert!(!dir.path().join("output.csv.tmp").exists());
    }

    #[test]
    fn overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.csv");
        std::fs::write(&path, "stale contents that are much longer than the new file\n").unwrap();

        write_sales_csv(&path, &[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "sales,date,region\n");
    }

    #[test]
    fn unwritable_target_is_persistence_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("output.csv");

        let err = write_sales_csv(&path, &[record(dec!(1), 1, "east")]).unwrap_err();
        match err {
            AppError::PersistenceFailure { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
