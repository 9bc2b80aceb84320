//! Source discovery and CSV loading.
//!
//! This module turns a directory of daily sales exports into raw, untyped rows.
//!
//! Design goals:
//! - **Stable discovery order** (lexicographic by file name)
//! - **Strict schema** for required columns (the file and line are reported)
//! - **No typing here**: price/quantity/date coercion belongs to `clean::normalize`
//!   so non-target products never fail on values nobody uses

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use glob::Pattern;

use crate::domain::RawSalesRecord;
use crate::error::AppError;

/// Which column layout a file is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// Daily sales exports: `product, price, quantity, date, region`.
    Source,
    /// The persisted pipeline output: `sales, date, region`.
    ///
    /// Rows are lifted into raw records with `price = sales` and `quantity = 1`
    /// so they can go back through the normalizer unchanged.
    Output,
}

impl Schema {
    fn required_columns(self) -> &'static [&'static str] {
        match self {
            Schema::Source => &["product", "price", "quantity", "date", "region"],
            Schema::Output => &["sales", "date", "region"],
        }
    }
}

/// Raw rows read from one file.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub rows: Vec<RawSalesRecord>,
}

impl LoadedFile {
    pub fn rows_read(&self) -> usize {
        self.rows.len()
    }
}

/// List files in `dir` whose name matches `pattern`, sorted lexicographically.
pub fn discover_sources(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, AppError> {
    let matcher = Pattern::new(pattern)
        .map_err(|e| AppError::Config(format!("invalid file pattern '{pattern}': {e}")))?;

    let entries = std::fs::read_dir(dir).map_err(|source| AppError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| AppError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if matcher.matches(name) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(AppError::SourceNotFound {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    files.sort();
    tracing::info!(dir = %dir.display(), pattern, files = files.len(), "discovered source files");
    Ok(files)
}

/// Read every row of one CSV file.
pub fn load_file(path: &Path, schema: Schema) -> Result<LoadedFile, AppError> {
    let file = File::open(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = read_rows(file, path, schema)?;
    tracing::info!(file = %path.display(), rows_read = rows.len(), "loaded file");
    Ok(LoadedFile {
        path: path.to_path_buf(),
        rows,
    })
}

/// Parse rows from any reader. `path` is only used to label errors.
pub fn read_rows<R: std::io::Read>(reader: R, path: &Path, schema: Schema) -> Result<Vec<RawSalesRecord>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| malformed(path, 1, format!("unreadable header: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for column in schema.required_columns() {
        if !header_map.contains_key(*column) {
            return Err(malformed(path, 1, format!("header is missing required column `{column}`")));
        }
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header, which is line 1.
        let fallback_line = idx + 2;
        let record = result.map_err(|e| malformed(path, fallback_line, format!("CSV parse error: {e}")))?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        let field = |name: &str| -> Result<String, AppError> {
            get_column(&record, &header_map, name)
                .map(str::to_string)
                .ok_or_else(|| malformed(path, line, format!("missing `{name}` column")))
        };

        let row = match schema {
            Schema::Source => RawSalesRecord {
                line,
                product: field("product")?,
                price: field("price")?,
                quantity: field("quantity")?,
                date: field("date")?,
                region: field("region")?,
            },
            Schema::Output => RawSalesRecord {
                line,
                product: String::new(),
                price: field("sales")?,
                quantity: "1".to_string(),
                date: field("date")?,
                region: field("region")?,
            },
        };
        rows.push(row);
    }

    Ok(rows)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn get_column<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim)
}

fn malformed(path: &Path, line: usize, message: String) -> AppError {
    AppError::MalformedRow {
        file: path.to_path_buf(),
        line,
        message,
    }
}
