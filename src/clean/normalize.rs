//! Row normalization: product filter, type coercion, revenue, projection.
//!
//! Everything here is pure so it can be exercised on in-memory rows. `source`
//! is only used to label errors with the file a row came from.

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{CleanSalesRecord, PipelineConfig, PriceMode, RawSalesRecord};
use crate::error::AppError;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '£', '€', '¥'];

/// Normalization settings taken from a `PipelineConfig`.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions<'a> {
    /// Keep only rows of this product. `None` keeps every row.
    pub product: Option<&'a str>,
    pub price_mode: PriceMode,
}

impl<'a> NormalizeOptions<'a> {
    pub fn from_config(config: &'a PipelineConfig) -> Self {
        Self {
            product: config.product.as_deref(),
            price_mode: config.price_mode,
        }
    }

    /// No product filter, strict prices. Used to re-read persisted output.
    pub fn unfiltered() -> Self {
        Self {
            product: None,
            price_mode: PriceMode::Strict,
        }
    }
}

/// Normalize one file's rows, preserving their order.
///
/// Rows for other products are dropped. Any kept row whose price, quantity or
/// date cannot be coerced fails the whole call.
pub fn normalize_records(
    source: &Path,
    rows: &[RawSalesRecord],
    options: NormalizeOptions<'_>,
) -> Result<Vec<CleanSalesRecord>, AppError> {
    let mut out = Vec::with_capacity(rows.len());

    for row in rows {
        if !matches_product(&row.product, options.product) {
            continue;
        }
        out.push(normalize_row(source, row, options.price_mode)?);
    }

    tracing::debug!(
        file = %source.display(),
        rows_kept = out.len(),
        rows_dropped = rows.len() - out.len(),
        "normalized rows"
    );
    Ok(out)
}

fn normalize_row(source: &Path, row: &RawSalesRecord, price_mode: PriceMode) -> Result<CleanSalesRecord, AppError> {
    let price = parse_price(&row.price, price_mode).ok_or_else(|| AppError::InvalidPrice {
        file: source.to_path_buf(),
        line: row.line,
        value: row.price.clone(),
    })?;

    let quantity = parse_quantity(&row.quantity).ok_or_else(|| AppError::InvalidQuantity {
        file: source.to_path_buf(),
        line: row.line,
        value: row.quantity.clone(),
    })?;

    let sales = price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| AppError::MalformedRow {
            file: source.to_path_buf(),
            line: row.line,
            message: format!("price {price} × quantity {quantity} overflows"),
        })?;

    let date = parse_date(&row.date).ok_or_else(|| AppError::InvalidDate {
        file: source.to_path_buf(),
        line: row.line,
        value: row.date.clone(),
    })?;

    let region = row.region.trim();
    if region.is_empty() {
        return Err(AppError::MalformedRow {
            file: source.to_path_buf(),
            line: row.line,
            message: "empty `region` value".to_string(),
        });
    }

    Ok(CleanSalesRecord {
        sales,
        date,
        region: region.to_string(),
    })
}

fn matches_product(value: &str, target: Option<&str>) -> bool {
    let Some(target) = target else { return true };
    value.trim().eq_ignore_ascii_case(target.trim())
}

/// Coerce a currency-formatted price into a decimal.
pub fn parse_price(raw: &str, mode: PriceMode) -> Option<Decimal> {
    let raw = raw.trim();
    match mode {
        PriceMode::Strict => {
            let digits = raw.strip_prefix(CURRENCY_SYMBOLS.as_slice()).unwrap_or(raw);
            parse_decimal(digits)
        }
        PriceMode::Permissive => {
            let digits: String = raw
                .chars()
                .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',' && !c.is_whitespace())
                .collect();
            parse_decimal(&digits)
        }
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    // Decimal::from_str tolerates `_` separators; a price never carries them.
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+')) {
        return None;
    }
    Decimal::from_str(s).ok()
}

fn parse_quantity(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    const FMTS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
    let raw = raw.trim();
    FMTS.iter().find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}
