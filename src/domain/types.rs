//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between pipeline stages in-memory
//! - persisted (clean records only) or printed as JSON (aggregates)
//! - rebuilt from the persisted output by a presentation layer

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product line kept by default.
pub const DEFAULT_PRODUCT: &str = "pink morsel";

/// Default source file pattern (matched against file names, not paths).
pub const DEFAULT_FILE_PATTERN: &str = "daily_sales_data_*.csv";

/// Date the Pink Morsel price change took effect.
pub fn default_cutoff_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 15).unwrap_or_default()
}

/// How strictly currency-formatted prices are coerced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PriceMode {
    /// Strip at most one leading currency symbol, then parse.
    #[default]
    Strict,
    /// Remove every currency symbol, thousands separator and inner whitespace
    /// before parsing. Unparseable values still fail.
    Permissive,
}

/// Region scope selected by a consumer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RegionFilter {
    #[default]
    All,
    North,
    East,
    South,
    West,
}

impl RegionFilter {
    /// Region code to filter on, `None` meaning every region.
    pub fn region(self) -> Option<&'static str> {
        match self {
            RegionFilter::All => None,
            RegionFilter::North => Some("north"),
            RegionFilter::East => Some("east"),
            RegionFilter::South => Some("south"),
            RegionFilter::West => Some("west"),
        }
    }

    pub fn display_name(self) -> &'static str {
        self.region().unwrap_or("all")
    }
}

/// Explicit configuration for one pipeline run.
///
/// Nothing in the library reads the environment; the binary builds this from
/// flags (with `.env` fallbacks) and hands it to each stage.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub file_pattern: String,
    /// Target product identity. `None` disables the product filter.
    pub product: Option<String>,
    pub price_mode: PriceMode,
    pub cutoff_date: NaiveDate,
    pub output_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data"),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            product: Some(DEFAULT_PRODUCT.to_string()),
            price_mode: PriceMode::Strict,
            cutoff_date: default_cutoff_date(),
            output_path: PathBuf::from("output.csv"),
        }
    }
}

/// One row as read from a source file, before any typing.
///
/// `line` is the 1-based CSV line number (the header is line 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSalesRecord {
    pub line: usize,
    pub product: String,
    pub price: String,
    pub quantity: String,
    pub date: String,
    pub region: String,
}

/// A normalized sale: the only shape that is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanSalesRecord {
    pub sales: Decimal,
    pub date: NaiveDate,
    pub region: String,
}

/// Total sales for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub total_sales: Decimal,
}

/// Total sales for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalAggregate {
    pub region: String,
    pub total_sales: Decimal,
}

/// Why a before/after comparison has no numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedComparison {
    EmptyBefore,
    EmptyAfter,
    BothEmpty,
    /// `mean_before` is zero, so a relative change has no finite value.
    ZeroBaseline,
    /// A mean or the change itself does not fit in a decimal.
    OutOfRange,
}

impl UndefinedComparison {
    pub fn describe(self) -> &'static str {
        match self {
            UndefinedComparison::EmptyBefore => "no days before cutoff",
            UndefinedComparison::EmptyAfter => "no days on or after cutoff",
            UndefinedComparison::BothEmpty => "no days on either side of cutoff",
            UndefinedComparison::ZeroBaseline => "average before cutoff is zero",
            UndefinedComparison::OutOfRange => "change is outside the decimal range",
        }
    }
}

/// Outcome of comparing mean daily sales across the cutoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Comparison {
    Defined {
        mean_before: Decimal,
        mean_after: Decimal,
        percent_change: Decimal,
    },
    /// The means that could be computed are kept; the change is not.
    Undefined {
        reason: UndefinedComparison,
        mean_before: Option<Decimal>,
        mean_after: Option<Decimal>,
    },
}

impl Comparison {
    pub fn percent_change(&self) -> Option<Decimal> {
        match self {
            Comparison::Defined { percent_change, .. } => Some(*percent_change),
            Comparison::Undefined { .. } => None,
        }
    }
}

/// Before/after comparison anchored to a cutoff date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub cutoff_date: NaiveDate,
    pub days_before: usize,
    pub days_after: usize,
    pub comparison: Comparison,
}
