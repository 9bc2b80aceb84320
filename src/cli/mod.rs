//! Command-line parsing for the sales pipeline.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline code: flags (and their `.env` fallbacks) are turned into a
//! `PipelineConfig` here and nowhere else.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_FILE_PATTERN, DEFAULT_PRODUCT, PipelineConfig, PriceMode, RegionFilter, default_cutoff_date};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sales", version, about = "Pink Morsel sales pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load every source file, normalize, merge and write the output CSV.
    Process(ProcessArgs),
    /// Re-read the output CSV and print daily/regional totals and the
    /// before/after comparison.
    Summary(SummaryArgs),
}

/// Options for `sales process`.
#[derive(Debug, Args, Clone)]
pub struct ProcessArgs {
    /// Directory holding the daily sales exports.
    #[arg(long, env = "SALES_INPUT_DIR", default_value = "data")]
    pub input_dir: PathBuf,

    /// File name pattern for source files.
    #[arg(long, env = "SALES_PATTERN", default_value = DEFAULT_FILE_PATTERN)]
    pub pattern: String,

    /// Product to keep (case-insensitive).
    #[arg(long, env = "SALES_PRODUCT", default_value = DEFAULT_PRODUCT)]
    pub product: String,

    /// Keep every product instead of filtering (overrides `--product`).
    #[arg(long)]
    pub all_products: bool,

    /// How currency strings are coerced.
    #[arg(long, value_enum, env = "SALES_PRICE_MODE", default_value_t = PriceMode::Strict)]
    pub price_mode: PriceMode,

    /// Output CSV path (overwritten).
    #[arg(short, long, env = "SALES_OUTPUT", default_value = "output.csv")]
    pub output: PathBuf,

    /// Number of merged rows to preview after writing.
    #[arg(long, default_value_t = 10)]
    pub preview: usize,
}

/// Options for `sales summary`.
#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    /// Output CSV produced by `sales process`.
    #[arg(short, long, env = "SALES_OUTPUT", default_value = "output.csv")]
    pub output: PathBuf,

    /// Price-change date (YYYY-MM-DD); this day counts as "after".
    #[arg(long, env = "SALES_CUTOFF", default_value_t = default_cutoff_date())]
    pub cutoff: NaiveDate,

    /// Scope daily totals and the comparison to one region.
    #[arg(short, long, value_enum, default_value_t = RegionFilter::All)]
    pub region: RegionFilter,

    /// Print the summary as JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

impl ProcessArgs {
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            input_dir: self.input_dir.clone(),
            file_pattern: self.pattern.clone(),
            product: (!self.all_products).then(|| self.product.clone()),
            price_mode: self.price_mode,
            output_path: self.output.clone(),
            ..PipelineConfig::default()
        }
    }
}

impl SummaryArgs {
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            cutoff_date: self.cutoff,
            output_path: self.output.clone(),
            ..PipelineConfig::default()
        }
    }
}
