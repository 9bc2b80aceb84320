//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run configuration (`PipelineConfig`, `PriceMode`, `RegionFilter`)
//! - raw and clean sales rows (`RawSalesRecord`, `CleanSalesRecord`)
//! - aggregate outputs (`DailyAggregate`, `RegionalAggregate`, `ComparisonSummary`)

pub mod types;

pub use types::*;
