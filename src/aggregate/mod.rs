//! Aggregation queries over clean records.
//!
//! Every function here is pure and cheap enough to re-run on each consumer
//! query (e.g. a region dropdown change); nothing is cached or persisted.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{CleanSalesRecord, ComparisonSummary, DailyAggregate, RegionFilter, RegionalAggregate};

pub mod compare;
pub mod totals;

pub use compare::{CutoffSplit, compare_around_cutoff, compare_averages, split_around_cutoff};
pub use totals::{daily_totals, regional_totals};

/// Everything a dashboard view needs for one region selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    pub region: RegionFilter,
    pub records: usize,
    /// Scoped to `region`.
    pub daily: Vec<DailyAggregate>,
    /// Always across every region.
    pub regional: Vec<RegionalAggregate>,
    /// Computed from the scoped daily series.
    pub comparison: ComparisonSummary,
}

pub fn summarize(records: &[CleanSalesRecord], cutoff: NaiveDate, region: RegionFilter) -> SalesSummary {
    let daily = daily_totals(records, region.region());
    let comparison = compare_around_cutoff(&daily, cutoff);
    SalesSummary {
        region,
        records: records.len(),
        daily,
        regional: regional_totals(records),
        comparison,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rec(sales: rust_decimal::Decimal, day: u32, region: &str) -> CleanSalesRecord {
        CleanSalesRecord {
            sales,
            date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            region: region.to_string(),
        }
    }

    #[test]
    fn region_scope_applies_to_daily_and_comparison_only() {
        let records = vec![
            rec(dec!(10), 10, "north"),
            rec(dec!(30), 20, "north"),
            rec(dec!(99), 20, "south"),
        ];
        let cutoff = NaiveDate::from_ymd_opt(2021, 1, 15).unwrap();

        let summary = summarize(&records, cutoff, RegionFilter::North);
        assert_eq!(summary.daily.len(), 2);
        assert_eq!(summary.regional.len(), 2);
        assert_eq!(summary.comparison.comparison.percent_change(), Some(dec!(200)));

        let south = summarize(&records, cutoff, RegionFilter::South);
        assert_eq!(south.comparison.days_before, 0);
        assert_eq!(south.comparison.comparison.percent_change(), None);
    }

    #[test]
    fn summary_serializes_decimals_as_strings() {
        let records = vec![rec(dec!(10.00), 10, "north"), rec(dec!(10.00), 20, "north")];
        let cutoff = NaiveDate::from_ymd_opt(2021, 1, 15).unwrap();
        let json = serde_json::to_value(summarize(&records, cutoff, RegionFilter::All)).unwrap();

        assert_eq!(json["region"], "all");
        assert_eq!(json["daily"][0]["total_sales"], "10.00");
        assert_eq!(json["daily"][0]["date"], "2021-01-10");
        assert_eq!(json["comparison"]["comparison"]["status"], "defined");
    }
}
