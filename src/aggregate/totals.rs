//! Grouped sales totals.
//!
//! Grouping goes through `BTreeMap` and exact decimal sums, so the results do
//! not depend on the order records arrive in. Record sets produced by the
//! pipeline have passed `clean::ensure_summable`, so no total can leave the
//! decimal range; sums saturate instead of panicking if a caller skips that.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{CleanSalesRecord, DailyAggregate, RegionalAggregate};

/// Total sales per date, ascending. `region` keeps only that region's rows.
pub fn daily_totals(records: &[CleanSalesRecord], region: Option<&str>) -> Vec<DailyAggregate> {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for r in records {
        if region.is_some_and(|wanted| r.region != wanted) {
            continue;
        }
        let total = by_date.entry(r.date).or_default();
        *total = total.saturating_add(r.sales);
    }

    by_date
        .into_iter()
        .map(|(date, total_sales)| DailyAggregate { date, total_sales })
        .collect()
}

/// Total sales per region, ordered by region name.
pub fn regional_totals(records: &[CleanSalesRecord]) -> Vec<RegionalAggregate> {
    let mut by_region: BTreeMap<&str, Decimal> = BTreeMap::new();
    for r in records {
        let total = by_region.entry(r.region.as_str()).or_default();
        *total = total.saturating_add(r.sales);
    }

    by_region
        .into_iter()
        .map(|(region, total_sales)| RegionalAggregate {
            region: region.to_string(),
            total_sales,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rust_decimal_macros::dec;

    fn rec(sales: Decimal, day: u32, region: &str) -> CleanSalesRecord {
        CleanSalesRecord {
            sales,
            date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            region: region.to_string(),
        }
    }

    fn sample() -> Vec<CleanSalesRecord> {
        vec![
            rec(dec!(10.00), 20, "north"),
            rec(dec!(1.25), 3, "south"),
            rec(dec!(2.75), 3, "north"),
            rec(dec!(0.10), 20, "west"),
            rec(dec!(7), 11, "east"),
            rec(dec!(0.20), 20, "north"),
        ]
    }

    #[test]
    fn daily_totals_merge_same_dates_ascending() {
        let daily = daily_totals(&sample(), None);
        let got: Vec<_> = daily.iter().map(|d| (d.date.format("%d").to_string(), d.total_sales)).collect();
        assert_eq!(
            got,
            vec![
                ("03".to_string(), dec!(4.00)),
                ("11".to_string(), dec!(7)),
                ("20".to_string(), dec!(10.30)),
            ]
        );
    }

    #[test]
    fn daily_totals_scoped_to_region() {
        let daily = daily_totals(&sample(), Some("north"));
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].total_sales, dec!(2.75));
        assert_eq!(daily[1].total_sales, dec!(10.20));

        assert!(daily_totals(&sample(), Some("nowhere")).is_empty());
    }

    #[test]
    fn daily_totals_ignore_record_order() {
        let expected = daily_totals(&sample(), None);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut shuffled = sample();
            shuffled.shuffle(&mut rng);
            assert_eq!(daily_totals(&shuffled, None), expected);
        }
    }

    #[test]
    fn regional_totals_sorted_by_region() {
        let regional = regional_totals(&sample());
        let got: Vec<_> = regional.iter().map(|r| (r.region.as_str(), r.total_sales)).collect();
        assert_eq!(
            got,
            vec![
                ("east", dec!(7)),
                ("north", dec!(12.95)),
                ("south", dec!(1.25)),
                ("west", dec!(0.10)),
            ]
        );
    }

    #[test]
    fn totals_saturate_instead_of_panicking() {
        let records = vec![rec(Decimal::MAX, 3, "north"), rec(Decimal::MAX, 3, "north")];
        assert_eq!(daily_totals(&records, None)[0].total_sales, Decimal::MAX);
        assert_eq!(regional_totals(&records)[0].total_sales, Decimal::MAX);
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(daily_totals(&[], None).is_empty());
        assert!(regional_totals(&[]).is_empty());
    }
}
