//! Before/after comparison around the price-change date.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{Comparison, ComparisonSummary, DailyAggregate, UndefinedComparison};

/// Daily series split at a cutoff date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CutoffSplit {
    /// `date < cutoff`
    pub before: Vec<DailyAggregate>,
    /// `date >= cutoff`
    pub after: Vec<DailyAggregate>,
}

/// Partition a daily series at `cutoff`. The cutoff day itself is "after".
pub fn split_around_cutoff(daily: &[DailyAggregate], cutoff: NaiveDate) -> CutoffSplit {
    let (before, after): (Vec<_>, Vec<_>) = daily.iter().cloned().partition(|d| d.date < cutoff);
    CutoffSplit { before, after }
}

/// Mean daily sales on each side and the relative change between them.
pub fn compare_averages(before: &[DailyAggregate], after: &[DailyAggregate]) -> Comparison {
    let mean_before = mean(before);
    let mean_after = mean(after);

    let (Some(b), Some(a)) = (mean_before, mean_after) else {
        let reason = match (mean_before, mean_after) {
            (None, None) => UndefinedComparison::BothEmpty,
            (None, Some(_)) => UndefinedComparison::EmptyBefore,
            _ => UndefinedComparison::EmptyAfter,
        };
        return Comparison::Undefined {
            reason,
            mean_before,
            mean_after,
        };
    };

    if b.is_zero() {
        return Comparison::Undefined {
            reason: UndefinedComparison::ZeroBaseline,
            mean_before,
            mean_after,
        };
    }

    let percent_change = a
        .checked_sub(b)
        .and_then(|diff| diff.checked_div(b))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
    match percent_change {
        Some(percent_change) => Comparison::Defined {
            mean_before: b,
            mean_after: a,
            percent_change,
        },
        None => Comparison::Undefined {
            reason: UndefinedComparison::OutOfRange,
            mean_before,
            mean_after,
        },
    }
}

/// Split a daily series at `cutoff` and compare the two sides.
pub fn compare_around_cutoff(daily: &[DailyAggregate], cutoff: NaiveDate) -> ComparisonSummary {
    let split = split_around_cutoff(daily, cutoff);
    ComparisonSummary {
        cutoff_date: cutoff,
        days_before: split.before.len(),
        days_after: split.after.len(),
        comparison: compare_averages(&split.before, &split.after),
    }
}

fn mean(days: &[DailyAggregate]) -> Option<Decimal> {
    if days.is_empty() {
        return None;
    }
    let total = days
        .iter()
        .fold(Decimal::ZERO, |acc, d| acc.saturating_add(d.total_sales));
    total.checked_div(Decimal::from(days.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;

    fn day(d: u32, total: Decimal) -> DailyAggregate {
        DailyAggregate {
            date: NaiveDate::from_ymd_opt(2021, 1, d).unwrap(),
            total_sales: total,
        }
    }

    fn cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, 15).unwrap()
    }

    #[test]
    fn cutoff_day_lands_after() {
        let daily = vec![day(14, dec!(1)), day(15, dec!(2)), day(16, dec!(3))];
        let split = split_around_cutoff(&daily, cutoff());
        assert_eq!(split.before, vec![day(14, dec!(1))]);
        assert_eq!(split.after, vec![day(15, dec!(2)), day(16, dec!(3))]);
    }

    #[test]
    fn split_is_a_partition_of_dates() {
        let daily: Vec<_> = (1..=31).map(|d| day(d, Decimal::from(d))).collect();
        let split = split_around_cutoff(&daily, cutoff());

        let before: BTreeSet<_> = split.before.iter().map(|d| d.date).collect();
        let after: BTreeSet<_> = split.after.iter().map(|d| d.date).collect();
        let all: BTreeSet<_> = daily.iter().map(|d| d.date).collect();

        assert!(before.is_disjoint(&after));
        assert_eq!(before.union(&after).cloned().collect::<BTreeSet<_>>(), all);
        assert!(split.before.iter().all(|d| d.date < cutoff()));
        assert!(split.after.iter().all(|d| d.date >= cutoff()));
    }

    #[test]
    fn split_preserves_input_order() {
        let daily = vec![day(20, dec!(1)), day(2, dec!(2)), day(16, dec!(3)), day(1, dec!(4))];
        let split = split_around_cutoff(&daily, cutoff());
        assert_eq!(split.before, vec![day(2, dec!(2)), day(1, dec!(4))]);
        assert_eq!(split.after, vec![day(20, dec!(1)), day(16, dec!(3))]);
    }

    #[test]
    fn averages_and_percent_change() {
        let before = vec![day(1, dec!(100)), day(2, dec!(200))];
        let after = vec![day(20, dec!(300))];
        match compare_averages(&before, &after) {
            Comparison::Defined {
                mean_before,
                mean_after,
                percent_change,
            } => {
                assert_eq!(mean_before, dec!(150));
                assert_eq!(mean_after, dec!(300));
                assert_eq!(percent_change, dec!(100.0));
            }
            other => panic!("expected a defined comparison, got {other:?}"),
        }
    }

    #[test]
    fn empty_before_is_explicitly_undefined() {
        let after = vec![day(20, dec!(300))];
        let cmp = compare_averages(&[], &after);
        assert_eq!(
            cmp,
            Comparison::Undefined {
                reason: UndefinedComparison::EmptyBefore,
                mean_before: None,
                mean_after: Some(dec!(300)),
            }
        );
        assert_eq!(cmp.percent_change(), None);
    }

    #[test]
    fn empty_after_and_both_empty() {
        let before = vec![day(1, dec!(5))];
        assert!(matches!(
            compare_averages(&before, &[]),
            Comparison::Undefined {
                reason: UndefinedComparison::EmptyAfter,
                ..
            }
        ));
        assert!(matches!(
            compare_averages(&[], &[]),
            Comparison::Undefined {
                reason: UndefinedComparison::BothEmpty,
                ..
            }
        ));
    }

    #[test]
    fn zero_baseline_is_undefined_not_infinite() {
        let before = vec![day(1, dec!(0))];
        let after = vec![day(20, dec!(10))];
        assert!(matches!(
            compare_averages(&before, &after),
            Comparison::Undefined {
                reason: UndefinedComparison::ZeroBaseline,
                ..
            }
        ));
    }

    #[test]
    fn change_beyond_decimal_range_is_undefined() {
        let before = vec![day(1, dec!(0.000000000000000000001))];
        let after = vec![day(20, dec!(1000000000))];
        assert_eq!(
            compare_averages(&before, &after),
            Comparison::Undefined {
                reason: UndefinedComparison::OutOfRange,
                mean_before: Some(dec!(0.000000000000000000001)),
                mean_after: Some(dec!(1000000000)),
            }
        );
    }

    #[test]
    fn summary_counts_days_on_each_side() {
        let daily = vec![day(10, dec!(10.00)), day(20, dec!(10.00))];
        let summary = compare_around_cutoff(&daily, cutoff());
        assert_eq!(summary.days_before, 1);
        assert_eq!(summary.days_after, 1);
        assert_eq!(summary.comparison.percent_change(), Some(dec!(0)));
    }
}
