//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the pipeline and aggregation code stays free of printing
//! - output changes are localized

use std::path::Path;

use rust_decimal::Decimal;

use crate::aggregate::SalesSummary;
use crate::clean::IngestReport;
use crate::domain::{CleanSalesRecord, Comparison, ComparisonSummary, DailyAggregate, RegionalAggregate};

/// Files found, per-file row counts and totals for one run.
pub fn format_ingest_report(report: &IngestReport, output: Option<&Path>) -> String {
    let mut out = String::new();

    out.push_str("=== sales - ingest ===\n");
    out.push_str(&format!("Files: {}\n\n", report.files.len()));

    out.push_str(&format!("{:<40} {:>10} {:>10}", "file", "rows_read", "rows_kept"));
    out.push('\n');
    out.push_str(&format!("{:-<40} {:-<10} {:-<10}", "", "", ""));
    out.push('\n');
    for f in &report.files {
        let name = f
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| f.path.display().to_string());
        out.push_str(&format!("{:<40} {:>10} {:>10}", truncate(&name, 40), f.rows_read, f.rows_kept));
        out.push('\n');
    }

    out.push_str(&format!(
        "\nTotal: read={} kept={}\n",
        report.rows_read(),
        report.rows_kept()
    ));
    if let Some(path) = output {
        out.push_str(&format!("Saved to {}\n", path.display()));
    }

    out
}

/// The first `n` merged rows.
pub fn format_preview(records: &[CleanSalesRecord], n: usize) -> String {
    let mut out = String::new();
    let shown = n.min(records.len());
    out.push_str(&format!("First {shown} of {} rows:\n", records.len()));
    out.push_str(&format!("{:>12} {:<10} {:<8}", "sales", "date", "region").trim_end().to_string());
    out.push('\n');
    for r in records.iter().take(n) {
        out.push_str(&format!("{:>12} {:<10} {:<8}", r.sales, r.date, r.region).trim_end().to_string());
        out.push('\n');
    }
    out
}

pub fn format_daily_totals(daily: &[DailyAggregate]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<10} {:>14}", "date", "total_sales"));
    out.push('\n');
    out.push_str(&format!("{:-<10} {:-<14}", "", ""));
    out.push('\n');
    for d in daily {
        out.push_str(&format!("{:<10} {:>14}", d.date, fmt_money(d.total_sales)));
        out.push('\n');
    }
    out
}

pub fn format_regional_totals(regional: &[RegionalAggregate]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<10} {:>14}", "region", "total_sales"));
    out.push('\n');
    out.push_str(&format!("{:-<10} {:-<14}", "", ""));
    out.push('\n');
    for r in regional {
        out.push_str(&format!("{:<10} {:>14}", truncate(&r.region, 10), fmt_money(r.total_sales)));
        out.push('\n');
    }
    out
}

pub fn format_comparison(summary: &ComparisonSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Cutoff: {} (days before={}, on/after={})\n",
        summary.cutoff_date, summary.days_before, summary.days_after
    ));

    match &summary.comparison {
        Comparison::Defined {
            mean_before,
            mean_after,
            percent_change,
        } => {
            out.push_str(&format!("Mean daily sales before: {}\n", fmt_money(*mean_before)));
            out.push_str(&format!("Mean daily sales after : {}\n", fmt_money(*mean_after)));
            out.push_str(&format!("Change: {:+}%\n", percent_change.round_dp(2)));
        }
        Comparison::Undefined {
            reason,
            mean_before,
            mean_after,
        } => {
            out.push_str(&format!("Mean daily sales before: {}\n", fmt_opt_money(*mean_before)));
            out.push_str(&format!("Mean daily sales after : {}\n", fmt_opt_money(*mean_after)));
            out.push_str(&format!("Change: undefined ({})\n", reason.describe()));
        }
    }
    out
}

/// Full summary view for one region selection.
pub fn format_summary(summary: &SalesSummary) -> String {
    let mut out = String::new();

    out.push_str("=== sales - summary ===\n");
    out.push_str(&format!(
        "Records: {} | region: {} | days: {}\n\n",
        summary.records,
        summary.region.display_name(),
        summary.daily.len()
    ));

    out.push_str("Daily totals:\n");
    out.push_str(&format_daily_totals(&summary.daily));
    out.push('\n');

    out.push_str("Regional totals:\n");
    out.push_str(&format_regional_totals(&summary.regional));
    out.push('\n');

    out.push_str(&format_comparison(&summary.comparison));
    out
}

fn fmt_money(v: Decimal) -> String {
    format!("{:.2}", v.round_dp(2))
}

fn fmt_opt_money(v: Option<Decimal>) -> String {
    v.map(fmt_money).unwrap_or_else(|| "n/a".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
