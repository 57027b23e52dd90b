//! Delimited-text renderings of the analysis results.

use crate::format::{NOT_AVAILABLE, fixed, optional};
use analytics::{CumulativeGrowth, ExtremeKind, PerformanceReport};
use std::io::Write;

/// Decimal places for currency values.
pub const VALUE_DECIMALS: u32 = 2;
/// Decimal places for percentages.
pub const PERCENT_DECIMALS: u32 = 4;

/// Writes the cumulative growth table, one row per date, values to 2 decimals.
///
/// Missing cells are left empty.
pub fn write_growth<W: Write>(out: W, growth: &CumulativeGrowth) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["Date".to_string()];
    header.extend(growth.columns().map(|(id, _)| format!("{}_Cumulative_Growth", id.name())));
    writer.write_record(&header)?;

    for (row, date) in growth.dates().iter().enumerate() {
        let mut record = vec![date.format("%Y-%m-%d").to_string()];
        record.extend(growth.columns().map(|(_, column)| match column[row] {
            Some(value) => fixed(value, VALUE_DECIMALS),
            None => String::new(),
        }));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes every best and worst day as a flat row.
pub fn write_extreme_days<W: Write>(out: W, report: &PerformanceReport) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["portfolio", "kind", "rank", "date", "change_pct"])?;

    for row in report.extreme_day_rows() {
        let kind = match row.kind {
            ExtremeKind::Best => "best",
            ExtremeKind::Worst => "worst",
        };
        writer.write_record([
            row.portfolio.name().to_string(),
            kind.to_string(),
            row.rank.to_string(),
            row.date.format("%Y-%m-%d").to_string(),
            fixed(row.change_pct, PERCENT_DECIMALS),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes each portfolio's drawdown once per peer. Unavailable values are `N/A`.
pub fn write_drawdowns<W: Write>(out: W, report: &PerformanceReport) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "portfolio",
        "max_drawdown_pct",
        "peak_date",
        "trough_date",
        "peer",
        "peer_change_pct",
    ])?;

    for row in report.drawdown_rows() {
        let date = |d: Option<chrono::NaiveDate>| {
            d.map_or_else(|| NOT_AVAILABLE.to_string(), |d| d.format("%Y-%m-%d").to_string())
        };
        writer.write_record([
            row.portfolio.name().to_string(),
            optional(row.max_drawdown_pct, PERCENT_DECIMALS),
            date(row.peak_date),
            date(row.trough_date),
            row.peer.map_or_else(|| NOT_AVAILABLE.to_string(), |p| p.name().to_string()),
            optional(row.peer_change_pct, PERCENT_DECIMALS),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
