//! Extreme-day and drawdown analysis over cumulative value curves.
//!
//! Both analyses work on the value a portfolio actually had, not on its
//! nominal return formula. For the leveraged spread portfolios the two differ.

use crate::growth::CumulativeGrowth;
use crate::report::{
    DailyChange, Drawdown, DrawdownRecord, ExtremeDayRecord, ExtremeDays, PeerPerformance,
    PerformanceReport,
};
use chrono::NaiveDate;
use core_types::PortfolioId;
use rust_decimal::Decimal;

/// Day-over-day percentage changes of a value curve.
///
/// The first day is measured against `initial`. Days where either side is
/// missing, or the previous value is zero, have no finite change and are left
/// out.
pub fn daily_value_changes(
    dates: &[NaiveDate],
    values: &[Option<Decimal>],
    initial: Decimal,
) -> Vec<DailyChange> {
    let mut previous = Some(initial);
    dates
        .iter()
        .zip(values)
        .filter_map(|(date, value)| {
            let prior = std::mem::replace(&mut previous, *value);
            let change_pct = percent_change(prior?, (*value)?)?;
            Some(DailyChange {
                date: *date,
                change_pct,
            })
        })
        .collect()
}

/// `(to / from - 1) * 100`, or `None` when `from` is zero.
fn percent_change(from: Decimal, to: Decimal) -> Option<Decimal> {
    to.checked_div(from)?
        .checked_sub(Decimal::ONE)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Picks the `count` largest and `count` smallest changes.
///
/// Equal changes keep their chronological order. Returns `None` when there is
/// nothing to pick from.
pub fn extreme_days(changes: &[DailyChange], count: usize) -> Option<ExtremeDays> {
    if changes.is_empty() {
        return None;
    }

    let mut best = changes.to_vec();
    best.sort_by(|a, b| b.change_pct.cmp(&a.change_pct));
    best.truncate(count);

    let mut worst = changes.to_vec();
    worst.sort_by(|a, b| a.change_pct.cmp(&b.change_pct));
    worst.truncate(count);

    Some(ExtremeDays { best, worst })
}

/// Running maximum of the available values. Missing cells stay missing and do
/// not reset the peak.
pub fn running_peaks(values: &[Option<Decimal>]) -> Vec<Option<Decimal>> {
    let mut peak: Option<Decimal> = None;
    values
        .iter()
        .map(|value| {
            let value = (*value)?;
            let current = peak.map_or(value, |p| p.max(value));
            peak = Some(current);
            Some(current)
        })
        .collect()
}

/// `value / peak - 1` per day; zero when the peak itself is zero.
pub fn drawdown_ratios(values: &[Option<Decimal>], peaks: &[Option<Decimal>]) -> Vec<Option<Decimal>> {
    values
        .iter()
        .zip(peaks)
        .map(|(value, peak)| {
            let (value, peak) = ((*value)?, (*peak)?);
            if peak.is_zero() {
                return Some(Decimal::ZERO);
            }
            value.checked_div(peak)?.checked_sub(Decimal::ONE)
        })
        .collect()
}

/// Finds the deepest drawdown of a value curve.
///
/// The trough is the first day with the most negative drawdown ratio. The
/// peak is the earliest day, at or before the trough, whose value equals the
/// running maximum in force at the trough.
pub fn max_drawdown(dates: &[NaiveDate], values: &[Option<Decimal>]) -> Option<Drawdown> {
    let peaks = running_peaks(values);
    let ratios = drawdown_ratios(values, &peaks);

    let (trough, ratio) = ratios
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.map(|r| (i, r)))
        .fold(None, |deepest: Option<(usize, Decimal)>, (i, r)| match deepest {
            Some((_, min)) if min <= r => deepest,
            _ => Some((i, r)),
        })?;

    let peak_value = peaks[trough]?;
    let peak = values[..=trough]
        .iter()
        .position(|v| *v == Some(peak_value))?;

    Some(Drawdown {
        max_drawdown_pct: ratio.checked_mul(Decimal::ONE_HUNDRED)?,
        peak_date: dates[peak],
        trough_date: dates[trough],
    })
}

/// Percentage change of a portfolio's value between two dates of the index.
///
/// `None` when either date has no value or the starting value is zero.
pub fn change_between(
    growth: &CumulativeGrowth,
    id: PortfolioId,
    from: NaiveDate,
    to: NaiveDate,
) -> Option<Decimal> {
    let start = (*growth.get(id, from)?)?;
    let end = (*growth.get(id, to)?)?;
    if start.is_zero() {
        return None;
    }
    percent_change(start, end)
}

/// Runs both analyses for every portfolio, in reporting order.
pub fn analyze_performance(
    growth: &CumulativeGrowth,
    initial_investment: Decimal,
    extreme_day_count: usize,
) -> PerformanceReport {
    let dates = growth.dates();
    let mut report = PerformanceReport::default();

    for (id, values) in growth.columns() {
        let changes = daily_value_changes(dates, values, initial_investment);
        let days = extreme_days(&changes, extreme_day_count);
        if days.is_none() {
            tracing::warn!(portfolio = %id, "No finite daily changes; extreme days not available.");
        }
        report.extreme_days.push(ExtremeDayRecord { portfolio: id, days });

        let drawdown = max_drawdown(dates, values);
        let peers = match drawdown {
            Some(dd) => {
                tracing::debug!(
                    portfolio = %id,
                    max_drawdown_pct = %dd.max_drawdown_pct.round_dp(2),
                    peak = %dd.peak_date,
                    trough = %dd.trough_date,
                    "Maximum drawdown located."
                );
                PortfolioId::ALL
                    .into_iter()
                    .filter(|peer| *peer != id)
                    .map(|peer| PeerPerformance {
                        peer,
                        change_pct: change_between(growth, peer, dd.peak_date, dd.trough_date),
                    })
                    .collect()
            }
            None => {
                tracing::warn!(portfolio = %id, "No usable values; maximum drawdown not available.");
                Vec::new()
            }
        };
        report.drawdowns.push(DrawdownRecord {
            portfolio: id,
            drawdown,
            peers,
        });
    }

    report
}
