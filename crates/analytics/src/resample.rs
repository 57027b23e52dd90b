use crate::growth::CumulativeGrowth;
use crate::portfolio::PortfolioTable;
use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;

/// The Sunday that closes the calendar week containing `date`.
pub fn week_ending(date: NaiveDate) -> NaiveDate {
    let offset = 6 - u64::from(date.weekday().num_days_from_monday());
    date.checked_add_days(Days::new(offset)).unwrap_or(date)
}

/// Resamples a value table to one row per calendar week (weeks end on Sunday).
///
/// Each week holds the last available value of that week. A week without an
/// available value repeats the previous week's value, so every week between
/// the first and the last observation is present.
pub fn resample_weekly(growth: &CumulativeGrowth) -> CumulativeGrowth {
    let dates = growth.dates();
    let (Some(first), Some(last)) = (dates.first(), dates.last()) else {
        return PortfolioTable::new(Vec::new(), Default::default());
    };

    let mut week_dates = Vec::new();
    let mut columns: [Vec<Option<Decimal>>; 5] = Default::default();
    let mut carried: [Option<Decimal>; 5] = [None; 5];
    let mut row = 0;

    let mut week = week_ending(*first);
    let last_week = week_ending(*last);
    while week <= last_week {
        while row < dates.len() && dates[row] <= week {
            for (id, column) in growth.columns() {
                if let Some(value) = column[row] {
                    carried[id.index()] = Some(value);
                }
            }
            row += 1;
        }

        week_dates.push(week);
        for (column, value) in columns.iter_mut().zip(carried) {
            column.push(value);
        }

        match week.checked_add_days(Days::new(7)) {
            Some(next) => week = next,
            None => break,
        }
    }

    PortfolioTable::new(week_dates, columns)
}
