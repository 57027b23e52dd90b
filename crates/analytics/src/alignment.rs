use crate::error::AnalyticsError;
use crate::report::DateRange;
use chrono::NaiveDate;
use core_types::ReturnSeries;
use rust_decimal::Decimal;

/// Per-asset daily returns restricted to dates observed for all three assets.
///
/// Dates are strictly increasing and every column has one entry per date.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedReturns {
    dates: Vec<NaiveDate>,
    qqq: Vec<Decimal>,
    spy: Vec<Decimal>,
    iwm: Vec<Decimal>,
}

impl AlignedReturns {
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn qqq(&self) -> &[Decimal] {
        &self.qqq
    }

    pub fn spy(&self) -> &[Decimal] {
        &self.spy
    }

    pub fn iwm(&self) -> &[Decimal] {
        &self.iwm
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn date_range(&self) -> Option<DateRange> {
        DateRange::of(&self.dates)
    }

    /// Returns the rows dated on or after `start_date`.
    ///
    /// Fails with [`AnalyticsError::NoDataAfterStart`] when nothing is left.
    pub fn since(&self, start_date: NaiveDate) -> Result<AlignedReturns, AnalyticsError> {
        let from = self.dates.partition_point(|d| *d < start_date);
        if from == self.dates.len() {
            return Err(AnalyticsError::NoDataAfterStart { start_date });
        }

        Ok(AlignedReturns {
            dates: self.dates[from..].to_vec(),
            qqq: self.qqq[from..].to_vec(),
            spy: self.spy[from..].to_vec(),
            iwm: self.iwm[from..].to_vec(),
        })
    }
}

/// Inner-joins the three asset series on date.
///
/// Each input is already sorted with unique dates, so a single forward merge
/// keeps the output sorted: whenever the three cursors disagree, every cursor
/// behind the furthest date advances.
pub fn align_returns(
    qqq: &ReturnSeries,
    spy: &ReturnSeries,
    iwm: &ReturnSeries,
) -> Result<AlignedReturns, AnalyticsError> {
    let (a, b, c) = (qqq.points(), spy.points(), iwm.points());
    let capacity = a.len().min(b.len()).min(c.len());
    let mut aligned = AlignedReturns {
        dates: Vec::with_capacity(capacity),
        qqq: Vec::with_capacity(capacity),
        spy: Vec::with_capacity(capacity),
        iwm: Vec::with_capacity(capacity),
    };

    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < a.len() && j < b.len() && k < c.len() {
        let (da, db, dc) = (a[i].date, b[j].date, c[k].date);

        if da == db && db == dc {
            aligned.dates.push(da);
            aligned.qqq.push(a[i].value);
            aligned.spy.push(b[j].value);
            aligned.iwm.push(c[k].value);
            i += 1;
            j += 1;
            k += 1;
            continue;
        }

        let furthest = da.max(db).max(dc);
        if da < furthest {
            i += 1;
        }
        if db < furthest {
            j += 1;
        }
        if dc < furthest {
            k += 1;
        }
    }

    if aligned.is_empty() {
        return Err(AnalyticsError::NoCommonDates);
    }

    Ok(aligned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{AssetId, ReturnPoint};
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 6, d).unwrap()
    }

    fn series(asset: AssetId, days: &[u32]) -> ReturnSeries {
        let points = days
            .iter()
            .map(|d| ReturnPoint::new(day(*d), Decimal::from(*d) / dec!(1000)))
            .collect();
        ReturnSeries::new(asset, points).unwrap()
    }

    #[test]
    fn keeps_only_dates_present_in_all_three() {
        let qqq = series(AssetId::Qqq, &[1, 2, 3, 4, 7, 8]);
        let spy = series(AssetId::Spy, &[2, 3, 4, 5, 8]);
        let iwm = series(AssetId::Iwm, &[1, 3, 4, 6, 8, 9]);

        let aligned = align_returns(&qqq, &spy, &iwm).unwrap();

        assert_eq!(aligned.dates(), &[day(3), day(4), day(8)]);
        assert_eq!(aligned.qqq(), &[dec!(0.003), dec!(0.004), dec!(0.008)]);
        assert_eq!(aligned.spy().len(), 3);
        assert_eq!(aligned.iwm().len(), 3);
    }

    #[test]
    fn disjoint_series_have_no_common_dates() {
        let qqq = series(AssetId::Qqq, &[1, 2]);
        let spy = series(AssetId::Spy, &[3, 4]);
        let iwm = series(AssetId::Iwm, &[1, 4]);

        assert!(matches!(
            align_returns(&qqq, &spy, &iwm),
            Err(AnalyticsError::NoCommonDates)
        ));
    }

    #[test]
    fn empty_input_has_no_common_dates() {
        let qqq = series(AssetId::Qqq, &[]);
        let spy = series(AssetId::Spy, &[1]);
        let iwm = series(AssetId::Iwm, &[1]);

        assert!(matches!(
            align_returns(&qqq, &spy, &iwm),
            Err(AnalyticsError::NoCommonDates)
        ));
    }

    #[test]
    fn since_is_inclusive_of_start_date() {
        let s = series(AssetId::Qqq, &[1, 2, 3, 4]);
        let aligned = align_returns(&s, &s, &s).unwrap();

        let filtered = aligned.since(day(2)).unwrap();

        assert_eq!(filtered.dates(), &[day(2), day(3), day(4)]);
        assert_eq!(filtered.date_range(), Some(DateRange { start: day(2), end: day(4) }));
        assert_eq!(aligned.len(), 4);
    }

    #[test]
    fn since_after_last_date_fails() {
        let s = series(AssetId::Qqq, &[1, 2]);
        let aligned = align_returns(&s, &s, &s).unwrap();

        let err = aligned.since(day(3)).unwrap_err();

        assert!(matches!(err, AnalyticsError::NoDataAfterStart { start_date } if start_date == day(3)));
    }
}
