use crate::alignment::AlignedReturns;
use crate::report::DateRange;
use chrono::NaiveDate;
use core_types::PortfolioId;
use rust_decimal::Decimal;

/// A date-indexed table with one column per portfolio.
///
/// The column set is fixed to [`PortfolioId::ALL`]; every column holds exactly
/// one cell per date.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioTable<T> {
    dates: Vec<NaiveDate>,
    columns: [Vec<T>; 5],
}

/// Daily return of every portfolio, as a fraction.
pub type PortfolioReturns = PortfolioTable<Decimal>;

impl<T> PortfolioTable<T> {
    pub(crate) fn new(dates: Vec<NaiveDate>, columns: [Vec<T>; 5]) -> Self {
        debug_assert!(columns.iter().all(|c| c.len() == dates.len()));
        Self { dates, columns }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn column(&self, id: PortfolioId) -> &[T] {
        &self.columns[id.index()]
    }

    /// Iterates over `(portfolio, column)` pairs in reporting order.
    pub fn columns(&self) -> impl Iterator<Item = (PortfolioId, &[T])> {
        PortfolioId::ALL
            .into_iter()
            .map(move |id| (id, self.column(id)))
    }

    /// The cell of `id` on `date`, if that date is in the index.
    pub fn get(&self, id: PortfolioId, date: NaiveDate) -> Option<&T> {
        let row = self.dates.binary_search(&date).ok()?;
        self.column(id).get(row)
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

    /// Builds a new table on the same index by transforming each column.
    pub fn map_columns<U, F>(&self, mut f: F) -> PortfolioTable<U>
    where
        F: FnMut(PortfolioId, &[T]) -> Vec<U>,
    {
        let columns = PortfolioId::ALL.map(|id| f(id, self.column(id)));
        PortfolioTable::new(self.dates.clone(), columns)
    }
}

/// Computes the five portfolio return series, row by row.
pub fn calculate_portfolio_returns(aligned: &AlignedReturns) -> PortfolioReturns {
    let (qqq, spy, iwm) = (aligned.qqq(), aligned.spy(), aligned.iwm());

    let spread = |long: &[Decimal]| -> Vec<Decimal> {
        long.iter().zip(iwm).map(|(l, s)| l - s).collect()
    };

    PortfolioTable::new(
        aligned.dates().to_vec(),
        [spread(qqq), spread(spy), qqq.to_vec(), spy.to_vec(), iwm.to_vec()],
    )
}
