use crate::enums::AssetId;
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One observed daily return of an asset, as a fraction (0.0012 == 0.12%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

impl ReturnPoint {
    pub fn new(date: NaiveDate, value: Decimal) -> Self {
        Self { date, value }
    }
}

/// A per-asset return history with strictly increasing dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    asset: AssetId,
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    /// Builds a series from points in any order.
    ///
    /// The points are sorted by date. Two points sharing a date are rejected,
    /// since alignment relies on dates being unique within each asset.
    pub fn new(asset: AssetId, mut points: Vec<ReturnPoint>) -> Result<Self, CoreError> {
        points.sort_by_key(|p| p.date);

        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(CoreError::DuplicateDate {
                asset,
                date: pair[0].date,
            });
        }

        Ok(Self { asset, points })
    }

    pub fn asset(&self) -> AssetId {
        self.asset
    }

    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last observed dates, if any.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}
