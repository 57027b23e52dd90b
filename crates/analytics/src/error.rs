use chrono::NaiveDate;
use core_types::AssetId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Failed to load the {asset} return series: {source}")]
    Load {
        asset: AssetId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("No common dates found across the QQQ, SPY and IWM return series.")]
    NoCommonDates,

    #[error("No data available on or after the start date {start_date}.")]
    NoDataAfterStart { start_date: NaiveDate },
}
