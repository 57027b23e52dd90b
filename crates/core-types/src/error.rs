use crate::enums::AssetId;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Duplicate date {date} in the {asset} return series")]
    DuplicateDate { asset: AssetId, date: NaiveDate },
}
