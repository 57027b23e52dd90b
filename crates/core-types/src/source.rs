use crate::enums::AssetId;
use crate::structs::ReturnSeries;

/// A provider of per-asset daily return histories.
///
/// Implementations own whatever identifies the underlying data (file paths,
/// fixtures) and hand back a validated, date-ordered series per asset.
pub trait ReturnSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn load(&self, asset: AssetId) -> Result<ReturnSeries, Self::Error>;
}
