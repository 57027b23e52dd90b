use crate::error::LoaderError;
use crate::parse::{parse_date, parse_percentage};
use core_types::{AssetId, ReturnPoint, ReturnSeries, ReturnSource};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

pub const DATE_COLUMN: &str = "Date";
pub const CHANGE_COLUMN: &str = "Change %";

/// Reads one price-history export and returns its daily return series.
///
/// Only the `Date` and `Change %` columns are used; every other column
/// (prices, volume) is ignored. Rows are sorted by date on the way out.
pub fn load_return_series(path: &Path, asset: AssetId) -> Result<ReturnSeries, LoaderError> {
    let file = File::open(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);

    let csv_err = |source| LoaderError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let headers = reader.headers().map_err(csv_err)?.clone();
    let date_idx = column_index(&headers, DATE_COLUMN, path)?;
    let change_idx = column_index(&headers, CHANGE_COLUMN, path)?;

    let mut points = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let raw_date = record.get(date_idx).unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| LoaderError::InvalidDate {
            path: path.to_path_buf(),
            line,
            value: raw_date.to_string(),
        })?;

        let raw_change = record.get(change_idx).unwrap_or_default();
        let value = parse_percentage(raw_change).ok_or_else(|| LoaderError::InvalidPercentage {
            path: path.to_path_buf(),
            line,
            value: raw_change.to_string(),
        })?;

        points.push(ReturnPoint::new(date, value));
    }

    if points.is_empty() {
        return Err(LoaderError::Empty {
            path: path.to_path_buf(),
        });
    }

    let series = ReturnSeries::new(asset, points).map_err(|source| LoaderError::Series {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(asset = %asset, rows = series.len(), path = %path.display(), "Loaded return series.");
    Ok(series)
}

/// Finds a header by name, tolerating a UTF-8 byte-order mark on the first column.
fn column_index(headers: &StringRecord, name: &str, path: &Path) -> Result<usize, LoaderError> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        .ok_or_else(|| LoaderError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
}

/// A [`ReturnSource`] backed by one CSV export per asset.
#[derive(Debug, Clone, Default)]
pub struct CsvReturnSource {
    paths: HashMap<AssetId, PathBuf>,
}

impl CsvReturnSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the file that holds `asset`'s history.
    pub fn with_file(mut self, asset: AssetId, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(asset, path.into());
        self
    }

    /// Builds a source from a path lookup, one call per asset.
    pub fn from_paths<F, P>(path_for: F) -> Self
    where
        F: Fn(AssetId) -> P,
        P: Into<PathBuf>,
    {
        AssetId::ALL
            .into_iter()
            .fold(Self::new(), |source, asset| source.with_file(asset, path_for(asset)))
    }
}

impl ReturnSource for CsvReturnSource {
    type Error = LoaderError;

    fn load(&self, asset: AssetId) -> Result<ReturnSeries, LoaderError> {
        let path = self.paths.get(&asset).ok_or_else(|| LoaderError::Io {
            path: PathBuf::from(asset.ticker()),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no file configured for {asset}"),
            ),
        })?;
        load_return_series(path, asset)
    }
}
