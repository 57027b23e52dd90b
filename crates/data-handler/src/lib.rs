//! # Spreadlab Data Handler
//!
//! Turns exported daily price-history files into validated [`ReturnSeries`]
//! values. Each file must carry a `Date` column and a `Change %` column holding
//! the day's percentage change as text (e.g. `"-0.85%"`).
//!
//! [`ReturnSeries`]: core_types::ReturnSeries

pub mod csv_source;
pub mod error;
pub mod parse;

pub use csv_source::{CsvReturnSource, load_return_series};
pub use error::LoaderError;
