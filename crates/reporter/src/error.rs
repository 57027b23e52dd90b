use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReporterError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to serialize the JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Nothing to report: {0}")]
    NoData(String),
}
