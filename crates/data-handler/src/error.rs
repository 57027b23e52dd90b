use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("The file {path} could not be opened: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}, line {line}: invalid date '{value}'")]
    InvalidDate { path: PathBuf, line: u64, value: String },

    #[error("{path}, line {line}: invalid percentage '{value}'")]
    InvalidPercentage { path: PathBuf, line: u64, value: String },

    #[error("{path} contains no data rows")]
    Empty { path: PathBuf },

    #[error("Invalid return series in {path}: {source}")]
    Series {
        path: PathBuf,
        #[source]
        source: core_types::CoreError,
    },
}
