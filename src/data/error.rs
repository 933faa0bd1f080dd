use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort loading a trip table
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no data source configured for city {0:?}")]
    UnknownCity(String),

    #[error("data file for {city} not found: {}", path.display())]
    MissingSource { city: String, path: PathBuf },

    #[error("no CSV files found in {}", .0.display())]
    NoSources(PathBuf),

    #[error("failed to scan {pattern}: {message}")]
    Scan { pattern: String, message: String },

    #[error("failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is missing required column {column:?}", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{}: row {row} has malformed {column} {value:?}", path.display())]
    BadTimestamp {
        path: PathBuf,
        row: usize,
        column: &'static str,
        value: String,
    },
}
