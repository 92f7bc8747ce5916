//! Error types for the dataset core.
//!
//! Library functions return [`DatasetError`]; the binary wraps them with `anyhow`.

use thiserror::Error;

/// Errors raised while loading or aggregating a flight dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// An operation needs a column the dataset does not have.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A value could not be parsed as the type its column requires.
    #[error("invalid value {value:?} for field {field} at row {row}")]
    DataType {
        field: String,
        row: usize,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
}

impl DatasetError {
    pub fn missing(field: &str) -> Self {
        DatasetError::MissingField(field.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;
