//! Errors raised while fetching and parsing the salary dataset.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
