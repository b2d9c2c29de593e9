//! Error types for heatwave

use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No data for year {0}")]
    YearNotFound(i32),

    #[error("Dataset contains no rows")]
    EmptyDataset,

    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    #[error("Item already exists: {0}")]
    ItemExists(i64),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Source '{source_name}' is missing required columns: {}", .missing.join(", "))]
    MissingColumns {
        source_name: String,
        missing: Vec<String>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Error::InvalidRequest(msg.into())
    }

    /// HTTP status reported to API callers for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::YearNotFound(_) | Error::EmptyDataset | Error::ItemNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Error::ItemExists(_) | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::MissingColumns { .. } | Error::Csv(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
