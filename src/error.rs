//! Error Types for the FX-TDA Pipeline
//!
//! Every stage returns `TdaResult`; nothing is retried. A failure aborts
//! the run and the caller decides how to report it.

use thiserror::Error;

/// Root error type for all pipeline failures.
#[derive(Error, Debug)]
pub enum TdaError {
    /// Bad window size, dimension cap or scale threshold.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Too few points to form any simplex beyond a vertex.
    #[error("insufficient points: found {found}, need at least {required}")]
    InsufficientPoints { found: usize, required: usize },

    /// Series empty after filtering, or an empty filtration/diagram.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Tabular source missing, malformed, or short of columns.
    #[error("source read failure: {0}")]
    SourceRead(String),

    /// Configuration could not be read or failed validation.
    #[error("config error: {0}")]
    Config(String),

    /// Writing rendered plots failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for TdaError {
    fn from(err: csv::Error) -> Self {
        TdaError::SourceRead(err.to_string())
    }
}

pub type TdaResult<T> = Result<T, TdaError>;
