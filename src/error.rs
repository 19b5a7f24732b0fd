//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::monte_carlo::MonteCarloError;

/// Result alias for run operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure of an estimation run. None of them is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("estimation failed: {0}")]
    Estimate(#[from] MonteCarloError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    /// Chart drawing failed (font lookup, backend or coordinate errors).
    #[error("plot rendering failed: {0}")]
    Render(String),
}
