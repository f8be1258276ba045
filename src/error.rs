//! Error types for Drishti

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, EstimatorError>;

/// Errors raised while setting up an estimator.
///
/// Runtime operations never fail; missing data is reported as `None`.
#[derive(Error, Debug)]
pub enum EstimatorError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configured value is out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<basic_toml::Error> for EstimatorError {
    fn from(e: basic_toml::Error) -> Self {
        EstimatorError::Config(e.to_string())
    }
}
