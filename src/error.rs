//! Error types
//!
//! The engine itself never fails: missing data is reported as an
//! insufficient-data state in its output. These errors only arise at the
//! boundary, when requests and configuration are turned into engine inputs.

use thiserror::Error;

/// Boundary error types
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid history payload: {0}")]
    InvalidHistory(#[from] serde_json::Error),

    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },

    #[error("Invalid BMR {0}: must be a finite, non-negative number")]
    InvalidBmr(f64),

    #[error("Unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("Unknown status '{0}'")]
    UnknownStatus(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for boundary operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Parse an ISO calendar date
pub fn parse_date(value: &str) -> EngineResult<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|source| {
        EngineError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}
