//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// A numeric argument could not be read as a fixed-point decimal.
    #[error("Invalid {field}: {value}. Use a non-negative decimal such as 0.05.")]
    InvalidNumber {
        /// Argument name.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
