//! Error types for calendar, day-count and business-day operations.

use tenor_math::MathError;
use thiserror::Error;

use crate::types::Date;

/// A specialized Result type for Tenor core operations.
pub type TenorResult<T> = Result<T, TenorError>;

/// The main error type for Tenor core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TenorError {
    /// A single date could not be constructed.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A date range is out of order.
    #[error("Invalid dates: end {end} is before start {start}")]
    InvalidDates {
        /// Start of the range.
        start: Date,
        /// End of the range.
        end: Date,
    },

    /// A frequency or period multiplier is unusable.
    #[error("Invalid frequency: {reason}")]
    InvalidFrequency {
        /// Description of the problem.
        reason: String,
    },

    /// Business-day search walked past its safety ceiling.
    #[error("No business day found within {limit} days of {date}")]
    MaxAdjustmentsExceeded {
        /// The date being adjusted.
        date: Date,
        /// The ceiling that was hit.
        limit: u32,
    },

    /// A convention name did not match any supported convention.
    #[error("Unsupported {kind}: '{name}'")]
    UnsupportedConvention {
        /// The kind of convention (day count, business day, ...).
        kind: &'static str,
        /// The name that failed to parse.
        name: String,
    },

    /// Configuration error.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the configuration error.
        reason: String,
    },

    /// Fixed-point arithmetic error.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl TenorError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid date range error.
    #[must_use]
    pub fn invalid_dates(start: Date, end: Date) -> Self {
        Self::InvalidDates { start, end }
    }

    /// Creates an invalid frequency error.
    #[must_use]
    pub fn invalid_frequency(reason: impl Into<String>) -> Self {
        Self::InvalidFrequency {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported convention error.
    #[must_use]
    pub fn unsupported(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnsupportedConvention {
            kind,
            name: name.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
