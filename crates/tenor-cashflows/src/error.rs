//! Error types for schedule, observation and cashflow operations.

use tenor_core::{Date, TenorError};
use tenor_math::{FixedPoint, MathError};
use thiserror::Error;

use crate::cashflow::Currency;

/// A specialized Result type for cashflow operations.
pub type CashflowResult<T> = Result<T, CashflowError>;

/// Errors that can occur while building schedules or computing cashflows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CashflowError {
    /// A date range is empty or reversed.
    #[error("Invalid dates: end {end} must be after start {start}")]
    InvalidDates {
        /// Start of the range.
        start: Date,
        /// End of the range.
        end: Date,
    },

    /// Frequency cannot drive a schedule.
    #[error("Invalid frequency: {reason}")]
    InvalidFrequency {
        /// Description of the problem.
        reason: String,
    },

    /// Day-of-month roll outside 1-31.
    #[error("Invalid roll day {day}: must be between 1 and 31")]
    InvalidRollDay {
        /// The rejected day.
        day: u32,
    },

    /// Schedule would exceed the configured period ceiling.
    #[error("Schedule exceeds {limit} periods")]
    TooManyPeriods {
        /// The ceiling that was hit.
        limit: usize,
    },

    /// Observation window would exceed the configured ceiling.
    #[error("Observation schedule of {count} entries exceeds {limit}")]
    TooManyObservations {
        /// Observations that would have been generated.
        count: usize,
        /// The ceiling that was hit.
        limit: usize,
    },

    /// Rate cut-off is not strictly shorter than the period.
    #[error("Rate cut-off of {cut_off} days must be shorter than the {period_days}-day period")]
    InvalidCutOff {
        /// Requested cut-off in days.
        cut_off: u32,
        /// Period length in days.
        period_days: u64,
    },

    /// Weights do not sum to one within tolerance.
    #[error("Weights sum to {sum}, expected 1 within 0.0001")]
    InvalidWeights {
        /// The actual weight total.
        sum: FixedPoint,
    },

    /// Two parallel inputs have different lengths.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Compounding was asked to combine zero rates.
    #[error("No rate observations to compound")]
    EmptyObservations,

    /// Accrual date falls outside its calculation period.
    #[error("Accrual date {date} is outside period {start} to {end}")]
    AccrualDateOutsidePeriod {
        /// The accrual date.
        date: Date,
        /// Period start.
        start: Date,
        /// Period end.
        end: Date,
    },

    /// Currency code is not three ASCII letters.
    #[error("Invalid currency code: {code}")]
    InvalidCurrency {
        /// The rejected code.
        code: String,
    },

    /// Cashflows in different currencies cannot be netted.
    #[error("Cannot net {left} against {right}")]
    CurrencyMismatch {
        /// First cashflow currency.
        left: Currency,
        /// Second cashflow currency.
        right: Currency,
    },

    /// Cashflows on different dates cannot be netted.
    #[error("Cannot net payments on {left} and {right}")]
    PaymentDateMismatch {
        /// First payment date.
        left: Date,
        /// Second payment date.
        right: Date,
    },

    /// A generated schedule broke an ordering invariant.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of the failure.
        reason: String,
    },

    /// Calendar or day-count error.
    #[error("Core error: {0}")]
    Core(#[from] TenorError),

    /// Fixed-point arithmetic error.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl CashflowError {
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

    /// Creates a length mismatch error.
    #[must_use]
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CashflowError::InvalidCutOff {
            cut_off: 5,
            period_days: 3,
        };
        assert_eq!(
            err.to_string(),
            "Rate cut-off of 5 days must be shorter than the 3-day period"
        );

        let err = CashflowError::length_mismatch(4, 3);
        assert_eq!(err.to_string(), "Length mismatch: expected 4, got 3");
    }

    #[test]
    fn test_core_error_conversion() {
        let err: CashflowError = TenorError::invalid_date("bad").into();
        assert!(matches!(err, CashflowError::Core(_)));

        let err: CashflowError = MathError::overflow("mul").into();
        assert!(matches!(err, CashflowError::Math(_)));
    }
}
