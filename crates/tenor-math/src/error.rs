//! Error types for fixed-point operations.

use thiserror::Error;

/// A specialized Result type for fixed-point operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during fixed-point arithmetic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// The result does not fit in the representable range.
    #[error("Numerical overflow in {operation}")]
    Overflow {
        /// The operation that overflowed.
        operation: String,
    },

    /// The result would be negative in an unsigned context.
    #[error("Numerical underflow in {operation}")]
    Underflow {
        /// The operation that underflowed.
        operation: String,
    },

    /// Division by a zero divisor.
    #[error("Division by zero in {operation}")]
    DivisionByZero {
        /// The operation that attempted the division.
        operation: String,
    },

    /// An aggregate was requested over no values.
    #[error("Empty input to {operation}")]
    EmptyInput {
        /// The aggregate that was requested.
        operation: String,
    },

    /// Invalid input value.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates an overflow error.
    #[must_use]
    pub fn overflow(operation: impl Into<String>) -> Self {
        Self::Overflow {
            operation: operation.into(),
        }
    }

    /// Creates an underflow error.
    #[must_use]
    pub fn underflow(operation: impl Into<String>) -> Self {
        Self::Underflow {
            operation: operation.into(),
        }
    }

    /// Creates a division by zero error.
    #[must_use]
    pub fn division_by_zero(operation: impl Into<String>) -> Self {
        Self::DivisionByZero {
            operation: operation.into(),
        }
    }

    /// Creates an empty input error.
    #[must_use]
    pub fn empty_input(operation: impl Into<String>) -> Self {
        Self::EmptyInput {
            operation: operation.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
