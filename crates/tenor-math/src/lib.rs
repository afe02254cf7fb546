//! # Tenor Math
//!
//! Scaled-integer fixed-point arithmetic for the Tenor interest calculation
//! engine.
//!
//! Every value in the engine is a decimal scaled by 10^18 and held in an
//! integer, so results are reproducible bit-for-bit across platforms:
//!
//! - **[`FixedPoint`]**: unsigned 18-decimal values with checked, half-up
//!   rounded multiply and divide
//! - **[`SignedFixed`]**: signed counterpart used for netted amounts
//! - **Rounding**: decimal-place and increment rounding with explicit policies
//! - **Aggregates**: [`min`], [`max`] and [`average`] over slices
//!
//! ## Example
//!
//! ```rust
//! use tenor_math::{FixedPoint, RoundingMode};
//!
//! let notional: FixedPoint = "1000000".parse().unwrap();
//! let rate: FixedPoint = "0.0525".parse().unwrap();
//! let fraction = FixedPoint::from_ratio(92, 360).unwrap();
//!
//! let interest = notional
//!     .checked_mul(rate)
//!     .and_then(|v| v.checked_mul(fraction))
//!     .and_then(|v| v.round_dp(2, RoundingMode::Nearest))
//!     .unwrap();
//! assert_eq!(interest.to_string(), "13416.67");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod fixed;
pub mod rounding;
pub mod signed;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::fixed::{average, max, min, FixedPoint, DECIMALS, SCALE};
    pub use crate::rounding::RoundingMode;
    pub use crate::signed::SignedFixed;
}

pub use error::{MathError, MathResult};
pub use fixed::{average, max, min, FixedPoint, DECIMALS, SCALE};
pub use rounding::RoundingMode;
pub use signed::SignedFixed;
