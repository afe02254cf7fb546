//! Day count conventions for interest accrual.
//!
//! Day count conventions determine how accrued interest is calculated
//! by specifying how to count days between two dates and the year basis.
//! Every year fraction is an exact [`FixedPoint`] ratio rounded half-up at
//! the 18th decimal place.
//!
//! # Supported Conventions
//!
//! ## ACT Family (Actual numerator)
//!
//! - [`Act360`]: Actual/360 - Money market convention
//! - [`Act365Fixed`]: Actual/365 Fixed - GBP and AUD markets
//! - [`ActActIsda`]: Actual/Actual ISDA - Year-based split
//! - [`ActActIcma`]: Actual/Actual ICMA - Frequency-based
//!
//! ## 30/360 Family (Assumes 30-day months, 360-day years)
//!
//! - [`Thirty360`]: 30/360 Bond Basis
//! - [`Thirty360E`]: 30E/360 - Eurobond convention
//! - [`Thirty360EIsda`]: 30E/360 ISDA - February end-of-month rules
//!
//! ## Other
//!
//! - [`OneOne`]: 1/1 - Always one
//!
//! # Usage
//!
//! ```rust
//! use tenor_core::daycounts::{DayCount, Thirty360};
//! use tenor_core::types::Date;
//!
//! let dc = Thirty360;
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//!
//! assert_eq!(dc.day_count(start, end).unwrap(), 180);
//! assert_eq!(dc.year_fraction(start, end).unwrap().to_string(), "0.5");
//! ```

mod act360;
mod act365;
mod actact;
mod one;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use actact::{ActActIcma, ActActIsda};
pub use one::OneOne;
pub use thirty360::{Thirty360, Thirty360E, Thirty360EIsda};

use serde::{Deserialize, Serialize};
use tenor_math::FixedPoint;

use crate::error::{TenorError, TenorResult};
use crate::types::Date;

/// Trait for day count conventions.
///
/// # Implementation Notes
///
/// - `year_fraction` returns the fraction of a year between dates
/// - `day_count` returns the number of days according to the convention
/// - Both fail with `TenorError::InvalidDates` when `end` precedes `start`
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> TenorResult<FixedPoint>;

    /// Calculates the day count between two dates.
    ///
    /// For ACT conventions this is actual calendar days; 30/360 conventions
    /// use the 30-day month assumption.
    fn day_count(&self, start: Date, end: Date) -> TenorResult<u64>;
}

/// Enumeration of all supported day count conventions.
///
/// # Example
///
/// ```rust
/// use tenor_core::daycounts::DayCountConvention;
/// use tenor_core::types::Date;
///
/// let convention: DayCountConvention = "ACT/360".parse().unwrap();
/// let dc = convention.to_day_count(None, 0);
///
/// let start = Date::from_ymd(2025, 1, 1).unwrap();
/// let end = Date::from_ymd(2025, 4, 1).unwrap();
/// assert_eq!(dc.year_fraction(start, end).unwrap().to_string(), "0.25");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    // =========================================================================
    // ACT Family
    // =========================================================================
    /// Actual/360
    #[serde(rename = "ACT/360")]
    Act360,

    /// Actual/365 Fixed
    #[serde(rename = "ACT/365F")]
    Act365Fixed,

    /// Actual/Actual ISDA
    #[serde(rename = "ACT/ACT ISDA")]
    ActActIsda,

    /// Actual/Actual ICMA, needs the coupon frequency
    #[serde(rename = "ACT/ACT ICMA")]
    ActActIcma,

    // =========================================================================
    // 30/360 Family
    // =========================================================================
    /// 30/360 Bond Basis
    #[serde(rename = "30/360")]
    Thirty360,

    /// 30E/360 Eurobond Basis
    #[serde(rename = "30E/360")]
    Thirty360E,

    /// 30E/360 ISDA, needs the termination date
    #[serde(rename = "30E/360 ISDA")]
    Thirty360EIsda,

    // =========================================================================
    // Other
    // =========================================================================
    /// 1/1
    #[serde(rename = "1/1")]
    OneOne,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    ///
    /// `termination` is only read by 30E/360 ISDA and `frequency` only by
    /// ACT/ACT ICMA.
    #[must_use]
    pub fn to_day_count(&self, termination: Option<Date>, frequency: u32) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::ActActIsda => Box::new(ActActIsda),
            DayCountConvention::ActActIcma => Box::new(ActActIcma::new(frequency)),
            DayCountConvention::Thirty360 => Box::new(Thirty360),
            DayCountConvention::Thirty360E => Box::new(Thirty360E),
            DayCountConvention::Thirty360EIsda => Box::new(Thirty360EIsda::new(termination)),
            DayCountConvention::OneOne => Box::new(OneOne),
        }
    }

    /// Returns the conventional market name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::ActActIsda => "ACT/ACT ISDA",
            DayCountConvention::ActActIcma => "ACT/ACT ICMA",
            DayCountConvention::Thirty360 => "30/360",
            DayCountConvention::Thirty360E => "30E/360",
            DayCountConvention::Thirty360EIsda => "30E/360 ISDA",
            DayCountConvention::OneOne => "1/1",
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::ActActIsda,
            DayCountConvention::ActActIcma,
            DayCountConvention::Thirty360,
            DayCountConvention::Thirty360E,
            DayCountConvention::Thirty360EIsda,
            DayCountConvention::OneOne,
        ]
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = TenorError;

    /// Parses a day count convention from a string.
    ///
    /// Supports market names ("ACT/360", "30E/360 ISDA"), enum-style names
    /// ("Act360", "Thirty360EIsda") and common aliases ("BOND", "EUROBOND").
    fn from_str(s: &str) -> TenorResult<Self> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT/360" | "ACTUAL/360" | "ACT360" | "A360" => Ok(DayCountConvention::Act360),

            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACT/365.FIXED" | "ACTUAL/365"
            | "ACT365FIXED" | "ACT365" | "A365F" => Ok(DayCountConvention::Act365Fixed),

            "ACT/ACT" | "ACT/ACT ISDA" | "ACT/ACT.ISDA" | "ACTUAL/ACTUAL" | "ACTACTISDA"
            | "ACTACT" => Ok(DayCountConvention::ActActIsda),

            "ACT/ACT ICMA" | "ACT/ACT.ICMA" | "ACTUAL/ACTUAL ICMA" | "ACTACTICMA" | "ISMA" => {
                Ok(DayCountConvention::ActActIcma)
            }

            "30/360" | "30/360 BOND" | "BOND" | "BOND BASIS" | "THIRTY360" => {
                Ok(DayCountConvention::Thirty360)
            }

            "30E/360" | "EUROBOND" | "THIRTY360E" | "30E360" => Ok(DayCountConvention::Thirty360E),

            "30E/360 ISDA" | "30E/360.ISDA" | "THIRTY360EISDA" | "30E/360ISDA" => {
                Ok(DayCountConvention::Thirty360EIsda)
            }

            "1/1" | "ONE/ONE" | "ONEONE" => Ok(DayCountConvention::OneOne),

            _ => Err(TenorError::unsupported("day count convention", s)),
        }
    }
}

/// Computes the year fraction for a convention in one call.
///
/// `termination` feeds the 30E/360 ISDA February rule and `frequency` the
/// ACT/ACT ICMA basis; other conventions ignore them.
///
/// # Errors
///
/// - `TenorError::InvalidDates` if `end` precedes `start`
/// - `TenorError::InvalidFrequency` for ACT/ACT ICMA with `frequency == 0`
pub fn fraction(
    convention: DayCountConvention,
    start: Date,
    end: Date,
    termination: Option<Date>,
    frequency: u32,
) -> TenorResult<FixedPoint> {
    convention
        .to_day_count(termination, frequency)
        .year_fraction(start, end)
}

/// Computes the convention's day count in one call.
pub fn day_count(
    convention: DayCountConvention,
    start: Date,
    end: Date,
    termination: Option<Date>,
) -> TenorResult<u64> {
    convention.to_day_count(termination, 1).day_count(start, end)
}
