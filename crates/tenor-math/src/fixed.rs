//! Unsigned 18-decimal fixed-point values.
//!
//! A [`FixedPoint`] is a `u128` holding a decimal value scaled by 10^18, so
//! `1.0` is stored as `1_000_000_000_000_000_000`. Multiplication and division
//! widen to 256 bits before rescaling and round half-up at the 10^-18
//! boundary; every operation is checked and reports [`MathError`] instead of
//! wrapping.
//!
//! # Example
//!
//! ```rust
//! use tenor_math::FixedPoint;
//!
//! let two = FixedPoint::from_int(2);
//! let three = FixedPoint::from_int(3);
//! assert_eq!(two.checked_mul(three).unwrap(), FixedPoint::from_int(6));
//!
//! let third = FixedPoint::ONE.checked_div(three).unwrap();
//! assert_eq!(third.raw(), 333_333_333_333_333_333);
//! ```

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MathError, MathResult};

/// Number of decimal places carried by a [`FixedPoint`].
pub const DECIMALS: u32 = 18;

/// The scale factor (10^18).
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// One basis point in raw units (10^-4 scaled by 10^18).
const RAW_PER_BPS: u128 = 100_000_000_000_000;

/// A non-negative decimal value scaled by 10^18.
///
/// Sign and direction are carried out-of-band by callers; use
/// [`SignedFixed`](crate::SignedFixed) where a signed result is required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedPoint(u128);

impl FixedPoint {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// One (10^18 raw units).
    pub const ONE: Self = Self(SCALE);

    /// The largest representable value.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw scaled integer.
    #[must_use]
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Returns the raw scaled integer.
    #[must_use]
    pub const fn raw(self) -> u128 {
        self.0
    }

    /// Creates a value from a whole number.
    ///
    /// Any `u64` fits once scaled, so this cannot fail.
    #[must_use]
    pub const fn from_int(value: u64) -> Self {
        Self(value as u128 * SCALE)
    }

    /// Creates a value from a wide whole number.
    pub fn try_from_int(value: u128) -> MathResult<Self> {
        value
            .checked_mul(SCALE)
            .map(Self)
            .ok_or_else(|| MathError::overflow("scale integer"))
    }

    /// Creates the value `numerator / denominator`, rounded half-up.
    ///
    /// Both arguments are plain integers (not scaled). This is the exact
    /// primitive behind every day-count fraction.
    pub fn from_ratio(numerator: u128, denominator: u128) -> MathResult<Self> {
        if denominator == 0 {
            return Err(MathError::division_by_zero("ratio"));
        }
        let scaled = wide(numerator)
            .checked_mul(wide(SCALE))
            .ok_or_else(|| MathError::overflow("ratio"))?;
        narrow(div_half_up(scaled, wide(denominator)), "ratio").map(Self)
    }

    /// Returns the whole-number part, discarding the fraction.
    #[must_use]
    pub const fn trunc(self) -> u128 {
        self.0 / SCALE
    }

    /// Returns the fractional part in raw units.
    #[must_use]
    pub const fn fract_raw(self) -> u128 {
        self.0 % SCALE
    }

    /// Returns true if the value is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    pub fn checked_add(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::overflow("add"))
    }

    /// Checked subtraction; fails with `Underflow` if `rhs > self`.
    pub fn checked_sub(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::underflow("subtract"))
    }

    /// Fixed-point multiplication: `round_half_up(a * b / 10^18)`.
    pub fn checked_mul(self, rhs: Self) -> MathResult<Self> {
        let product = wide(self.0)
            .checked_mul(wide(rhs.0))
            .ok_or_else(|| MathError::overflow("multiply"))?;
        narrow(div_half_up(product, wide(SCALE)), "multiply").map(Self)
    }

    /// Fixed-point division: `round_half_up(a * 10^18 / b)`.
    pub fn checked_div(self, rhs: Self) -> MathResult<Self> {
        if rhs.is_zero() {
            return Err(MathError::division_by_zero("divide"));
        }
        let scaled = wide(self.0)
            .checked_mul(wide(SCALE))
            .ok_or_else(|| MathError::overflow("divide"))?;
        narrow(div_half_up(scaled, wide(rhs.0)), "divide").map(Self)
    }

    /// Multiplies by a plain integer without rescaling.
    pub fn checked_mul_int(self, rhs: u128) -> MathResult<Self> {
        self.0
            .checked_mul(rhs)
            .map(Self)
            .ok_or_else(|| MathError::overflow("multiply by integer"))
    }

    /// Divides by a plain integer, rounding half-up.
    pub fn checked_div_int(self, rhs: u128) -> MathResult<Self> {
        if rhs == 0 {
            return Err(MathError::division_by_zero("divide by integer"));
        }
        narrow(div_half_up(wide(self.0), wide(rhs)), "divide by integer").map(Self)
    }

    /// Raises the value to a non-negative integer power by repeated squaring.
    ///
    /// Each intermediate multiplication rounds half-up, so the result may
    /// differ from the exact power in the last place for fractional bases.
    pub fn pow(self, exponent: u32) -> MathResult<Self> {
        let mut result = Self::ONE;
        let mut base = self;
        let mut remaining = exponent;

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.checked_mul(base)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.checked_mul(base)?;
            }
        }

        Ok(result)
    }

    /// Creates a rate from whole basis points (1 bp = 0.0001).
    #[must_use]
    pub const fn from_bps(bps: u64) -> Self {
        Self(bps as u128 * RAW_PER_BPS)
    }

    /// Expresses the value in basis points (value × 10,000).
    pub fn to_bps(self) -> MathResult<Self> {
        self.checked_mul_int(10_000)
    }

    /// Converts a percentage to a fraction (5 → 0.05).
    pub fn from_percent(percent: Self) -> MathResult<Self> {
        percent.checked_div_int(100)
    }

    /// Expresses a fraction as a percentage (0.05 → 5).
    pub fn to_percent(self) -> MathResult<Self> {
        self.checked_mul_int(100)
    }

    /// Converts to a `Decimal` without loss.
    pub fn to_decimal(self) -> MathResult<Decimal> {
        let mantissa =
            i128::try_from(self.0).map_err(|_| MathError::overflow("convert to decimal"))?;
        Decimal::try_from_i128_with_scale(mantissa, DECIMALS)
            .map(|d| d.normalize())
            .map_err(|_| MathError::overflow("convert to decimal"))
    }

    /// Converts from a `Decimal`.
    ///
    /// Fails for negative values and for values with more than 18 decimal
    /// places, since either would lose information.
    pub fn from_decimal(value: Decimal) -> MathResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MathError::invalid_input(format!(
                "negative value {value} cannot be represented"
            )));
        }
        let normalized = value.normalize();
        let scale = normalized.scale();
        if scale > DECIMALS {
            return Err(MathError::invalid_input(format!(
                "{value} has more than {DECIMALS} decimal places"
            )));
        }
        normalized
            .mantissa()
            .unsigned_abs()
            .checked_mul(10u128.pow(DECIMALS - scale))
            .map(Self)
            .ok_or_else(|| MathError::overflow("convert from decimal"))
    }
}

/// Returns the smallest value, or `EmptyInput` for an empty slice.
pub fn min(values: &[FixedPoint]) -> MathResult<FixedPoint> {
    values
        .iter()
        .copied()
        .min()
        .ok_or_else(|| MathError::empty_input("min"))
}

/// Returns the largest value, or `EmptyInput` for an empty slice.
pub fn max(values: &[FixedPoint]) -> MathResult<FixedPoint> {
    values
        .iter()
        .copied()
        .max()
        .ok_or_else(|| MathError::empty_input("max"))
}

/// Returns the arithmetic mean, rounded half-up.
pub fn average(values: &[FixedPoint]) -> MathResult<FixedPoint> {
    if values.is_empty() {
        return Err(MathError::empty_input("average"));
    }
    let total = values
        .iter()
        .try_fold(FixedPoint::ZERO, |acc, v| acc.checked_add(*v))?;
    total.checked_div_int(values.len() as u128)
}

fn wide(value: u128) -> U256 {
    U256::from(value)
}

fn narrow(value: U256, operation: &str) -> MathResult<u128> {
    u128::try_from(value).map_err(|_| MathError::overflow(operation))
}

/// `numerator / denominator` rounded half-up; `denominator` must be non-zero.
fn div_half_up(numerator: U256, denominator: U256) -> U256 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder >= denominator - remainder {
        quotient + U256::from(1u8)
    } else {
        quotient
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.trunc();
        let frac = self.fract_raw();
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:018}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for FixedPoint {
    type Err = MathError;

    /// Parses a plain decimal string such as `"0.05"` or `"1000000"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid =
            || MathError::invalid_input(format!("cannot parse '{s}' as a fixed-point value"));

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if (whole.is_empty() && frac.is_empty())
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac.len() > DECIMALS as usize {
            return Err(MathError::invalid_input(format!(
                "'{s}' has more than {DECIMALS} decimal places"
            )));
        }

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac_raw: u128 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<18}");
            padded.parse().map_err(|_| invalid())?
        };

        Self::try_from_int(whole)?.checked_add(Self(frac_raw))
    }
}

impl Serialize for FixedPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FixedPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Decimal> for FixedPoint {
    type Error = MathError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}
