//! Signed fixed-point values.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MathError, MathResult};
use crate::fixed::{FixedPoint, DECIMALS};

/// A signed decimal value scaled by 10^18.
///
/// Only produced where a result is inherently signed, such as the net of a
/// receive and a pay cashflow. Arithmetic on rates and amounts stays in
/// [`FixedPoint`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignedFixed(i128);

impl SignedFixed {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw signed scaled integer.
    #[must_use]
    pub const fn from_raw(raw: i128) -> Self {
        Self(raw)
    }

    /// Returns the raw signed scaled integer.
    #[must_use]
    pub const fn raw(self) -> i128 {
        self.0
    }

    /// Converts an unsigned value, failing if it exceeds `i128::MAX`.
    pub fn from_fixed(value: FixedPoint) -> MathResult<Self> {
        i128::try_from(value.raw())
            .map(Self)
            .map_err(|_| MathError::overflow("convert to signed"))
    }

    /// Returns `a - b` as a signed value.
    pub fn difference(a: FixedPoint, b: FixedPoint) -> MathResult<Self> {
        let a = Self::from_fixed(a)?;
        let b = Self::from_fixed(b)?;
        a.checked_sub(b)
    }

    /// Checked addition.
    pub fn checked_add(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::overflow("signed add"))
    }

    /// Checked subtraction.
    pub fn checked_sub(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::overflow("signed subtract"))
    }

    /// Returns the magnitude as an unsigned value.
    #[must_use]
    pub const fn abs(self) -> FixedPoint {
        FixedPoint::from_raw(self.0.unsigned_abs())
    }

    /// Returns true if the value is strictly negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns true if the value is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Converts to a `Decimal` without loss.
    pub fn to_decimal(self) -> MathResult<Decimal> {
        Decimal::try_from_i128_with_scale(self.0, DECIMALS)
            .map(|d| d.normalize())
            .map_err(|_| MathError::overflow("convert to decimal"))
    }
}

impl fmt::Display for SignedFixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}", self.abs())
        } else {
            write!(f, "{}", self.abs())
        }
    }
}

impl Serialize for SignedFixed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SignedFixed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let (negative, magnitude) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.as_str()),
        };
        let magnitude: FixedPoint = magnitude.parse().map_err(serde::de::Error::custom)?;
        let value = SignedFixed::from_fixed(magnitude).map_err(serde::de::Error::custom)?;
        Ok(if negative { Self(-value.0) } else { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difference_sign() {
        let a = FixedPoint::from_int(100);
        let b = FixedPoint::from_int(250);

        let net = SignedFixed::difference(a, b).unwrap();
        assert!(net.is_negative());
        assert_eq!(net.abs(), FixedPoint::from_int(150));
        assert_eq!(net.to_string(), "-150");

        let net = SignedFixed::difference(b, a).unwrap();
        assert!(!net.is_negative());
        assert_eq!(net.to_string(), "150");
    }

    #[test]
    fn test_from_fixed_overflow() {
        assert!(SignedFixed::from_fixed(FixedPoint::MAX).is_err());
    }

    #[test]
    fn test_serde_roundtrip_negative() {
        let value = SignedFixed::difference(FixedPoint::ZERO, "12.5".parse().unwrap()).unwrap();
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"-12.5\"");
        let parsed: SignedFixed = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);
    }
}
