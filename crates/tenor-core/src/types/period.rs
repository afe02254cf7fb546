//! Tenors and schedule frequencies.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{TenorError, TenorResult};

/// Unit of a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Calendar days.
    Day,
    /// Weeks of seven days.
    Week,
    /// Calendar months.
    Month,
    /// Calendar years.
    Year,
}

impl TimeUnit {
    /// Single-letter tenor code.
    #[must_use]
    pub fn code(&self) -> char {
        match self {
            TimeUnit::Day => 'D',
            TimeUnit::Week => 'W',
            TimeUnit::Month => 'M',
            TimeUnit::Year => 'Y',
        }
    }
}

/// A length of time such as `3M` or `1Y`.
///
/// Used both as a schedule frequency and as a date addend.
///
/// ```rust
/// use tenor_core::types::{Period, TimeUnit};
///
/// let quarterly: Period = "3M".parse().unwrap();
/// assert_eq!(quarterly, Period::new(3, TimeUnit::Month));
/// assert_eq!(quarterly.periods_per_year(), Some(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    /// Number of units.
    pub multiplier: u32,
    /// Unit of time.
    pub unit: TimeUnit,
}

impl Period {
    /// Creates a new period.
    #[must_use]
    pub const fn new(multiplier: u32, unit: TimeUnit) -> Self {
        Self { multiplier, unit }
    }

    /// `n` days.
    #[must_use]
    pub const fn days(n: u32) -> Self {
        Self::new(n, TimeUnit::Day)
    }

    /// `n` weeks.
    #[must_use]
    pub const fn weeks(n: u32) -> Self {
        Self::new(n, TimeUnit::Week)
    }

    /// `n` months.
    #[must_use]
    pub const fn months(n: u32) -> Self {
        Self::new(n, TimeUnit::Month)
    }

    /// `n` years.
    #[must_use]
    pub const fn years(n: u32) -> Self {
        Self::new(n, TimeUnit::Year)
    }

    /// Returns true when the multiplier is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.multiplier == 0
    }

    /// Whole periods per year, if the period divides a year evenly.
    ///
    /// `3M` gives 4 and `1Y` gives 1; `5M` or any day/week period gives `None`.
    #[must_use]
    pub fn periods_per_year(&self) -> Option<u32> {
        let months = match self.unit {
            TimeUnit::Month => self.multiplier,
            TimeUnit::Year => self.multiplier.checked_mul(12)?,
            TimeUnit::Day | TimeUnit::Week => return None,
        };
        if months == 0 || 12 % months != 0 {
            return None;
        }
        Some(12 / months)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.multiplier, self.unit.code())
    }
}

impl FromStr for Period {
    type Err = TenorError;

    fn from_str(s: &str) -> TenorResult<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        let unit = match chars.next_back().map(|c| c.to_ascii_uppercase()) {
            Some('D') => TimeUnit::Day,
            Some('W') => TimeUnit::Week,
            Some('M') => TimeUnit::Month,
            Some('Y') => TimeUnit::Year,
            _ => return Err(TenorError::unsupported("period", s)),
        };
        let multiplier = chars
            .as_str()
            .parse::<u32>()
            .map_err(|_| TenorError::unsupported("period", s))?;
        Ok(Self::new(multiplier, unit))
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tenors() {
        assert_eq!("3M".parse::<Period>().unwrap(), Period::months(3));
        assert_eq!("1y".parse::<Period>().unwrap(), Period::years(1));
        assert_eq!("2W".parse::<Period>().unwrap(), Period::weeks(2));
        assert_eq!(" 7D ".parse::<Period>().unwrap(), Period::days(7));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Period>().is_err());
        assert!("M".parse::<Period>().is_err());
        assert!("3Q".parse::<Period>().is_err());
        assert!("-1M".parse::<Period>().is_err());
    }

    #[test]
    fn test_periods_per_year() {
        assert_eq!(Period::months(1).periods_per_year(), Some(12));
        assert_eq!(Period::months(6).periods_per_year(), Some(2));
        assert_eq!(Period::years(1).periods_per_year(), Some(1));
        assert_eq!(Period::months(5).periods_per_year(), None);
        assert_eq!(Period::years(2).periods_per_year(), None);
        assert_eq!(Period::days(1).periods_per_year(), None);
        assert_eq!(Period::months(0).periods_per_year(), None);
    }

    #[test]
    fn test_display_roundtrip() {
        let period = Period::months(6);
        assert_eq!(period.to_string(), "6M");
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, "\"6M\"");
        assert_eq!(serde_json::from_str::<Period>(&json).unwrap(), period);
    }
}
