//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait, with `is_business_day` as the single predicate
//! - Weekend-only calendars ([`WeekendCalendar`], [`BusinessCenters`])
//! - Business day adjustment conventions and date rolling
//!
//! Holiday tables are not part of the engine; every calendar here treats
//! Saturday and Sunday as the only non-business days.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

mod conventions;

pub use conventions::{adjust, BusinessDayAdjustments, BusinessDayConvention};

use crate::error::{TenorError, TenorResult};
use crate::types::Date;

/// Upper bound on days walked when searching for a business day.
pub const MAX_ADJUSTMENT_DAYS: u32 = 30;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is not a business day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> TenorResult<Date> {
        conventions::adjust(date, convention, self)
    }

    /// Moves a date by a signed number of business days.
    ///
    /// Zero returns the date unchanged even if it is not a business day.
    fn add_business_days(&self, date: Date, days: i32) -> TenorResult<Date> {
        let mut result = date;
        let mut remaining = days.unsigned_abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction)?;
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        Ok(result)
    }

    /// Counts business days between two dates (exclusive of start, inclusive of end).
    ///
    /// # Errors
    ///
    /// Returns `TenorError::InvalidDates` if `end` is before `start`.
    fn count_business_days(&self, start: Date, end: Date) -> TenorResult<u32> {
        let span = start.days_between(end)?;
        let mut count = 0;
        let mut current = start;

        for _ in 0..span {
            current = current.add_days(1)?;
            if self.is_business_day(current) {
                count += 1;
            }
        }

        Ok(count)
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// A financial business centre, identified by its ISDA four-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BusinessCenter {
    /// New York.
    #[serde(rename = "USNY")]
    NewYork,
    /// London.
    #[serde(rename = "GBLO")]
    London,
    /// TARGET2 (euro settlement).
    #[serde(rename = "EUTA")]
    Target,
    /// Tokyo.
    #[serde(rename = "JPTO")]
    Tokyo,
    /// Zurich.
    #[serde(rename = "CHZU")]
    Zurich,
    /// Toronto.
    #[serde(rename = "CATO")]
    Toronto,
    /// Sydney.
    #[serde(rename = "AUSY")]
    Sydney,
    /// Hong Kong.
    #[serde(rename = "HKHK")]
    HongKong,
    /// Singapore.
    #[serde(rename = "SGSI")]
    Singapore,
}

impl BusinessCenter {
    /// Returns the ISDA business centre code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            BusinessCenter::NewYork => "USNY",
            BusinessCenter::London => "GBLO",
            BusinessCenter::Target => "EUTA",
            BusinessCenter::Tokyo => "JPTO",
            BusinessCenter::Zurich => "CHZU",
            BusinessCenter::Toronto => "CATO",
            BusinessCenter::Sydney => "AUSY",
            BusinessCenter::HongKong => "HKHK",
            BusinessCenter::Singapore => "SGSI",
        }
    }

    /// Returns all supported business centres.
    #[must_use]
    pub fn all() -> &'static [BusinessCenter] {
        &[
            BusinessCenter::NewYork,
            BusinessCenter::London,
            BusinessCenter::Target,
            BusinessCenter::Tokyo,
            BusinessCenter::Zurich,
            BusinessCenter::Toronto,
            BusinessCenter::Sydney,
            BusinessCenter::HongKong,
            BusinessCenter::Singapore,
        ]
    }
}

impl fmt::Display for BusinessCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BusinessCenter {
    type Err = TenorError;

    fn from_str(s: &str) -> TenorResult<Self> {
        let code = s.trim().to_ascii_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| TenorError::unsupported("business centre", s))
    }
}

/// A set of business centres whose calendars are combined.
///
/// A date is a business day only if it is one in every centre. With no
/// holiday tables loaded this reduces to weekend detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessCenters(BTreeSet<BusinessCenter>);

impl BusinessCenters {
    /// Creates an empty set (plain weekend calendar).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a centre, returning the updated set.
    #[must_use]
    pub fn with(mut self, center: BusinessCenter) -> Self {
        self.0.insert(center);
        self
    }

    /// Returns true if the centre is part of the set.
    #[must_use]
    pub fn contains(&self, center: BusinessCenter) -> bool {
        self.0.contains(&center)
    }

    /// Iterates centres in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = BusinessCenter> + '_ {
        self.0.iter().copied()
    }

    /// Number of centres.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no centres are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<BusinessCenter> for BusinessCenters {
    fn from_iter<I: IntoIterator<Item = BusinessCenter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for BusinessCenters {
    type Err = TenorError;

    /// Parses a comma or plus separated list such as `USNY+GBLO`.
    fn from_str(s: &str) -> TenorResult<Self> {
        s.split([',', '+'])
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse::<BusinessCenter>)
            .collect()
    }
}

impl fmt::Display for BusinessCenters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<_> = self.iter().map(|c| c.code()).collect();
        write!(f, "{}", codes.join("+"))
    }
}

impl Calendar for BusinessCenters {
    fn name(&self) -> &'static str {
        "Business Centres"
    }

    fn is_business_day(&self, date: Date) -> bool {
        WeekendCalendar.is_business_day(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;

        // Monday
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert!(cal.is_business_day(monday));

        // Saturday
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert!(!cal.is_business_day(saturday));
        assert!(cal.is_holiday(saturday));

        // Sunday
        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        assert!(!cal.is_business_day(sunday));
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;

        // Friday + 1 business day = Monday
        let friday = Date::from_ymd(2025, 1, 3).unwrap();
        let result = cal.add_business_days(friday, 1).unwrap();
        assert_eq!(result, Date::from_ymd(2025, 1, 6).unwrap());

        // Monday - 2 business days = previous Thursday
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        let result = cal.add_business_days(monday, -2).unwrap();
        assert_eq!(result, Date::from_ymd(2025, 1, 2).unwrap());

        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert_eq!(cal.add_business_days(saturday, 0).unwrap(), saturday);
    }

    #[test]
    fn test_add_business_days_before_epoch() {
        let cal = WeekendCalendar;
        assert!(cal.add_business_days(Date::EPOCH, -5).is_err());
    }

    #[test]
    fn test_count_business_days() {
        let cal = WeekendCalendar;

        // Monday to Friday = 4 business days (Tue, Wed, Thu, Fri)
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        let friday = Date::from_ymd(2025, 1, 10).unwrap();
        assert_eq!(cal.count_business_days(monday, friday).unwrap(), 4);

        // Friday to next Monday = 1 business day
        let next_monday = Date::from_ymd(2025, 1, 13).unwrap();
        assert_eq!(cal.count_business_days(friday, next_monday).unwrap(), 1);

        assert_eq!(cal.count_business_days(monday, monday).unwrap(), 0);
        assert!(matches!(
            cal.count_business_days(friday, monday),
            Err(TenorError::InvalidDates { .. })
        ));
    }

    #[test]
    fn test_business_center_parsing() {
        assert_eq!("USNY".parse::<BusinessCenter>().unwrap(), BusinessCenter::NewYork);
        assert_eq!("gblo".parse::<BusinessCenter>().unwrap(), BusinessCenter::London);
        assert!("XXXX".parse::<BusinessCenter>().is_err());

        let centers: BusinessCenters = "USNY+GBLO".parse().unwrap();
        assert_eq!(centers.len(), 2);
        assert!(centers.contains(BusinessCenter::London));
        assert_eq!(centers.to_string(), "USNY+GBLO");
    }

    #[test]
    fn test_business_centers_weekend_only() {
        let centers = BusinessCenters::new()
            .with(BusinessCenter::Target)
            .with(BusinessCenter::Tokyo);
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        // Jan 1 is a holiday in both centres but no holiday data is loaded.
        let new_year = Date::from_ymd(2025, 1, 1).unwrap();
        assert!(!centers.is_business_day(saturday));
        assert!(centers.is_business_day(new_year));
    }
}
