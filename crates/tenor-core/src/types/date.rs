//! Date type for financial calculations.
//!
//! A [`Date`] is a Unix timestamp truncated to a UTC day boundary. All civil
//! conversions are done arithmetically on the day number since the epoch, so
//! results do not depend on the host's timezone database.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{TenorError, TenorResult};
use crate::types::{Period, TimeUnit};

/// Seconds in one calendar day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Earliest supported year (the Unix epoch).
pub const MIN_YEAR: u32 = 1970;

/// Latest supported year.
pub const MAX_YEAR: u32 = 9999;

/// Day number of 9999-12-31 relative to the epoch.
const MAX_EPOCH_DAY: u64 = 2_932_896;

/// Weekdays indexed by epoch day modulo 7; 1970-01-01 was a Thursday.
const EPOCH_WEEK: [Weekday; 7] = [
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
];

/// A calendar date identified by its midnight UTC Unix timestamp.
///
/// # Example
///
/// ```rust
/// use tenor_core::types::Date;
///
/// let date = Date::from_ymd(2024, 1, 31).unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next.ymd(), (2024, 2, 29));
/// assert_eq!(Date::from_timestamp(next.timestamp()).unwrap(), next);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    timestamp: u64,
}

impl Date {
    /// The Unix epoch, 1970-01-01.
    pub const EPOCH: Date = Date { timestamp: 0 };

    /// Creates a date from a Unix timestamp, truncating to the day boundary.
    ///
    /// # Errors
    ///
    /// Returns `TenorError::InvalidDate` for timestamps after 9999-12-31.
    pub fn from_timestamp(timestamp: u64) -> TenorResult<Self> {
        Self::from_epoch_day(timestamp / SECONDS_PER_DAY)
    }

    /// Creates a date from the number of days since 1970-01-01.
    pub fn from_epoch_day(day: u64) -> TenorResult<Self> {
        if day > MAX_EPOCH_DAY {
            return Err(TenorError::invalid_date(format!(
                "epoch day {day} is after {MAX_YEAR}-12-31"
            )));
        }
        Ok(Self {
            timestamp: day * SECONDS_PER_DAY,
        })
    }

    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `TenorError::InvalidDate` if the date does not exist or lies
    /// outside 1970..=9999.
    pub fn from_ymd(year: u32, month: u32, day: u32) -> TenorResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year)
            || !(1..=12).contains(&month)
            || day == 0
            || day > days_in_month(year, month)
        {
            return Err(TenorError::invalid_date(format!(
                "{year:04}-{month:02}-{day:02}"
            )));
        }
        Self::from_epoch_day(days_from_civil(year, month, day))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    pub fn parse(s: &str) -> TenorResult<Self> {
        let naive = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| TenorError::invalid_date(format!("Cannot parse: {s}")))?;
        Self::try_from(naive)
    }

    /// Returns the midnight UTC Unix timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Returns the number of days since 1970-01-01.
    #[must_use]
    pub const fn epoch_day(&self) -> u64 {
        self.timestamp / SECONDS_PER_DAY
    }

    /// Decomposes the date into (year, month, day).
    #[must_use]
    pub fn ymd(&self) -> (u32, u32, u32) {
        civil_from_days(self.epoch_day())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> u32 {
        self.ymd().0
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.ymd().1
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.ymd().2
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year())
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        let (year, month, _) = self.ymd();
        days_in_month(year, month)
    }

    /// Returns the number of days in the date's year.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        days_in_year(self.year())
    }

    /// Checks if the date is the last day of its month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Checks if the date is the last day of February.
    #[must_use]
    pub fn is_last_day_of_february(&self) -> bool {
        self.month() == 2 && self.is_end_of_month()
    }

    /// Returns the last day of the date's month.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        let (year, month, day) = self.ymd();
        let last = days_in_month(year, month);
        Self {
            timestamp: self.timestamp + u64::from(last - day) * SECONDS_PER_DAY,
        }
    }

    /// Returns the same month with the day clamped to the month length.
    pub fn with_day_clamped(&self, day: u32) -> TenorResult<Self> {
        let (year, month, _) = self.ymd();
        Self::from_ymd(year, month, day.clamp(1, days_in_month(year, month)))
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        EPOCH_WEEK[(self.epoch_day() % 7) as usize]
    }

    /// Checks if the date is a Saturday or Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Adds a signed number of days.
    ///
    /// # Errors
    ///
    /// Returns `TenorError::InvalidDate` if the result precedes the epoch or
    /// passes 9999-12-31.
    pub fn add_days(&self, days: i64) -> TenorResult<Self> {
        let target = self
            .epoch_day()
            .checked_add_signed(days)
            .ok_or_else(|| TenorError::invalid_date(format!("{self} {days:+} days")))?;
        Self::from_epoch_day(target)
    }

    /// Adds a signed number of months, clamping the day to the target month.
    ///
    /// Jan 31 + 1 month is Feb 28 (or 29 in a leap year).
    pub fn add_months(&self, months: i32) -> TenorResult<Self> {
        let (year, month, day) = self.ymd();
        let total = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(months);
        let new_year = u32::try_from(total.div_euclid(12))
            .map_err(|_| TenorError::invalid_date(format!("{self} {months:+} months")))?;
        let new_month = (total.rem_euclid(12) + 1) as u32;

        let max_day = days_in_month(new_year, new_month);
        Self::from_ymd(new_year, new_month, day.min(max_day))
    }

    /// Adds a signed number of years, clamping Feb 29 to Feb 28 when needed.
    pub fn add_years(&self, years: i32) -> TenorResult<Self> {
        let (year, month, day) = self.ymd();
        let new_year = u32::try_from(i64::from(year) + i64::from(years))
            .map_err(|_| TenorError::invalid_date(format!("{self} {years:+} years")))?;
        let max_day = days_in_month(new_year, month);
        Self::from_ymd(new_year, month, day.min(max_day))
    }

    /// Adds a period (days, weeks, months or years).
    pub fn add_period(&self, period: Period) -> TenorResult<Self> {
        self.shift_by(period, 1)
    }

    /// Subtracts a period (days, weeks, months or years).
    pub fn sub_period(&self, period: Period) -> TenorResult<Self> {
        self.shift_by(period, -1)
    }

    fn shift_by(&self, period: Period, sign: i64) -> TenorResult<Self> {
        let n = i64::from(period.multiplier) * sign;
        let months = |n: i64| {
            i32::try_from(n).map_err(|_| TenorError::invalid_frequency(format!("{period} too large")))
        };
        match period.unit {
            TimeUnit::Day => self.add_days(n),
            TimeUnit::Week => self.add_days(n * 7),
            TimeUnit::Month => self.add_months(months(n)?),
            TimeUnit::Year => self.add_years(months(n)?),
        }
    }

    /// Calculates the number of whole days from `self` to `end`.
    ///
    /// # Errors
    ///
    /// Returns `TenorError::InvalidDates` if `end` is before `self`.
    pub fn days_between(&self, end: Date) -> TenorResult<u64> {
        end.timestamp
            .checked_sub(self.timestamp)
            .map(|seconds| seconds / SECONDS_PER_DAY)
            .ok_or_else(|| TenorError::invalid_dates(*self, end))
    }

    /// Returns the first day of the year.
    #[must_use]
    pub fn start_of_year(&self) -> Self {
        Self {
            timestamp: days_from_civil(self.year(), 1, 1) * SECONDS_PER_DAY,
        }
    }

    /// Returns the n-th (1-based) given weekday of a month, if it exists.
    ///
    /// The third Wednesday of March 2024 is 2024-03-20.
    pub fn nth_weekday_of_month(
        year: u32,
        month: u32,
        weekday: Weekday,
        n: u32,
    ) -> TenorResult<Self> {
        let first = Self::from_ymd(year, month, 1)?;
        let offset =
            (7 + weekday.num_days_from_monday() - first.weekday().num_days_from_monday()) % 7;
        let day = 1 + offset + 7 * n.saturating_sub(1);
        Self::from_ymd(year, month, day)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = self.ymd();
        write!(f, "{year:04}-{month:02}-{day:02}")
    }
}

impl std::str::FromStr for Date {
    type Err = TenorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = TenorError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let year = u32::try_from(date.year())
            .map_err(|_| TenorError::invalid_date(format!("{date} is before {MIN_YEAR}")))?;
        Self::from_ymd(year, date.month(), date.day())
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Date::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Returns the number of days in a month.
///
/// Months outside 1-12 report zero days.
#[must_use]
pub fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Returns the number of days in a year.
#[must_use]
pub fn days_in_year(year: u32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Gregorian leap year rule.
#[must_use]
pub fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Days since 1970-01-01 for a valid civil date on or after the epoch.
fn days_from_civil(year: u32, month: u32, day: u32) -> u64 {
    let y = u64::from(if month <= 2 { year - 1 } else { year });
    let m = u64::from(month);
    let d = u64::from(day);

    let era = y / 400;
    let yoe = y - era * 400;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Civil (year, month, day) for a day number since 1970-01-01.
fn civil_from_days(days: u64) -> (u32, u32, u32) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year as u32, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_epoch() {
        let epoch = Date::from_ymd(1970, 1, 1).unwrap();
        assert_eq!(epoch, Date::EPOCH);
        assert_eq!(epoch.timestamp(), 0);
        assert_eq!(epoch.weekday(), Weekday::Thu);
    }

    #[test]
    fn test_known_timestamp() {
        // 2024-01-01T00:00:00Z
        let date = Date::from_ymd(2024, 1, 1).unwrap();
        assert_eq!(date.timestamp(), 1_704_067_200);
        assert_eq!(date.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_from_timestamp_truncates() {
        // 2024-01-01T13:45:10Z
        let date = Date::from_timestamp(1_704_067_200 + 49_510).unwrap();
        assert_eq!(date.ymd(), (2024, 1, 1));
        assert_eq!(date.timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 29).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
        assert!(Date::from_ymd(2025, 4, 31).is_err());
        assert!(Date::from_ymd(1969, 12, 31).is_err());
        assert!(Date::from_ymd(2025, 1, 0).is_err());
        assert!(Date::from_timestamp(u64::MAX).is_err());
    }

    #[test]
    fn test_max_date() {
        let max = Date::from_ymd(9999, 12, 31).unwrap();
        assert_eq!(max.epoch_day(), MAX_EPOCH_DAY);
        assert!(max.add_days(1).is_err());
    }

    #[test]
    fn test_add_days_before_epoch_fails() {
        assert!(Date::EPOCH.add_days(-1).is_err());
    }

    #[test]
    fn test_add_months_clamps() {
        let date = Date::from_ymd(2025, 1, 31).unwrap();
        assert_eq!(date.add_months(1).unwrap().ymd(), (2025, 2, 28));

        let date = Date::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(date.add_months(1).unwrap().ymd(), (2024, 2, 29));
        assert_eq!(date.add_months(3).unwrap().ymd(), (2024, 4, 30));
    }

    #[test]
    fn test_add_months_across_years() {
        let date = Date::from_ymd(2024, 11, 15).unwrap();
        assert_eq!(date.add_months(3).unwrap().ymd(), (2025, 2, 15));
        assert_eq!(date.add_months(-11).unwrap().ymd(), (2023, 12, 15));
        assert_eq!(date.add_months(-23).unwrap().ymd(), (2022, 12, 15));
    }

    #[test]
    fn test_add_years_leap_day() {
        let leap = Date::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(leap.add_years(1).unwrap().ymd(), (2025, 2, 28));
        assert_eq!(leap.add_years(4).unwrap().ymd(), (2028, 2, 29));
    }

    #[test]
    fn test_add_period() {
        let date = Date::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(
            date.add_period(Period::weeks(2)).unwrap().ymd(),
            (2024, 2, 14)
        );
        assert_eq!(
            date.add_period(Period::months(1)).unwrap().ymd(),
            (2024, 2, 29)
        );
        assert_eq!(date.sub_period(Period::years(1)).unwrap().ymd(), (2023, 1, 31));
        assert_eq!(date.add_period(Period::days(0)).unwrap(), date);
    }

    #[test]
    fn test_leap_year() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2025));
        assert!(!is_leap_year(2100));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn test_days_between() {
        let d1 = Date::from_ymd(2025, 1, 1).unwrap();
        let d2 = Date::from_ymd(2025, 1, 31).unwrap();
        assert_eq!(d1.days_between(d2).unwrap(), 30);
        assert_eq!(d1.days_between(d1).unwrap(), 0);
        assert!(matches!(
            d2.days_between(d1),
            Err(TenorError::InvalidDates { .. })
        ));
    }

    #[test]
    fn test_end_of_month() {
        let date = Date::from_ymd(2024, 2, 10).unwrap();
        assert_eq!(date.end_of_month().ymd(), (2024, 2, 29));
        assert!(date.end_of_month().is_last_day_of_february());
        assert!(!date.is_end_of_month());
        assert_eq!(date.start_of_year().ymd(), (2024, 1, 1));
    }

    #[test]
    fn test_with_day_clamped() {
        let date = Date::from_ymd(2025, 2, 10).unwrap();
        assert_eq!(date.with_day_clamped(31).unwrap().ymd(), (2025, 2, 28));
        assert_eq!(date.with_day_clamped(15).unwrap().ymd(), (2025, 2, 15));
    }

    #[test]
    fn test_nth_weekday() {
        let third_wed = Date::nth_weekday_of_month(2024, 3, Weekday::Wed, 3).unwrap();
        assert_eq!(third_wed.ymd(), (2024, 3, 20));

        let third_wed = Date::nth_weekday_of_month(2025, 1, Weekday::Wed, 3).unwrap();
        assert_eq!(third_wed.ymd(), (2025, 1, 15));

        assert!(Date::nth_weekday_of_month(2024, 2, Weekday::Mon, 5).is_err());
    }

    #[test]
    fn test_weekday_detection() {
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert_eq!(saturday.weekday(), Weekday::Sat);
        assert!(saturday.is_weekend());

        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        assert_eq!(sunday.weekday(), Weekday::Sun);
        assert!(sunday.is_weekend());

        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert_eq!(monday.weekday(), Weekday::Mon);
        assert!(!monday.is_weekend());
    }

    #[test]
    fn test_weekday_matches_chrono() {
        let start = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        for offset in (0..2_932_896u64).step_by(997) {
            let date = Date::from_epoch_day(offset).unwrap();
            let naive = start + chrono::Days::new(offset);
            assert_eq!(date.weekday(), naive.weekday(), "{date}");
        }
    }

    #[test]
    fn test_parse_and_display() {
        let date = Date::parse("2025-06-15").unwrap();
        assert_eq!(date.ymd(), (2025, 6, 15));
        assert_eq!(date.to_string(), "2025-06-15");
        assert!(Date::parse("15/06/2025").is_err());
        assert!(Date::parse("1969-12-31").is_err());
    }

    #[test]
    fn test_matches_chrono() {
        let naive = NaiveDate::from_ymd_opt(2031, 8, 17).unwrap();
        let date = Date::try_from(naive).unwrap();
        let expected = naive.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
        assert_eq!(date.timestamp() as i64, expected);
    }

    #[test]
    fn test_serde() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2025-06-15\"");
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
    }
}
