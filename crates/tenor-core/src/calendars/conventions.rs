//! Business day adjustment conventions.

use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{BusinessCenters, Calendar, MAX_ADJUSTMENT_DAYS};
use crate::error::{TenorError, TenorResult};
use crate::types::Date;

/// Business day adjustment conventions.
///
/// These conventions specify how to adjust a date that falls
/// on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment - use the date as-is even if not a business day.
    None,

    /// Move to the following business day.
    Following,

    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    #[default]
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Move to the preceding business day, unless it crosses a month boundary,
    /// in which case move to the following business day.
    ModifiedPreceding,

    /// Move to whichever business day is closer; ties go forward.
    Nearest,
}

impl BusinessDayConvention {
    /// Returns all conventions.
    #[must_use]
    pub fn all() -> &'static [BusinessDayConvention] {
        &[
            BusinessDayConvention::None,
            BusinessDayConvention::Following,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::Preceding,
            BusinessDayConvention::ModifiedPreceding,
            BusinessDayConvention::Nearest,
        ]
    }

    /// ISDA short name.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            BusinessDayConvention::None => "NONE",
            BusinessDayConvention::Following => "FOLLOWING",
            BusinessDayConvention::ModifiedFollowing => "MODFOLLOWING",
            BusinessDayConvention::Preceding => "PRECEDING",
            BusinessDayConvention::ModifiedPreceding => "MODPRECEDING",
            BusinessDayConvention::Nearest => "NEAREST",
        }
    }
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusinessDayConvention::None => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Nearest => "Nearest",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BusinessDayConvention {
    type Err = TenorError;

    fn from_str(s: &str) -> TenorResult<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "NONE" | "UNADJUSTED" => Ok(BusinessDayConvention::None),
            "F" | "FOLLOWING" => Ok(BusinessDayConvention::Following),
            "MF" | "MODFOLLOWING" | "MODIFIEDFOLLOWING" => {
                Ok(BusinessDayConvention::ModifiedFollowing)
            }
            "P" | "PRECEDING" => Ok(BusinessDayConvention::Preceding),
            "MP" | "MODPRECEDING" | "MODIFIEDPRECEDING" => {
                Ok(BusinessDayConvention::ModifiedPreceding)
            }
            "NEAREST" => Ok(BusinessDayConvention::Nearest),
            _ => Err(TenorError::unsupported("business day convention", s)),
        }
    }
}

/// A convention applied in a set of business centres.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDayAdjustments {
    /// Adjustment convention.
    pub convention: BusinessDayConvention,
    /// Centres whose calendars define business days.
    #[serde(default)]
    pub business_centers: BusinessCenters,
}

impl BusinessDayAdjustments {
    /// Creates adjustments for the given convention and centres.
    #[must_use]
    pub fn new(convention: BusinessDayConvention, business_centers: BusinessCenters) -> Self {
        Self {
            convention,
            business_centers,
        }
    }

    /// No adjustment.
    #[must_use]
    pub fn unadjusted() -> Self {
        Self::new(BusinessDayConvention::None, BusinessCenters::new())
    }

    /// Applies the convention to a date.
    pub fn apply(&self, date: Date) -> TenorResult<Date> {
        adjust(date, self.convention, &self.business_centers)
    }
}

/// Adjusts a date according to the given business day convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> TenorResult<Date> {
    if convention == BusinessDayConvention::None || calendar.is_business_day(date) {
        return Ok(date);
    }

    let adjusted = match convention {
        BusinessDayConvention::None => date,

        BusinessDayConvention::Following => following(date, calendar)?,

        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar)?;
            if adjusted.month() != date.month() {
                // Crossed month boundary, go preceding instead
                preceding(date, calendar)?
            } else {
                adjusted
            }
        }

        BusinessDayConvention::Preceding => preceding(date, calendar)?,

        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = preceding(date, calendar)?;
            if adjusted.month() != date.month() {
                // Crossed month boundary, go following instead
                following(date, calendar)?
            } else {
                adjusted
            }
        }

        BusinessDayConvention::Nearest => {
            let fwd = following(date, calendar)?;
            let back = preceding(date, calendar)?;

            let fwd_days = date.days_between(fwd)?;
            let back_days = back.days_between(date)?;

            if fwd_days <= back_days {
                fwd
            } else {
                back
            }
        }
    };

    trace!("adjusted {date} to {adjusted} ({convention})");
    Ok(adjusted)
}

/// Returns the next business day on or after the given date.
fn following<C: Calendar + ?Sized>(date: Date, calendar: &C) -> TenorResult<Date> {
    walk(date, 1, calendar)
}

/// Returns the previous business day on or before the given date.
fn preceding<C: Calendar + ?Sized>(date: Date, calendar: &C) -> TenorResult<Date> {
    walk(date, -1, calendar)
}

fn walk<C: Calendar + ?Sized>(start: Date, step: i64, calendar: &C) -> TenorResult<Date> {
    let mut date = start;
    for _ in 0..MAX_ADJUSTMENT_DAYS {
        if calendar.is_business_day(date) {
            return Ok(date);
        }
        date = date.add_days(step)?;
    }
    if calendar.is_business_day(date) {
        return Ok(date);
    }
    Err(TenorError::MaxAdjustmentsExceeded {
        date: start,
        limit: MAX_ADJUSTMENT_DAYS,
    })
}
