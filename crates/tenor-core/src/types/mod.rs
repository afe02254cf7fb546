//! Core value types: dates, periods and weekdays.

mod date;
mod period;

pub use date::{
    days_in_month, days_in_year, is_leap_year, Date, MAX_YEAR, MIN_YEAR, SECONDS_PER_DAY,
};
pub use period::{Period, TimeUnit};
pub use chrono::Weekday;
