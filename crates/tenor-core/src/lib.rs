//! # Tenor Core
//!
//! Calendar arithmetic, day counts and business-day conventions for the Tenor
//! interest calculation engine.
//!
//! This crate provides the date layer every calculation builds on:
//!
//! - **Types**: [`Date`] (a day-aligned Unix timestamp), [`Period`] and [`Weekday`]
//! - **Day Count Conventions**: ISDA year fractions as exact fixed-point values
//! - **Business Day Calendars**: weekend detection and ISDA adjustment conventions
//! - **Configuration**: [`EngineLimits`] for schedule and observation ceilings
//!
//! ## Example
//!
//! ```rust
//! use tenor_core::prelude::*;
//!
//! let start = Date::from_ymd(2025, 5, 31).unwrap();
//! let adjusted = WeekendCalendar
//!     .adjust(start, BusinessDayConvention::ModifiedFollowing)
//!     .unwrap();
//! assert_eq!(adjusted.to_string(), "2025-05-30");
//!
//! let end = start.add_months(3).unwrap();
//! let yf = DayCountConvention::Act360
//!     .to_day_count(None, 0)
//!     .year_fraction(adjusted, end)
//!     .unwrap();
//! assert_eq!(yf.to_string(), "0.258333333333333333");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod config;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BusinessCenter, BusinessCenters, BusinessDayAdjustments, BusinessDayConvention, Calendar,
        WeekendCalendar,
    };
    pub use crate::config::EngineLimits;
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{TenorError, TenorResult};
    pub use crate::types::{Date, Period, TimeUnit, Weekday};
}

// Re-export commonly used types at crate root
pub use config::EngineLimits;
pub use error::{TenorError, TenorResult};
pub use types::{Date, Period, TimeUnit, Weekday};
