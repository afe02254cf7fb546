//! CLI command implementations.

pub mod adjust;
pub mod compound;
pub mod daycount;
pub mod interest;
pub mod observations;
pub mod schedule;

pub use adjust::AdjustArgs;
pub use compound::CompoundArgs;
pub use daycount::DayCountArgs;
pub use interest::InterestArgs;
pub use observations::ObservationsArgs;
pub use schedule::ScheduleArgs;

use tenor_core::calendars::BusinessCenters;
use tenor_core::types::Date;
use tenor_math::FixedPoint;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses an optional date argument.
pub fn parse_optional_date(s: Option<&str>) -> CliResult<Option<Date>> {
    s.map(parse_date).transpose()
}

/// Parses a decimal string exactly into fixed point.
pub fn parse_fixed(field: &'static str, s: &str) -> CliResult<FixedPoint> {
    s.parse().map_err(|_| CliError::InvalidNumber {
        field,
        value: s.to_string(),
    })
}

/// Parses a comma-separated list of decimals.
pub fn parse_fixed_list(field: &'static str, s: &str) -> CliResult<Vec<FixedPoint>> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| parse_fixed(field, part))
        .collect()
}

/// Parses business centres such as `USNY+GBLO`; empty means weekends only.
pub fn parse_centers(s: Option<&str>) -> CliResult<BusinessCenters> {
    match s {
        None => Ok(BusinessCenters::new()),
        Some(s) => s
            .parse()
            .map_err(|e: tenor_core::TenorError| CliError::Config(e.to_string())),
    }
}
