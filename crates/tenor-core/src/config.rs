//! Engine limits configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{TenorError, TenorResult};

/// Default ceiling on calculation periods per schedule.
pub const DEFAULT_MAX_PERIODS: usize = 1_000;

/// Default ceiling on observations per calculation period.
pub const DEFAULT_MAX_OBSERVATIONS: usize = 1_000;

/// Ceilings on generated collections.
///
/// Schedule and observation generation stop with an error instead of
/// producing more entries than these.
///
/// ```rust
/// use tenor_core::EngineLimits;
///
/// let limits = EngineLimits::from_toml_str("max_periods = 240").unwrap();
/// assert_eq!(limits.max_periods, 240);
/// assert_eq!(limits.max_observations, 1_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineLimits {
    /// Maximum calculation periods in one schedule.
    #[serde(default = "default_max_periods")]
    pub max_periods: usize,

    /// Maximum observations in one calculation period.
    #[serde(default = "default_max_observations")]
    pub max_observations: usize,
}

fn default_max_periods() -> usize {
    DEFAULT_MAX_PERIODS
}

fn default_max_observations() -> usize {
    DEFAULT_MAX_OBSERVATIONS
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_periods: DEFAULT_MAX_PERIODS,
            max_observations: DEFAULT_MAX_OBSERVATIONS,
        }
    }
}

impl EngineLimits {
    /// Sets the period ceiling.
    #[must_use]
    pub fn with_max_periods(mut self, max_periods: usize) -> Self {
        self.max_periods = max_periods;
        self
    }

    /// Sets the observation ceiling.
    #[must_use]
    pub fn with_max_observations(mut self, max_observations: usize) -> Self {
        self.max_observations = max_observations;
        self
    }

    /// Checks that both ceilings are usable.
    pub fn validate(&self) -> TenorResult<()> {
        if self.max_periods == 0 {
            return Err(TenorError::config("max_periods must be at least 1"));
        }
        if self.max_observations == 0 {
            return Err(TenorError::config("max_observations must be at least 1"));
        }
        Ok(())
    }

    /// Parses and validates limits from TOML text.
    pub fn from_toml_str(content: &str) -> TenorResult<Self> {
        let limits: Self = toml::from_str(content).map_err(|e| TenorError::config(e.to_string()))?;
        limits.validate()?;
        Ok(limits)
    }

    /// Loads limits from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> TenorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| TenorError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let limits = EngineLimits::default();
        assert_eq!(limits.max_periods, 1_000);
        assert_eq!(limits.max_observations, 1_000);
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        assert_eq!(EngineLimits::from_toml_str("").unwrap(), EngineLimits::default());
    }

    #[test]
    fn test_rejects_zero() {
        let err = EngineLimits::from_toml_str("max_observations = 0").unwrap_err();
        assert!(matches!(err, TenorError::Config { .. }));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(EngineLimits::from_toml_str("max_cashflows = 5").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_periods = 12\nmax_observations = 31").unwrap();

        let limits = EngineLimits::from_file(file.path()).unwrap();
        assert_eq!(limits, EngineLimits::default().with_max_periods(12).with_max_observations(31));
    }

    #[test]
    fn test_missing_file() {
        assert!(EngineLimits::from_file("/nonexistent/tenor.toml").is_err());
    }
}
