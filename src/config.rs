//! Analysis configuration
//!
//! Defaults for the analysis windows and the TEF multiplier, overridable
//! through `BODYINTEL_*` environment variables.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::intelligence::constants::{
    DEFAULT_CALIBRATION_PERIOD_DAYS, DEFAULT_PERIOD_DAYS, DEFAULT_ROLLING_WINDOW_DAYS,
    DEFAULT_TEF_MULTIPLIER, MAX_TEF_MULTIPLIER, MIN_TEF_MULTIPLIER,
};

pub const ENV_PERIOD_DAYS: &str = "BODYINTEL_PERIOD_DAYS";
pub const ENV_ROLLING_WINDOW_DAYS: &str = "BODYINTEL_ROLLING_WINDOW_DAYS";
pub const ENV_CALIBRATION_PERIOD_DAYS: &str = "BODYINTEL_CALIBRATION_PERIOD_DAYS";
pub const ENV_TEF_MULTIPLIER: &str = "BODYINTEL_TEF_MULTIPLIER";

/// Tunable analysis parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Trailing period for the body intelligence report
    pub period_days: u32,
    /// Window for rolling weight averages
    pub rolling_window_days: u32,
    /// Trailing period for TDEE calibration
    pub calibration_period_days: u32,
    /// Thermic-effect-of-food multiplier applied to wearable TDEE
    pub tef_multiplier: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            period_days: DEFAULT_PERIOD_DAYS,
            rolling_window_days: DEFAULT_ROLLING_WINDOW_DAYS,
            calibration_period_days: DEFAULT_CALIBRATION_PERIOD_DAYS,
            tef_multiplier: DEFAULT_TEF_MULTIPLIER,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> EngineResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            period_days: parse_days(&lookup, ENV_PERIOD_DAYS)?.unwrap_or(defaults.period_days),
            rolling_window_days: parse_days(&lookup, ENV_ROLLING_WINDOW_DAYS)?
                .unwrap_or(defaults.rolling_window_days),
            calibration_period_days: parse_days(&lookup, ENV_CALIBRATION_PERIOD_DAYS)?
                .unwrap_or(defaults.calibration_period_days),
            tef_multiplier: match lookup(ENV_TEF_MULTIPLIER) {
                Some(raw) => raw.trim().parse::<f64>().map_err(|e| EngineError::InvalidConfig {
                    key: ENV_TEF_MULTIPLIER.to_string(),
                    message: e.to_string(),
                })?,
                None => defaults.tef_multiplier,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable by the engine
    pub fn validate(&self) -> EngineResult<()> {
        if !self.tef_multiplier.is_finite()
            || self.tef_multiplier < MIN_TEF_MULTIPLIER
            || self.tef_multiplier > MAX_TEF_MULTIPLIER
        {
            return Err(EngineError::InvalidConfig {
                key: ENV_TEF_MULTIPLIER.to_string(),
                message: format!(
                    "{} is outside [{}, {}]",
                    self.tef_multiplier, MIN_TEF_MULTIPLIER, MAX_TEF_MULTIPLIER
                ),
            });
        }
        Ok(())
    }
}

fn parse_days<F>(lookup: &F, key: &str) -> EngineResult<Option<u32>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };

    let days = raw.trim().parse::<u32>().map_err(|e| EngineError::InvalidConfig {
        key: key.to_string(),
        message: e.to_string(),
    })?;

    if days == 0 {
        return Err(EngineError::InvalidConfig {
            key: key.to_string(),
            message: "must be at least 1 day".to_string(),
        });
    }

    Ok(Some(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = AnalysisConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.period_days, 30);
        assert_eq!(config.rolling_window_days, 7);
        assert_eq!(config.calibration_period_days, 14);
        assert!((config.tef_multiplier - 1.10).abs() < 1e-9);
    }

    #[test]
    fn test_overrides() {
        let config = AnalysisConfig::from_lookup(lookup_from(&[
            (ENV_PERIOD_DAYS, "60"),
            (ENV_TEF_MULTIPLIER, "1.15"),
        ]))
        .unwrap();
        assert_eq!(config.period_days, 60);
        assert_eq!(config.calibration_period_days, 14);
        assert!((config.tef_multiplier - 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_zero_days() {
        let err = AnalysisConfig::from_lookup(lookup_from(&[(ENV_ROLLING_WINDOW_DAYS, "0")]))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { .. }));
    }

    #[test]
    fn test_rejects_out_of_range_tef() {
        let err =
            AnalysisConfig::from_lookup(lookup_from(&[(ENV_TEF_MULTIPLIER, "1.5")])).unwrap_err();
        assert!(err.to_string().contains(ENV_TEF_MULTIPLIER));

        assert!(AnalysisConfig::from_lookup(lookup_from(&[(ENV_TEF_MULTIPLIER, "abc")])).is_err());
    }
}
