use validator::{Validate, ValidationError};

use crate::mcmc::CELSIUS_OFFSET;

fn validate_sim_config(cfg: &SimConfig) -> Result<(), ValidationError> {
    if cfg.size < 1 {
        return Err(ValidationError::new("size must be >= 1"));
    }
    if !cfg.temperature_celsius.is_finite() {
        return Err(ValidationError::new("temperature_celsius must be finite"));
    }
    if cfg.temperature_celsius + CELSIUS_OFFSET < 0.0 {
        return Err(ValidationError::new(
            "temperature_celsius must not be below absolute zero",
        ));
    }
    if let Some(limit) = cfg.max_attempts {
        if limit < cfg.target_accepted {
            return Err(ValidationError::new(
                "max_attempts must be >= target_accepted",
            ));
        }
    }
    Ok(())
}

/// Parameters of one run: grid side, seed of the initial configuration,
/// number of flips to accept and temperature in Celsius.
#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = "validate_sim_config"))]
pub struct SimConfig {
    pub size: usize,
    pub seed: u64,
    pub target_accepted: u64,
    pub temperature_celsius: f64,
    /// Optional cap on proposals; `None` lets the run go on until the target
    /// is met, however long that takes.
    pub max_attempts: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            size: 100,
            seed: 93,
            target_accepted: 100_000,
            temperature_celsius: 100.0,
            max_attempts: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_size() {
        let cfg = SimConfig {
            size: 0,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_temperature() {
        for t in [f64::NAN, f64::INFINITY, -273.16] {
            let cfg = SimConfig {
                temperature_celsius: t,
                ..SimConfig::default()
            };
            assert!(cfg.validate().is_err(), "{t} should be rejected");
        }
        let cfg = SimConfig {
            temperature_celsius: -273.15,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_attempt_limit_below_target() {
        let cfg = SimConfig {
            target_accepted: 10,
            max_attempts: Some(9),
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = SimConfig {
            target_accepted: 10,
            max_attempts: Some(10),
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
