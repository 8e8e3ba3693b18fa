//! Rating system configuration

use crate::error::PtiError;
use serde::{Deserialize, Serialize};

/// Base K-factor before the experience multiplier is applied
pub const DEFAULT_BASE_K_FACTOR: f64 = 5.59;

/// Tunables for the PTI adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSettings {
    pub base_k_factor: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            base_k_factor: DEFAULT_BASE_K_FACTOR,
        }
    }
}

impl RatingSettings {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.base_k_factor.is_finite() || self.base_k_factor <= 0.0 {
            return Err(PtiError::ConfigurationError {
                message: format!(
                    "Base K-factor must be positive and finite, got {}",
                    self.base_k_factor
                ),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let settings = RatingSettings::default();
        assert_eq!(settings.base_k_factor, 5.59);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_k_factor() {
        for k in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let settings = RatingSettings { base_k_factor: k };
            assert!(settings.validate().is_err(), "k={} should be rejected", k);
        }
    }
}
