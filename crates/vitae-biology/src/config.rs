//! Tuning coefficients for creature biology.
//!
//! The [`BiologyConfig`] struct bundles every coefficient the biology
//! formulas reference. It is read once (usually from the `biology` key of
//! `vitae-config.yaml`), validated, and copied into each [`Biology`] at
//! construction, so coefficients cannot change while a creature lives.
//!
//! [`Biology`]: crate::biology::Biology

use serde::{Deserialize, Serialize};

use crate::error::BiologyError;

/// Process-wide coefficients for the biology formulas.
///
/// All coefficients default to `1.0`, which reproduces the reference
/// behavior of the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiologyConfig {
    /// Scales the per-tick metabolic energy drain (default: 1.0).
    #[serde(default = "default_coefficient")]
    pub energy_drain_coefficient: f64,

    /// Scales the energy cost of moving across terrain (default: 1.0).
    #[serde(default = "default_coefficient")]
    pub terrain_energy_coefficient: f64,

    /// Scales the water cost of moving across terrain (default: 1.0).
    #[serde(default = "default_coefficient")]
    pub terrain_water_coefficient: f64,

    /// Scales the health effect of absorbed chemicals (default: 1.0).
    #[serde(default = "default_coefficient")]
    pub health_coefficient: f64,

    /// Penalize food intake by body mass (default: false).
    ///
    /// When enabled, the energy gained from eating is additionally
    /// multiplied by `sqrt(1 - Mass)`, so heavy creatures extract less
    /// from the same meal.
    #[serde(default)]
    pub mass_scaled_intake: bool,
}

impl Default for BiologyConfig {
    fn default() -> Self {
        Self {
            energy_drain_coefficient: default_coefficient(),
            terrain_energy_coefficient: default_coefficient(),
            terrain_water_coefficient: default_coefficient(),
            health_coefficient: default_coefficient(),
            mass_scaled_intake: false,
        }
    }
}

impl BiologyConfig {
    /// Check that every coefficient is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`BiologyError::InvalidCoefficient`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), BiologyError> {
        let fields = [
            ("energy_drain_coefficient", self.energy_drain_coefficient),
            ("terrain_energy_coefficient", self.terrain_energy_coefficient),
            ("terrain_water_coefficient", self.terrain_water_coefficient),
            ("health_coefficient", self.health_coefficient),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(BiologyError::InvalidCoefficient { name, value });
            }
        }
        Ok(())
    }
}

const fn default_coefficient() -> f64 {
    1.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = BiologyConfig::default();
        assert!((cfg.energy_drain_coefficient - 1.0).abs() < f64::EPSILON);
        assert!((cfg.terrain_energy_coefficient - 1.0).abs() < f64::EPSILON);
        assert!((cfg.terrain_water_coefficient - 1.0).abs() < f64::EPSILON);
        assert!((cfg.health_coefficient - 1.0).abs() < f64::EPSILON);
        assert!(!cfg.mass_scaled_intake);
    }

    #[test]
    fn defaults_validate() {
        assert!(BiologyConfig::default().validate().is_ok());
    }

    #[test]
    fn negative_coefficient_rejected() {
        let cfg = BiologyConfig {
            health_coefficient: -0.5,
            ..BiologyConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(BiologyError::InvalidCoefficient {
                name: "health_coefficient",
                ..
            })
        ));
    }

    #[test]
    fn non_finite_coefficient_rejected() {
        let cfg = BiologyConfig {
            terrain_water_coefficient: f64::NAN,
            ..BiologyConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let parsed: Result<BiologyConfig, _> =
            serde_json::from_str(r#"{"energy_drain_coefficient": 2.5, "mass_scaled_intake": true}"#);
        let cfg = parsed.unwrap();
        assert!((cfg.energy_drain_coefficient - 2.5).abs() < f64::EPSILON);
        assert!((cfg.health_coefficient - 1.0).abs() < f64::EPSILON);
        assert!(cfg.mass_scaled_intake);
    }
}
