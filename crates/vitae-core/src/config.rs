//! Configuration loading and typed config structures for the Vitae simulation.
//!
//! The configuration lives in `vitae-config.yaml`. This module defines
//! strongly-typed structs that mirror the YAML structure, and a loader that
//! reads and validates the file. Every section and field is optional; a
//! missing file or an empty document yields the defaults.

use std::path::Path;

use serde::Deserialize;
use vitae_biology::{BiologyConfig, BiologyError, TraitKind};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds an invalid value.
    #[error("invalid config: {source}")]
    Invalid {
        /// The validation failure.
        #[from]
        source: BiologyError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `vitae-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Seed and trait-generation mode.
    #[serde(default)]
    pub world: WorldConfig,

    /// Population parameters.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Simulation boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// What every living creature receives and does each tick.
    #[serde(default)]
    pub feeding: FeedingConfig,

    /// Biology coefficients shared by every creature.
    #[serde(default)]
    pub biology: BiologyConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value fails validation.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty mapping.
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a biology coefficient is invalid
    /// or the configured chemical is not a trait key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.biology.validate()?;
        if let Some(chemical) = &self.feeding.chemical {
            chemical.parse::<TraitKind>().map_err(BiologyError::from)?;
        }
        Ok(())
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducible trait rolls.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Give every creature the reference trait vector instead of rolling.
    #[serde(default)]
    pub deterministic: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            deterministic: false,
        }
    }
}

/// Population configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Number of creatures to spawn at simulation start.
    #[serde(default = "default_initial_creatures")]
    pub initial_creatures: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_creatures: default_initial_creatures(),
        }
    }
}

/// Simulation boundary configuration.
///
/// A value of 0 for `max_ticks` means unlimited; the run then ends only on
/// extinction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of ticks before the simulation ends (0 = unlimited).
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
        }
    }
}

/// Per-tick ration and activity applied to every living creature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedingConfig {
    /// Food offered each tick, before energy efficiency.
    #[serde(default = "default_food_per_tick")]
    pub food_per_tick: f64,

    /// Water offered each tick, before water efficiency.
    #[serde(default = "default_water_per_tick")]
    pub water_per_tick: f64,

    /// Terrain key crossed on each move. Unknown keys use the default terrain.
    #[serde(default = "default_terrain")]
    pub terrain: String,

    /// Moves made each tick.
    #[serde(default = "default_moves_per_tick")]
    pub moves_per_tick: u32,

    /// Chemical absorbed each tick, if any. Must be a trait key.
    #[serde(default)]
    pub chemical: Option<String>,

    /// Quantity of `chemical` absorbed each tick.
    #[serde(default)]
    pub chemical_per_tick: f64,
}

impl Default for FeedingConfig {
    fn default() -> Self {
        Self {
            food_per_tick: default_food_per_tick(),
            water_per_tick: default_water_per_tick(),
            terrain: default_terrain(),
            moves_per_tick: default_moves_per_tick(),
            chemical: None,
            chemical_per_tick: 0.0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log a progress line every N ticks (0 = never).
    #[serde(default = "default_progress_interval_ticks")]
    pub progress_interval_ticks: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            progress_interval_ticks: default_progress_interval_ticks(),
        }
    }
}

const fn default_seed() -> u64 {
    42
}

const fn default_initial_creatures() -> u32 {
    10
}

const fn default_max_ticks() -> u64 {
    1000
}

const fn default_food_per_tick() -> f64 {
    0.3
}

const fn default_water_per_tick() -> f64 {
    0.3
}

fn default_terrain() -> String {
    TraitKind::DEFAULT_TERRAIN.name().to_owned()
}

const fn default_moves_per_tick() -> u32 {
    1
}

fn default_log_level() -> String {
    String::from("info")
}

const fn default_progress_interval_ticks() -> u64 {
    100
}
