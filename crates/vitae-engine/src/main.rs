//! Engine binary for the Vitae simulation.
//!
//! Loads configuration, spawns a population of creatures, and runs the
//! tick loop until extinction or the tick limit.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `vitae-config.yaml` (or `VITAE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Spawn the starting population from a seeded RNG
//! 4. Run the simulation loop
//! 5. Log the result and the survivors

mod error;

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use vitae_core::config::SimulationConfig;
use vitae_core::runner::{self, SimulationState, TickCallback, TickSummary};

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "vitae-config.yaml";

/// Logs a progress line every `interval` ticks.
struct ProgressLogger {
    interval: u64,
}

impl TickCallback for ProgressLogger {
    fn on_tick(&mut self, summary: &TickSummary, _state: &SimulationState) {
        if self.interval > 0 && summary.tick % self.interval == 0 {
            info!(tick = summary.tick, alive = summary.alive, "Progress");
        }
    }
}

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration loading or the simulation fails.
fn main() -> Result<(), EngineError> {
    // 1. Load configuration. Logging is not up yet, so remember whether
    //    defaults were used and report it afterwards.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("vitae-engine starting");
    match &source {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }
    info!(
        seed = config.world.seed,
        deterministic = config.world.deterministic,
        initial_creatures = config.population.initial_creatures,
        max_ticks = config.simulation.max_ticks,
        "Configuration"
    );

    // 3. Spawn the starting population.
    let mut rng = StdRng::seed_from_u64(config.world.seed);
    let creatures = runner::spawn_population(
        config.population.initial_creatures,
        config.biology,
        config.world.deterministic,
        &mut rng,
    );
    for creature in &creatures {
        debug!(entity = %creature.id(), genetics = %creature.genetics(), "Creature spawned");
    }
    let mut state = SimulationState::new(creatures);

    // 4. Run the simulation loop.
    let mut progress = ProgressLogger {
        interval: config.logging.progress_interval_ticks,
    };
    let result = runner::run_simulation(&mut state, &config, &mut progress)?;

    // 5. Log the result.
    runner::log_simulation_end(&result);
    for survivor in state.creatures.iter().filter(|c| !c.is_dead()) {
        let vitals = survivor.metrics();
        info!(
            entity = %survivor.id(),
            health = vitals.health,
            energy = vitals.energy,
            water = vitals.water,
            "Survivor"
        );
    }

    Ok(())
}

/// Load configuration from `VITAE_CONFIG` or [`DEFAULT_CONFIG_PATH`].
///
/// Returns the config and the path it came from, or `None` if the file
/// does not exist and defaults were used.
fn load_config() -> Result<(SimulationConfig, Option<PathBuf>), EngineError> {
    let path = std::env::var_os("VITAE_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = SimulationConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        Ok((SimulationConfig::default(), None))
    }
}
