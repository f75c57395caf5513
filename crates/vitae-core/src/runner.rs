//! Population tick loop.
//!
//! This module provides [`run_simulation`], which drives a population of
//! creatures until every creature is dead or the tick limit is reached.
//!
//! Each tick, every living creature, in spawn order:
//!
//! 1. Eats `food_per_tick` and drinks `water_per_tick`
//! 2. Moves `moves_per_tick` times across the configured terrain
//! 3. Absorbs the configured chemical, if any
//! 4. Advances its biology by one tick
//!
//! Creatures are independent; the order only matters for log output.
//! Dead creatures stay in the population but are skipped.

use rand::Rng;
use tracing::{debug, info, warn};
use vitae_biology::{Biology, BiologyConfig, BiologyError, Entity, EntityId};

use crate::config::{FeedingConfig, SimulationConfig};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A biology operation failed for one creature.
    #[error("biology error for {entity_id}: {source}")]
    Biology {
        /// The creature that caused the error.
        entity_id: EntityId,
        /// The underlying biology error.
        source: BiologyError,
    },
}

/// Why the simulation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// All creatures are dead.
    Extinction,
}

/// Summary of a single completed tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed (1-based).
    pub tick: u64,
    /// Number of living creatures at end of tick.
    pub alive: u32,
    /// Creatures that died during this tick.
    pub deaths: Vec<EntityId>,
}

/// Result of the simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
    /// Total number of creatures that died during the run.
    pub total_deaths: u32,
}

/// Callback invoked after each tick completes.
pub trait TickCallback {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {}
}

/// The mutable state of a running simulation.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Number of ticks completed so far.
    pub tick: u64,
    /// Every creature ever spawned, living or dead, in spawn order.
    pub creatures: Vec<Entity>,
}

impl SimulationState {
    /// Wrap an existing population at tick 0.
    pub const fn new(creatures: Vec<Entity>) -> Self {
        Self { tick: 0, creatures }
    }

    /// Number of creatures still alive.
    pub fn alive_count(&self) -> u32 {
        let alive = self.creatures.iter().filter(|c| !c.is_dead()).count();
        u32::try_from(alive).unwrap_or(u32::MAX)
    }
}

/// Spawn `count` creatures sharing `biology`.
///
/// In deterministic mode every creature carries the reference traits and
/// `rng` is not consulted. Otherwise traits are rolled from `rng`, so a
/// seeded generator reproduces the same population.
pub fn spawn_population(
    count: u32,
    biology: BiologyConfig,
    deterministic: bool,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    (0..count)
        .map(|_| {
            let bio = if deterministic {
                Biology::with_config(biology, true)
            } else {
                Biology::with_rng(biology, rng)
            };
            Entity::new(bio)
        })
        .collect()
}

/// Apply one tick's ration and activity to a single living creature.
fn live_one_tick(entity: &mut Entity, feeding: &FeedingConfig) -> Result<(), BiologyError> {
    entity.eat(feeding.food_per_tick);
    entity.drink(feeding.water_per_tick);
    for _ in 0..feeding.moves_per_tick {
        entity.movement(&feeding.terrain);
    }
    if let Some(chemical) = &feeding.chemical {
        entity.add_chemical(chemical, feeding.chemical_per_tick)?;
    }
    entity.update();
    Ok(())
}

/// Execute one tick for every living creature.
///
/// # Errors
///
/// Returns [`RunnerError::Biology`] if a creature rejects the configured
/// chemical. Creatures earlier in spawn order have already been advanced.
pub fn run_tick(
    state: &mut SimulationState,
    feeding: &FeedingConfig,
) -> Result<TickSummary, RunnerError> {
    let tick = state.tick.saturating_add(1);
    let mut deaths = Vec::new();

    for entity in state.creatures.iter_mut().filter(|c| !c.is_dead()) {
        live_one_tick(entity, feeding).map_err(|source| RunnerError::Biology {
            entity_id: entity.id(),
            source,
        })?;
        if entity.is_dead() {
            let vitals = entity.metrics();
            info!(
                tick,
                entity = %entity.id(),
                energy = vitals.energy,
                water = vitals.water,
                "Creature died"
            );
            deaths.push(entity.id());
        }
    }

    state.tick = tick;
    let summary = TickSummary {
        tick,
        alive: state.alive_count(),
        deaths,
    };
    debug!(tick, alive = summary.alive, deaths = summary.deaths.len(), "Tick completed");
    Ok(summary)
}

/// Run the simulation loop until a termination condition is met.
///
/// Stops after `config.simulation.max_ticks` ticks (never, if zero) or as
/// soon as no creature is alive. An empty starting population ends
/// immediately with [`SimulationEndReason::Extinction`] and zero ticks.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick execution fails.
pub fn run_simulation(
    state: &mut SimulationState,
    config: &SimulationConfig,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let max_ticks = config.simulation.max_ticks;
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;
    let mut total_deaths: u32 = 0;

    info!(
        creatures = state.creatures.len(),
        max_ticks,
        "Simulation starting"
    );

    loop {
        // --- Check extinction (before tick) ---
        if state.alive_count() == 0 {
            info!(tick = state.tick, "All creatures dead -- extinction");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::Extinction,
                final_summary: last_summary,
                total_ticks,
                total_deaths,
            });
        }

        // --- Check tick limit (before tick) ---
        if max_ticks > 0 && total_ticks >= max_ticks {
            info!(tick = state.tick, max_ticks, "Tick limit reached");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::MaxTicksReached,
                final_summary: last_summary,
                total_ticks,
                total_deaths,
            });
        }

        // --- Execute tick ---
        let summary = run_tick(state, &config.feeding)?;
        total_ticks = total_ticks.saturating_add(1);
        let died = u32::try_from(summary.deaths.len()).unwrap_or(u32::MAX);
        total_deaths = total_deaths.saturating_add(died);

        callback.on_tick(&summary, state);
        last_summary = Some(summary);
    }
}

/// Log the outcome of a finished run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        total_deaths = result.total_deaths,
        final_alive = result.final_summary.as_ref().map(|s| s.alive),
        "Simulation ended"
    );

    if result.final_summary.is_none() {
        warn!("Simulation ended with no ticks executed");
    }
}
