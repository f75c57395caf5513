//! The creature coordinator.
//!
//! An [`Entity`] is the thin layer the rest of a simulation talks to. It
//! owns an identity and one [`Biology`], forwards events to it, and logs
//! what happened. Decision-making and placement live outside this crate;
//! [`Entity::sensor_inputs`] is the narrow view a decision layer gets.

use tracing::{trace, warn};
use vitae_types::EntityId;

use crate::biology::{Biology, TickReport, Vitals};
use crate::error::BiologyError;
use crate::genome::TraitTable;

/// A single creature: an identity plus its biology.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    biology: Biology,
}

impl Entity {
    /// Wrap `biology` under a freshly generated identifier.
    pub fn new(biology: Biology) -> Self {
        Self::with_id(EntityId::new(), biology)
    }

    /// Wrap `biology` under an existing identifier.
    pub const fn with_id(id: EntityId, biology: Biology) -> Self {
        Self { id, biology }
    }

    /// This creature's identifier.
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Read access to the underlying biology.
    pub const fn biology(&self) -> &Biology {
        &self.biology
    }

    /// Write access to the underlying biology.
    pub const fn biology_mut(&mut self) -> &mut Biology {
        &mut self.biology
    }

    /// Whether the creature is dead.
    pub const fn is_dead(&self) -> bool {
        self.biology.check_death()
    }

    /// Eat `amount` of food. Returns the energy actually gained.
    pub fn eat(&mut self, amount: f64) -> f64 {
        let net = self.biology.eat_energy(amount);
        trace!(entity = %self.id, amount, net, "Creature ate");
        net
    }

    /// Drink `amount` of water. Returns the water actually gained.
    pub fn drink(&mut self, amount: f64) -> f64 {
        let net = self.biology.drink_water(amount);
        trace!(entity = %self.id, amount, net, "Creature drank");
        net
    }

    /// Add energy directly, bypassing digestion.
    pub fn add_energy(&mut self, amount: f64) {
        self.biology.add_energy(amount);
    }

    /// Remove energy directly.
    pub fn remove_energy(&mut self, amount: f64) {
        self.biology.add_energy(-amount);
    }

    /// Add water directly, bypassing digestion.
    pub fn add_water(&mut self, amount: f64) {
        self.biology.add_water(amount);
    }

    /// Remove water directly.
    pub fn remove_water(&mut self, amount: f64) {
        self.biology.add_water(-amount);
    }

    /// Add health directly.
    pub fn add_health(&mut self, amount: f64) {
        self.biology.add_health(amount);
    }

    /// Remove health directly.
    pub fn remove_health(&mut self, amount: f64) {
        self.biology.add_health(-amount);
    }

    /// Absorb `amount` of a chemical. Returns the health change.
    ///
    /// # Errors
    ///
    /// Returns [`BiologyError::UnknownTrait`] if `chemical` is not a trait key.
    pub fn add_chemical(&mut self, chemical: &str, amount: f64) -> Result<f64, BiologyError> {
        let delta = self.biology.add_chemical(chemical, amount)?;
        trace!(entity = %self.id, chemical, amount, delta, "Creature absorbed chemical");
        Ok(delta)
    }

    /// Purge `amount` of a chemical, reversing the effect of absorbing it.
    ///
    /// # Errors
    ///
    /// Returns [`BiologyError::UnknownTrait`] if `chemical` is not a trait key.
    pub fn remove_chemical(&mut self, chemical: &str, amount: f64) -> Result<f64, BiologyError> {
        self.add_chemical(chemical, -amount)
    }

    /// Move once across `terrain`. Returns `(energy_cost, water_cost)`.
    ///
    /// Unknown terrain keys fall back to the default terrain, so this
    /// never fails.
    pub fn movement(&mut self, terrain: &str) -> (f64, f64) {
        let energy_cost = self.biology.movement_energy_drain(terrain);
        let water_cost = self.biology.movement_water_drain(terrain);
        trace!(entity = %self.id, terrain, energy_cost, water_cost, "Creature moved");
        (energy_cost, water_cost)
    }

    /// Advance the creature's biology by one tick.
    pub fn update(&mut self) -> TickReport {
        self.biology.update()
    }

    /// Current health, energy and water.
    pub const fn metrics(&self) -> Vitals {
        self.biology.vitals()
    }

    /// The creature's full trait table.
    pub const fn genetics(&self) -> &TraitTable {
        self.biology.efficiencies()
    }

    /// One genetic value by external key, or `None` if no such trait.
    ///
    /// Unlike [`Biology::efficiency`], an unknown key is logged and
    /// swallowed rather than returned as an error.
    pub fn genetic_value(&self, gene: &str) -> Option<f64> {
        match self.biology.efficiency(gene) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(entity = %self.id, gene, %err, "Genetic lookup failed");
                None
            }
        }
    }

    /// The resource levels a decision layer sees: `[health, energy, water]`.
    pub const fn sensor_inputs(&self) -> [f64; 3] {
        let vitals = self.biology.vitals();
        [vitals.health, vitals.energy, vitals.water]
    }
}
