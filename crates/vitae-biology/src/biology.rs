//! The per-creature biology engine.
//!
//! A [`Biology`] owns a creature's [`TraitTable`] and its three resource
//! levels. Every method is a closed-form formula over those values; the
//! engine never looks at the world or the clock, and the caller decides
//! when a tick happens by calling [`Biology::update`].
//!
//! # Resource bounds
//!
//! - Every `add_*` saturates at [`MAX_LEVEL`]. There is no floor on add.
//! - [`Biology::update`] floors energy and water at zero before applying
//!   the tick drains. Health is never floored; a creature at or below
//!   zero health is dead (see [`Biology::check_death`]).

use rand::Rng;
use serde::Serialize;
use tracing::debug;
use vitae_types::TraitKind;

use crate::config::BiologyConfig;
use crate::error::BiologyError;
use crate::genome::TraitTable;

/// Upper bound for health, energy and water.
pub const MAX_LEVEL: f64 = 1.0;

/// Health, energy and water of a newborn creature.
pub const STARTING_LEVEL: f64 = 1.0;

/// Smallest energy or water cost of a single movement.
pub const MIN_MOVEMENT_COST: f64 = 0.01;

/// Smallest per-tick metabolic load, before the drain coefficient.
pub const MIN_METABOLIC_LOAD: f64 = 0.02;

/// Chemical tolerance at which a chemical has no effect on health.
pub const CHEMICAL_NEUTRAL_POINT: f64 = 0.5;

/// Exponent applied to Mass when it contributes to metabolic load.
const MASS_LOAD_EXPONENT: f64 = 0.2;

/// Divisor of the metabolic load: one per [`TraitKind`].
const TRAIT_COUNT: f64 = 11.0;

/// Drains applied by one call to [`Biology::update`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickReport {
    /// Metabolic load returned by [`Biology::tick_energy_drain`].
    pub energy_drain: f64,
    /// Health lost to low energy, from [`Biology::tick_health_drain`].
    pub health_drain: f64,
}

/// A snapshot of a creature's resource levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vitals {
    /// Current health.
    pub health: f64,
    /// Current energy.
    pub energy: f64,
    /// Current water.
    pub water: f64,
}

impl core::fmt::Display for Vitals {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Current Health: {:.6}", self.health)?;
        writeln!(f, "Current Energy: {:.6}", self.energy)?;
        writeln!(f, "Current Water: {:.6}", self.water)
    }
}

/// Biological state of a single creature.
#[derive(Debug, Clone, PartialEq)]
pub struct Biology {
    traits: TraitTable,
    config: BiologyConfig,
    health: f64,
    energy: f64,
    water: f64,
}

impl Biology {
    /// Create a creature with default coefficients.
    ///
    /// With `deterministic` set, the creature carries the reference trait
    /// vector. Otherwise every trait is rolled from the thread-local RNG.
    pub fn new(deterministic: bool) -> Self {
        Self::with_config(BiologyConfig::default(), deterministic)
    }

    /// Create a creature with the given coefficients.
    pub fn with_config(config: BiologyConfig, deterministic: bool) -> Self {
        if deterministic {
            Self::from_traits(config, TraitTable::reference())
        } else {
            Self::with_rng(config, &mut rand::rng())
        }
    }

    /// Create a creature whose traits are rolled from `rng`.
    pub fn with_rng(config: BiologyConfig, rng: &mut impl Rng) -> Self {
        Self::from_traits(config, TraitTable::random(rng))
    }

    /// Create a creature with an explicit trait table.
    pub const fn from_traits(config: BiologyConfig, traits: TraitTable) -> Self {
        Self {
            traits,
            config,
            health: STARTING_LEVEL,
            energy: STARTING_LEVEL,
            water: STARTING_LEVEL,
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// Current health.
    pub const fn health(&self) -> f64 {
        self.health
    }

    /// Current energy.
    pub const fn energy(&self) -> f64 {
        self.energy
    }

    /// Current water.
    pub const fn water(&self) -> f64 {
        self.water
    }

    /// All three resource levels at once.
    pub const fn vitals(&self) -> Vitals {
        Vitals {
            health: self.health,
            energy: self.energy,
            water: self.water,
        }
    }

    /// The coefficients this creature was built with.
    pub const fn config(&self) -> &BiologyConfig {
        &self.config
    }

    /// The full trait table.
    pub const fn efficiencies(&self) -> &TraitTable {
        &self.traits
    }

    /// One trait, addressed by its external key.
    ///
    /// # Errors
    ///
    /// Returns [`BiologyError::UnknownTrait`] if `name` is not a trait key.
    pub fn efficiency(&self, name: &str) -> Result<f64, BiologyError> {
        self.traits.get_by_name(name)
    }

    // -----------------------------------------------------------------
    // Resource mutators
    // -----------------------------------------------------------------

    /// Add `delta` to health, saturating at [`MAX_LEVEL`].
    pub fn add_health(&mut self, delta: f64) {
        self.health = (self.health + delta).min(MAX_LEVEL);
    }

    /// Add `delta` to energy, saturating at [`MAX_LEVEL`].
    pub fn add_energy(&mut self, delta: f64) {
        self.energy = (self.energy + delta).min(MAX_LEVEL);
    }

    /// Add `delta` to water, saturating at [`MAX_LEVEL`].
    pub fn add_water(&mut self, delta: f64) {
        self.water = (self.water + delta).min(MAX_LEVEL);
    }

    // -----------------------------------------------------------------
    // Consumption
    // -----------------------------------------------------------------

    /// Eat `quantity` of food and return the energy actually gained.
    ///
    /// The gain is `quantity * Energy Efficiency`, further scaled by
    /// `sqrt(1 - Mass)` when [`BiologyConfig::mass_scaled_intake`] is set.
    /// The returned value is the computed gain, even if saturation at
    /// [`MAX_LEVEL`] means less of it was stored.
    pub fn eat_energy(&mut self, quantity: f64) -> f64 {
        let mut amount = quantity * self.traits.get(TraitKind::EnergyEfficiency);
        if self.config.mass_scaled_intake {
            amount *= (1.0 - self.traits.get(TraitKind::Mass)).sqrt();
        }
        self.add_energy(amount);
        amount
    }

    /// Drink `quantity` of water and return the water actually gained.
    pub fn drink_water(&mut self, quantity: f64) -> f64 {
        let amount = quantity * self.traits.get(TraitKind::WaterEfficiency);
        self.add_water(amount);
        amount
    }

    // -----------------------------------------------------------------
    // Movement
    // -----------------------------------------------------------------

    /// `1 - traits[terrain]`, using the default terrain for unknown keys.
    fn terrain_inefficiency(&self, terrain: &str) -> f64 {
        let kind = terrain
            .parse::<TraitKind>()
            .unwrap_or(TraitKind::DEFAULT_TERRAIN);
        1.0 - self.traits.get(kind)
    }

    /// Drain energy for one move across `terrain` and return the cost.
    ///
    /// `terrain` is a trait key; a key that names no trait falls back to
    /// `Traversal Efficiency 1`. The cost never drops below
    /// [`MIN_MOVEMENT_COST`].
    pub fn movement_energy_drain(&mut self, terrain: &str) -> f64 {
        let inefficiency = self.terrain_inefficiency(terrain);
        let amount = (inefficiency
            * self.config.terrain_energy_coefficient
            * self.traits.get(TraitKind::Mass))
        .max(MIN_MOVEMENT_COST);
        self.add_energy(-amount);
        amount
    }

    /// Drain water for one move across `terrain` and return the cost.
    ///
    /// Uses the same terrain fallback as
    /// [`movement_energy_drain`](Self::movement_energy_drain).
    pub fn movement_water_drain(&mut self, terrain: &str) -> f64 {
        let inefficiency = self.terrain_inefficiency(terrain);
        let water_inefficiency = 1.0 - self.traits.get(TraitKind::WaterEfficiency);
        let amount = (water_inefficiency * inefficiency * self.config.terrain_water_coefficient)
            .max(MIN_MOVEMENT_COST);
        self.add_water(-amount);
        amount
    }

    // -----------------------------------------------------------------
    // Chemicals
    // -----------------------------------------------------------------

    /// Absorb `quantity` of the chemical keyed by `chemical` and return
    /// the resulting health change.
    ///
    /// Tolerances below [`CHEMICAL_NEUTRAL_POINT`] harm the creature,
    /// tolerances above it heal.
    ///
    /// # Errors
    ///
    /// Returns [`BiologyError::UnknownTrait`] if `chemical` is not a trait
    /// key. Health is left untouched in that case.
    pub fn add_chemical(&mut self, chemical: &str, quantity: f64) -> Result<f64, BiologyError> {
        let tolerance = self.traits.get_by_name(chemical)?;
        let amount = (tolerance - CHEMICAL_NEUTRAL_POINT) * quantity * self.config.health_coefficient;
        self.add_health(amount);
        Ok(amount)
    }

    // -----------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------

    /// Apply one tick of metabolic energy drain.
    ///
    /// The load is the square root of the summed traits (Mass enters as
    /// `Mass^0.2`) divided by the trait count, dampened by `1 - Mass^2`
    /// and floored at [`MIN_METABOLIC_LOAD`]. Energy falls by the load
    /// times the drain coefficient. Returns the load before the
    /// coefficient is applied.
    pub fn tick_energy_drain(&mut self) -> f64 {
        let mass = self.traits.get(TraitKind::Mass);
        let total: f64 = self
            .traits
            .iter()
            .map(|(kind, value)| {
                if kind == TraitKind::Mass {
                    value.powf(MASS_LOAD_EXPONENT)
                } else {
                    value
                }
            })
            .sum();
        let base = total.sqrt() / TRAIT_COUNT;
        let load = (base * (1.0 - mass.powi(2))).max(MIN_METABOLIC_LOAD);
        self.add_energy(-(load * self.config.energy_drain_coefficient));
        load
    }

    /// Apply one tick of health drain from low energy.
    ///
    /// Only applies when `energy < 1 - Mass`; the loss is
    /// `(Mass - energy)^2`. Returns the loss, or zero when no drain applies.
    pub fn tick_health_drain(&mut self) -> f64 {
        let mass = self.traits.get(TraitKind::Mass);
        if self.energy < 1.0 - mass {
            let drain = (mass - self.energy).powi(2);
            self.add_health(-drain);
            return drain;
        }
        0.0
    }

    /// Advance the creature by one tick.
    ///
    /// # Order of operations
    ///
    /// 1. Floor energy and water at zero
    /// 2. Metabolic energy drain
    /// 3. Health drain, reading the energy left after step 2
    /// 4. Floor energy and water at zero again
    pub fn update(&mut self) -> TickReport {
        self.floor_resources();

        let energy_drain = self.tick_energy_drain();
        let health_drain = self.tick_health_drain();

        self.floor_resources();

        debug!(
            energy_drain,
            health_drain,
            health = self.health,
            energy = self.energy,
            water = self.water,
            "Biology tick applied"
        );

        TickReport {
            energy_drain,
            health_drain,
        }
    }

    const fn floor_resources(&mut self) {
        self.energy = self.energy.max(0.0);
        self.water = self.water.max(0.0);
    }

    /// Whether the creature is dead (`health <= 0`).
    ///
    /// This only inspects the current state; it does not mutate anything.
    pub const fn check_death(&self) -> bool {
        self.health <= 0.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Reference creature with default coefficients.
    fn reference() -> Biology {
        Biology::new(true)
    }

    /// Reference traits with some overridden.
    fn with_traits(overrides: &[(TraitKind, f64)]) -> Biology {
        let mut map: BTreeMap<TraitKind, f64> = TraitTable::reference().to_map();
        for (kind, value) in overrides {
            map.insert(*kind, *value);
        }
        let traits = TraitTable::from_values(&map).unwrap();
        Biology::from_traits(BiologyConfig::default(), traits)
    }

    #[test]
    fn starts_full() {
        let bio = reference();
        assert!(approx(bio.health(), 1.0));
        assert!(approx(bio.energy(), 1.0));
        assert!(approx(bio.water(), 1.0));
        assert!(!bio.check_death());
    }

    #[test]
    fn deterministic_uses_reference_traits() {
        assert_eq!(reference().efficiencies(), &TraitTable::reference());
    }

    #[test]
    fn random_creatures_differ() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = Biology::with_rng(BiologyConfig::default(), &mut rng);
        let b = Biology::with_rng(BiologyConfig::default(), &mut rng);
        assert_ne!(a.efficiencies(), b.efficiencies());
    }

    #[test]
    fn add_saturates_at_one() {
        let mut bio = reference();
        bio.add_health(5.0);
        bio.add_energy(1e9);
        bio.add_water(0.3);
        assert!(approx(bio.health(), 1.0));
        assert!(approx(bio.energy(), 1.0));
        assert!(approx(bio.water(), 1.0));
    }

    #[test]
    fn add_has_no_floor() {
        let mut bio = reference();
        bio.add_energy(-1.5);
        assert!(approx(bio.energy(), -0.5));
    }

    #[test]
    fn water_accumulates_on_water_level() {
        let mut bio = reference();
        bio.add_health(-0.9);
        bio.add_water(-0.5);
        bio.add_water(0.2);
        assert!(approx(bio.water(), 0.7));
        assert!(approx(bio.health(), 0.1));
    }

    #[test]
    fn efficiency_lookup() {
        let bio = reference();
        assert!(bio.efficiency("Mass").is_ok_and(|v| approx(v, 0.5)));
        assert_eq!(
            bio.efficiency("Wings"),
            Err(BiologyError::UnknownTrait(String::from("Wings")))
        );
    }

    #[test]
    fn eat_returns_quantity_times_efficiency() {
        let mut bio = reference();
        bio.add_energy(-0.6);
        let net = bio.eat_energy(0.5);
        assert!(approx(net, 0.25));
        assert!(approx(bio.energy(), 0.65));
    }

    #[test]
    fn eat_saturates_energy() {
        let mut bio = reference();
        let net = bio.eat_energy(0.5);
        assert!(approx(net, 0.25));
        assert!(approx(bio.energy(), 1.0));
    }

    #[test]
    fn mass_scaled_intake() {
        let config = BiologyConfig {
            mass_scaled_intake: true,
            ..BiologyConfig::default()
        };
        let mut bio = Biology::with_config(config, true);
        let net = bio.eat_energy(0.5);
        assert!((net - 0.1767).abs() < 1e-3, "net {net}");
        assert!(approx(bio.energy(), 1.0));
    }

    #[test]
    fn drink_returns_quantity_times_efficiency() {
        let mut bio = reference();
        let net = bio.drink_water(0.4);
        assert!(approx(net, 0.32));
        assert!(approx(bio.water(), 1.0));
    }

    #[test]
    fn movement_energy_on_terrain_one() {
        let mut bio = reference();
        let cost = bio.movement_energy_drain("Traversal Efficiency 1");
        // (1 - 0.6) * 1.0 * 0.5
        assert!(approx(cost, 0.2));
        assert!(approx(bio.energy(), 0.8));
    }

    #[test]
    fn movement_water_on_terrain_two() {
        let mut bio = reference();
        let cost = bio.movement_water_drain("Traversal Efficiency 2");
        // (1 - 0.8) * (1 - 0.4) * 1.0
        assert!(approx(cost, 0.12));
        assert!(approx(bio.water(), 0.88));
    }

    #[test]
    fn unknown_terrain_falls_back_to_terrain_one() {
        let mut known = reference();
        let mut unknown = reference();
        let a = known.movement_energy_drain("Traversal Efficiency 1");
        let b = unknown.movement_energy_drain("Lava");
        assert!(approx(a, b));

        let a = known.movement_water_drain("Traversal Efficiency 1");
        let b = unknown.movement_water_drain("Lava");
        assert!(approx(a, b));
    }

    #[test]
    fn movement_cost_has_floor() {
        let mut bio = with_traits(&[
            (TraitKind::Traversal1, 1.0),
            (TraitKind::WaterEfficiency, 1.0),
            (TraitKind::Mass, 0.0),
        ]);
        assert!(approx(bio.movement_energy_drain("Traversal Efficiency 1"), 0.01));
        assert!(approx(bio.movement_water_drain("Traversal Efficiency 1"), 0.01));
        assert!(approx(bio.energy(), 0.99));
        assert!(approx(bio.water(), 0.99));
    }

    #[test]
    fn movement_uses_terrain_coefficients() {
        let config = BiologyConfig {
            terrain_energy_coefficient: 2.0,
            terrain_water_coefficient: 3.0,
            ..BiologyConfig::default()
        };
        let mut bio = Biology::with_config(config, true);
        assert!(approx(bio.movement_energy_drain("Traversal Efficiency 1"), 0.4));
        assert!(approx(bio.movement_water_drain("Traversal Efficiency 2"), 0.36));
    }

    #[test]
    fn chemical_reference_values() {
        let mut bio = reference();
        assert!(bio.add_chemical("Chem 1", 0.5).is_ok_and(|d| approx(d, 0.2)));
        let mut bio = reference();
        assert!(bio.add_chemical("Chem 2", 0.4).is_ok_and(|d| approx(d, -0.16)));
        assert!(approx(bio.health(), 0.84));
    }

    #[test]
    fn chemical_neutral_point() {
        let mut bio = with_traits(&[(TraitKind::Chem3, 0.5)]);
        for quantity in [0.0, 0.3, 1.0, 42.0] {
            assert!(bio.add_chemical("Chem 3", quantity).is_ok_and(|d| d.abs() < EPS));
        }
        assert!(approx(bio.health(), 1.0));
    }

    #[test]
    fn chemical_sign_follows_tolerance() {
        let mut bio = reference();
        assert!(bio.add_chemical("Chem 3", 1.0).is_ok_and(|d| d < 0.0));
        assert!(bio.add_chemical("Chem 1", 1.0).is_ok_and(|d| d > 0.0));
    }

    #[test]
    fn unknown_chemical_is_an_error() {
        let mut bio = reference();
        assert_eq!(
            bio.add_chemical("Chem 5", 1.0),
            Err(BiologyError::UnknownTrait(String::from("Chem 5")))
        );
        assert!(approx(bio.health(), 1.0));
    }

    #[test]
    fn tick_energy_drain_reference() {
        let mut bio = reference();
        let load = bio.tick_energy_drain();
        // sqrt(4.75 + 0.5^0.2) / 11 * (1 - 0.25)
        assert!((load - 0.161_643_411_541_150_4).abs() < 1e-12, "load {load}");
        assert!(approx(bio.energy(), 1.0 - load));
    }

    #[test]
    fn tick_energy_drain_has_floor() {
        let mut bio = with_traits(&[(TraitKind::Mass, 1.0)]);
        let load = bio.tick_energy_drain();
        assert!(approx(load, 0.02));
        assert!(approx(bio.energy(), 0.98));
    }

    #[test]
    fn tick_energy_drain_uses_coefficient() {
        let config = BiologyConfig {
            energy_drain_coefficient: 2.0,
            ..BiologyConfig::default()
        };
        let mut bio = Biology::with_config(config, true);
        let load = bio.tick_energy_drain();
        assert!(approx(bio.energy(), 1.0 - 2.0 * load));
    }

    #[test]
    fn tick_health_drain_when_energy_low() {
        let mut bio = reference();
        bio.add_energy(-0.9);
        let drain = bio.tick_health_drain();
        // (0.5 - 0.1)^2
        assert!(approx(drain, 0.16));
        assert!(approx(bio.health(), 0.84));
    }

    #[test]
    fn tick_health_drain_idle_when_energy_sufficient() {
        let mut bio = reference();
        bio.add_energy(-0.5);
        // energy == 1 - Mass, condition is strict
        assert!(approx(bio.tick_health_drain(), 0.0));
        assert!(approx(bio.health(), 1.0));
    }

    #[test]
    fn update_floors_energy_and_water() {
        let mut bio = reference();
        bio.add_energy(-3.0);
        bio.add_water(-2.0);
        bio.update();
        assert!(bio.energy() >= 0.0);
        assert!(bio.water() >= 0.0);
        assert!(approx(bio.water(), 0.0));
    }

    #[test]
    fn update_runs_energy_before_health() {
        let mut bio = reference();
        // Energy 0.55 is above 1 - Mass before the tick, below it after.
        bio.add_energy(-0.45);
        let report = bio.update();
        assert!(report.energy_drain > 0.0);
        let energy_after = 0.55 - report.energy_drain;
        assert!(approx(bio.energy(), energy_after));
        assert!(approx(report.health_drain, (0.5 - energy_after).powi(2)));
        assert!(approx(bio.health(), 1.0 - report.health_drain));
    }

    #[test]
    fn update_from_negative_energy_uses_floored_value() {
        let mut bio = reference();
        bio.add_energy(-2.0);
        let report = bio.update();
        // Health reads the drained energy before the closing floor.
        let energy_after = 0.0 - report.energy_drain;
        assert!(approx(report.health_drain, (0.5 - energy_after).powi(2)));
        assert!(approx(bio.health(), 1.0 - report.health_drain));
        assert!(approx(bio.energy(), 0.0));
    }

    #[test]
    fn update_never_ends_below_zero() {
        let mut bio = reference();
        bio.add_energy(-0.95);
        let report = bio.update();
        assert!(report.energy_drain > 0.05);
        assert!(approx(bio.energy(), 0.0));
        assert!(approx(bio.water(), 1.0));
    }

    #[test]
    fn trait_count_matches_table() {
        let counted: f64 = TraitTable::reference().iter().map(|_| 1.0).sum();
        assert!(approx(TRAIT_COUNT, counted));
    }

    #[test]
    fn death_boundary() {
        let mut bio = reference();
        bio.add_health(-1.0);
        assert!(approx(bio.health(), 0.0));
        assert!(bio.check_death());

        let mut bio = reference();
        bio.add_health(-0.9999);
        assert!(!bio.check_death());

        let mut bio = reference();
        bio.add_health(-1.1);
        assert!(bio.check_death());
        bio.add_health(1.1);
        assert!(!bio.check_death());
    }

    #[test]
    fn vitals_snapshot() {
        let mut bio = reference();
        bio.add_water(-0.25);
        let vitals = bio.vitals();
        assert!(approx(vitals.water, 0.75));
        assert!(vitals.to_string().contains("Current Water: 0.750000"));
    }
}
