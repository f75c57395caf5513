//! The immutable trait table a creature is born with.
//!
//! A [`TraitTable`] holds one value in `[0, 1]` for every [`TraitKind`].
//! It is built once, either from the fixed reference vector, by rolling
//! each trait independently, or from explicit values, and exposes only
//! read access afterwards.

use std::collections::BTreeMap;

use rand::Rng;
use vitae_types::TraitKind;

use crate::error::BiologyError;

/// One value per genetic trait, fixed for the creature's lifetime.
///
/// Lookups by [`TraitKind`] are infallible. Lookups by string key go
/// through [`TraitTable::get_by_name`] and fail with
/// [`BiologyError::UnknownTrait`].
#[derive(Debug, Clone, PartialEq)]
pub struct TraitTable {
    energy_efficiency: f64,
    water_efficiency: f64,
    mass: f64,
    vision: f64,
    chem_1: f64,
    chem_2: f64,
    chem_3: f64,
    chem_4: f64,
    traversal_1: f64,
    traversal_2: f64,
    traversal_3: f64,
}

impl TraitTable {
    /// The fixed reference vector used for reproducible tests and demos.
    pub const fn reference() -> Self {
        Self {
            energy_efficiency: 0.5,
            water_efficiency: 0.8,
            mass: 0.5,
            vision: 0.4,
            chem_1: 0.9,
            chem_2: 0.1,
            chem_3: 0.3,
            chem_4: 0.4,
            traversal_1: 0.6,
            traversal_2: 0.4,
            traversal_3: 0.35,
        }
    }

    /// Roll every trait independently as `u * u` with `u` uniform in `[0, 1)`.
    ///
    /// Squaring skews the distribution toward zero: the expected trait
    /// value is one third, so most creatures are poor at most things.
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut roll = || {
            let u: f64 = rng.random();
            u * u
        };
        Self {
            energy_efficiency: roll(),
            water_efficiency: roll(),
            mass: roll(),
            vision: roll(),
            chem_1: roll(),
            chem_2: roll(),
            chem_3: roll(),
            chem_4: roll(),
            traversal_1: roll(),
            traversal_2: roll(),
            traversal_3: roll(),
        }
    }

    /// Build a table from explicit values.
    ///
    /// Every [`TraitKind`] must be present. Extra keys cannot occur because
    /// the map is keyed by the closed enum.
    ///
    /// # Errors
    ///
    /// Returns [`BiologyError::MissingTrait`] if a trait has no value, or
    /// [`BiologyError::TraitOutOfRange`] if a value is not a finite number
    /// in `[0, 1]`.
    pub fn from_values(values: &BTreeMap<TraitKind, f64>) -> Result<Self, BiologyError> {
        let mut table = Self::reference();
        for kind in TraitKind::ALL {
            let value = values
                .get(&kind)
                .copied()
                .ok_or(BiologyError::MissingTrait(kind))?;
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(BiologyError::TraitOutOfRange {
                    trait_kind: kind,
                    value,
                });
            }
            *table.slot_mut(kind) = value;
        }
        Ok(table)
    }

    /// The value of one trait.
    pub const fn get(&self, kind: TraitKind) -> f64 {
        match kind {
            TraitKind::EnergyEfficiency => self.energy_efficiency,
            TraitKind::WaterEfficiency => self.water_efficiency,
            TraitKind::Mass => self.mass,
            TraitKind::Vision => self.vision,
            TraitKind::Chem1 => self.chem_1,
            TraitKind::Chem2 => self.chem_2,
            TraitKind::Chem3 => self.chem_3,
            TraitKind::Chem4 => self.chem_4,
            TraitKind::Traversal1 => self.traversal_1,
            TraitKind::Traversal2 => self.traversal_2,
            TraitKind::Traversal3 => self.traversal_3,
        }
    }

    /// The value of the trait with the given external key.
    ///
    /// # Errors
    ///
    /// Returns [`BiologyError::UnknownTrait`] if `name` is not a trait key.
    pub fn get_by_name(&self, name: &str) -> Result<f64, BiologyError> {
        let kind: TraitKind = name.parse()?;
        Ok(self.get(kind))
    }

    /// Iterate over `(trait, value)` pairs in reference-vector order.
    pub fn iter(&self) -> impl Iterator<Item = (TraitKind, f64)> + '_ {
        TraitKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Number of traits in the table. Always [`TraitKind::COUNT`].
    pub const fn len(&self) -> usize {
        TraitKind::COUNT
    }

    /// Always `false`; every table carries the full trait set.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Copy the table into an ordered map keyed by trait.
    pub fn to_map(&self) -> BTreeMap<TraitKind, f64> {
        self.iter().collect()
    }

    const fn slot_mut(&mut self, kind: TraitKind) -> &mut f64 {
        match kind {
            TraitKind::EnergyEfficiency => &mut self.energy_efficiency,
            TraitKind::WaterEfficiency => &mut self.water_efficiency,
            TraitKind::Mass => &mut self.mass,
            TraitKind::Vision => &mut self.vision,
            TraitKind::Chem1 => &mut self.chem_1,
            TraitKind::Chem2 => &mut self.chem_2,
            TraitKind::Chem3 => &mut self.chem_3,
            TraitKind::Chem4 => &mut self.chem_4,
            TraitKind::Traversal1 => &mut self.traversal_1,
            TraitKind::Traversal2 => &mut self.traversal_2,
            TraitKind::Traversal3 => &mut self.traversal_3,
        }
    }
}

impl core::fmt::Display for TraitTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (kind, value) in self.iter() {
            let label = format!("{kind}:");
            writeln!(f, "{label:<25}{value}")?;
        }
        Ok(())
    }
}
