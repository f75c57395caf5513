//! Genetic trait keys.
//!
//! Every creature carries exactly one value for each [`TraitKind`]. The set
//! is closed: adding or removing a variant changes the shape of every
//! biology formula that sums over traits, so the order and membership here
//! are part of the model.
//!
//! The human-readable key (`"Energy Efficiency"`, `"Chem 1"`, ...) is the
//! external name used by callers that still address traits by string, and
//! is the serialized form.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// A genetic trait governing one efficiency or physical property.
///
/// Variants are declared in reference-vector order; [`TraitKind::ALL`]
/// preserves that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TraitKind {
    /// Fraction of eaten food converted into energy.
    #[serde(rename = "Energy Efficiency")]
    EnergyEfficiency,
    /// Fraction of drunk water retained, and resistance to water loss.
    #[serde(rename = "Water Efficiency")]
    WaterEfficiency,
    /// Body mass. Scales movement cost and dampens metabolic drain.
    #[serde(rename = "Mass")]
    Mass,
    /// Visual acuity. Only contributes to metabolic load in this core.
    #[serde(rename = "Vision")]
    Vision,
    /// Tolerance to chemical 1.
    #[serde(rename = "Chem 1")]
    Chem1,
    /// Tolerance to chemical 2.
    #[serde(rename = "Chem 2")]
    Chem2,
    /// Tolerance to chemical 3.
    #[serde(rename = "Chem 3")]
    Chem3,
    /// Tolerance to chemical 4.
    #[serde(rename = "Chem 4")]
    Chem4,
    /// Traversal efficiency on terrain type 1 (the default terrain).
    #[serde(rename = "Traversal Efficiency 1")]
    Traversal1,
    /// Traversal efficiency on terrain type 2.
    #[serde(rename = "Traversal Efficiency 2")]
    Traversal2,
    /// Traversal efficiency on terrain type 3.
    #[serde(rename = "Traversal Efficiency 3")]
    Traversal3,
}

/// Error returned when a string does not name any [`TraitKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown trait: {0:?}")]
pub struct ParseTraitKindError(pub String);

impl TraitKind {
    /// Number of traits every creature carries.
    pub const COUNT: usize = 11;

    /// All traits, in reference-vector order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::EnergyEfficiency,
        Self::WaterEfficiency,
        Self::Mass,
        Self::Vision,
        Self::Chem1,
        Self::Chem2,
        Self::Chem3,
        Self::Chem4,
        Self::Traversal1,
        Self::Traversal2,
        Self::Traversal3,
    ];

    /// Chemical tolerance traits.
    pub const CHEMICALS: [Self; 4] = [Self::Chem1, Self::Chem2, Self::Chem3, Self::Chem4];

    /// Terrain traversal traits. The first entry is the default terrain.
    pub const TERRAINS: [Self; 3] = [Self::Traversal1, Self::Traversal2, Self::Traversal3];

    /// The traversal trait used when a terrain key is not recognized.
    pub const DEFAULT_TERRAIN: Self = Self::Traversal1;

    /// The external string key for this trait.
    pub const fn name(self) -> &'static str {
        match self {
            Self::EnergyEfficiency => "Energy Efficiency",
            Self::WaterEfficiency => "Water Efficiency",
            Self::Mass => "Mass",
            Self::Vision => "Vision",
            Self::Chem1 => "Chem 1",
            Self::Chem2 => "Chem 2",
            Self::Chem3 => "Chem 3",
            Self::Chem4 => "Chem 4",
            Self::Traversal1 => "Traversal Efficiency 1",
            Self::Traversal2 => "Traversal Efficiency 2",
            Self::Traversal3 => "Traversal Efficiency 3",
        }
    }

    /// Whether this trait is a chemical tolerance.
    pub const fn is_chemical(self) -> bool {
        matches!(self, Self::Chem1 | Self::Chem2 | Self::Chem3 | Self::Chem4)
    }

    /// Whether this trait is a terrain traversal efficiency.
    pub const fn is_traversal(self) -> bool {
        matches!(self, Self::Traversal1 | Self::Traversal2 | Self::Traversal3)
    }

    /// Chemical tolerance traits, in order.
    pub const fn chemicals() -> &'static [Self] {
        &Self::CHEMICALS
    }

    /// Terrain traversal traits, in order.
    pub const fn terrains() -> &'static [Self] {
        &Self::TERRAINS
    }
}

impl core::fmt::Display for TraitKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TraitKind {
    type Err = ParseTraitKindError;

    /// Parse the exact external key. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ParseTraitKindError(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn every_name_parses_back() {
        for kind in TraitKind::ALL {
            assert_eq!(kind.name().parse::<TraitKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "Swamp".parse::<TraitKind>();
        assert_eq!(err, Err(ParseTraitKindError(String::from("Swamp"))));
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("mass".parse::<TraitKind>().is_err());
        assert!("Mass".parse::<TraitKind>().is_ok());
    }

    #[test]
    fn groups_are_consistent() {
        for kind in TraitKind::ALL {
            assert_eq!(kind.is_chemical(), TraitKind::chemicals().contains(&kind));
            assert_eq!(kind.is_traversal(), TraitKind::terrains().contains(&kind));
        }
        assert!(TraitKind::DEFAULT_TERRAIN.is_traversal());
    }

    #[test]
    fn serializes_under_external_key() {
        let json = serde_json::to_string(&TraitKind::Traversal2).unwrap();
        assert_eq!(json, "\"Traversal Efficiency 2\"");

        let parsed: Result<TraitKind, _> = serde_json::from_str("\"Chem 3\"");
        assert_eq!(parsed.ok(), Some(TraitKind::Chem3));
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(TraitKind::EnergyEfficiency.to_string(), "Energy Efficiency");
    }
}
