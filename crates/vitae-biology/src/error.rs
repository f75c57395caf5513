//! Error types for the vitae-biology crate.
//!
//! Unknown trait keys are the only failure a running creature can hit.
//! The remaining variants guard the construction boundary, where trait
//! tables and coefficients enter from outside.

use vitae_types::{ParseTraitKindError, TraitKind};

/// Errors that can occur during biology operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BiologyError {
    /// A trait was requested by a name that is not in the trait table.
    #[error("unknown trait: {0:?}")]
    UnknownTrait(String),

    /// An explicit trait table omitted a required trait.
    #[error("trait table is missing {0}")]
    MissingTrait(TraitKind),

    /// An explicit trait value was not a finite number in `[0, 1]`.
    #[error("trait {trait_kind} must be in [0, 1], got {value}")]
    TraitOutOfRange {
        /// The trait carrying the bad value.
        trait_kind: TraitKind,
        /// The rejected value.
        value: f64,
    },

    /// A tuning coefficient was negative or not finite.
    #[error("coefficient {name} must be finite and non-negative, got {value}")]
    InvalidCoefficient {
        /// The configuration field name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl From<ParseTraitKindError> for BiologyError {
    fn from(err: ParseTraitKindError) -> Self {
        Self::UnknownTrait(err.0)
    }
}
