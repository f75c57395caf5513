//! Shared type definitions for the Vitae creature biology simulation.
//!
//! This crate holds the vocabulary shared by the biology engine and the
//! drivers that sit on top of it. It has no simulation logic of its own.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`traits`] -- The fixed set of genetic trait keys ([`TraitKind`])

pub mod ids;
pub mod traits;

// Re-export all public types at crate root for convenience.
pub use ids::EntityId;
pub use traits::{ParseTraitKindError, TraitKind};
