//! Per-creature biology for the Vitae simulation.
//!
//! This crate is the numerical core of a creature: a fixed table of
//! genetic traits rolled once at birth, three bounded resource levels
//! (health, energy, water), and the formulas that move those levels when
//! the creature eats, drinks, moves, absorbs chemicals, or lives through a
//! tick. It knows nothing about the world, other creatures, or time; the
//! caller drives it once per tick.
//!
//! # Modules
//!
//! - [`biology`] -- The engine itself ([`Biology`]), tick reports and vitals
//! - [`config`] -- Process-wide tuning coefficients ([`BiologyConfig`])
//! - [`entity`] -- The coordinator that owns one creature's biology ([`Entity`])
//! - [`error`] -- Error types for biology operations ([`BiologyError`])
//! - [`genome`] -- The immutable trait table ([`TraitTable`])

pub mod biology;
pub mod config;
pub mod entity;
pub mod error;
pub mod genome;

// Re-export primary types at crate root for convenience.
pub use biology::{Biology, TickReport, Vitals};
pub use config::BiologyConfig;
pub use entity::Entity;
pub use error::BiologyError;
pub use genome::TraitTable;
pub use vitae_types::{EntityId, TraitKind};
