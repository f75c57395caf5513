//! Configuration and tick loop for the Vitae simulation.
//!
//! The biology crate models one creature; this crate drives many of them.
//! Each tick feeds, waters, moves and doses every living creature with the
//! configured amounts, then advances its biology. There is no world here:
//! the "environment" is the fixed per-tick ration in [`config::FeedingConfig`].
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `vitae-config.yaml` into
//!   strongly-typed structs.
//! - [`runner`] -- Population spawning, the single-tick step, and the
//!   bounded simulation loop.

pub mod config;
pub mod runner;
