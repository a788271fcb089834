//! Geography for the Textworld simulation.
//!
//! This crate models the physical world: a fixed `width x height` grid of
//! locations, each owning an ordered list of named, directed portals and an
//! ordered occupant index of the actors standing there.
//!
//! # Modules
//!
//! - [`error`] -- Error types for world-graph operations.
//! - [`portal`] -- [`Portal`], a named directed edge to a destination tile.
//! - [`location`] -- [`LocationState`], a grid tile with exits and occupants.
//! - [`world_map`] -- [`WorldMap`], the grid itself with coordinate lookups.
//! - [`generation`] -- Seeded forest generation with fixed landmarks.
//!
//! [`Portal`]: portal::Portal
//! [`LocationState`]: location::LocationState
//! [`WorldMap`]: world_map::WorldMap

pub mod error;
pub mod generation;
pub mod location;
pub mod portal;
pub mod world_map;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use generation::{FOREST_NAME, Landmark, default_landmarks, generate_forest};
pub use location::LocationState;
pub use portal::Portal;
pub use world_map::WorldMap;
