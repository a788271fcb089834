//! Shared type definitions for the Textworld simulation.
//!
//! This crate is the single source of truth for the plain data that flows
//! between the world graph, the actor model, the tick engine, and the
//! text-generation collaborator.
//!
//! # Modules
//!
//! - [`ids`] -- Stable arena indices for locations and actors
//! - [`intent`] -- The [`Intent`] variants an actor can queue for resolution
//! - [`records`] -- World-definition records consumed at world construction
//! - [`decision`] -- Decision request/response exchanged with the collaborator

pub mod decision;
pub mod ids;
pub mod intent;
pub mod records;

// Re-export all public types at crate root for convenience.
pub use decision::{Decision, DecisionRequest, Utterance};
pub use ids::{ActorId, LocationId};
pub use intent::Intent;
pub use records::{CharacterRecord, LocationRecord};
