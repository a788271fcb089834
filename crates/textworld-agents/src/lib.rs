//! Actor state, needs, and history for the Textworld simulation.
//!
//! This crate contains the logic layer for actors: everything that operates
//! on actor state without touching the world grid or any I/O. It sits
//! between `textworld-types` (plain data) and `textworld-core` (which moves
//! actors between locations and drives the update pass).
//!
//! # Modules
//!
//! - [`actor`] -- [`Actor`] with its [`ActorKind`] variants and the
//!   autonomous decision gate ([`AutonomousState`])
//! - [`config`] -- Configurable parameters for actors ([`ActorsConfig`])
//! - [`error`] -- Error types for actor operations ([`ActorError`])
//! - [`history`] -- Append-only per-actor history log ([`HistoryLog`])
//! - [`need`] -- Decaying scalar needs ([`Need`])
//! - [`roster`] -- The single authoritative actor table ([`ActorRoster`])

pub mod actor;
pub mod config;
pub mod error;
pub mod history;
pub mod need;
pub mod roster;

// Re-export primary types at crate root for convenience.
pub use actor::{Actor, ActorKind, AutonomousState};
pub use config::{ActorsConfig, NeedConfig, PlayerConfig};
pub use error::ActorError;
pub use history::HistoryLog;
pub use need::Need;
pub use roster::ActorRoster;
