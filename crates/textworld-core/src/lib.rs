//! Tick scheduler, update pass, and intent resolution for the Textworld
//! simulation.
//!
//! This crate owns the [`Simulation`] root: the location grid and the actor
//! roster for the whole run, a fixed-step clock, and the update pass that
//! advances needs, harvests intents and resolves them against the world.
//!
//! # Modules
//!
//! - [`clock`] -- Fixed-step accumulator turning frame deltas into passes.
//! - [`config`] -- Configuration loading from `textworld-config.yaml` into
//!   strongly-typed structs.
//! - [`decision`] -- [`DecisionSource`] trait, [`StubDecisionSource`] and
//!   [`ScriptedDecisionSource`].
//! - [`resolution`] -- Two-phase intent resolution at a location.
//! - [`simulation`] -- [`Simulation`] construction and the update pass.
//! - [`snapshot`] -- Read-only presentation snapshot of the world.
//! - [`tick`] -- [`TickError`] and per-pass summaries.
//! - [`transition`] -- Moving an actor between occupant sets with the
//!   observation entries that go with it.
//!
//! [`DecisionSource`]: decision::DecisionSource
//! [`StubDecisionSource`]: decision::StubDecisionSource
//! [`ScriptedDecisionSource`]: decision::ScriptedDecisionSource
//! [`Simulation`]: simulation::Simulation
//! [`TickError`]: tick::TickError

pub mod clock;
pub mod config;
pub mod decision;
pub mod resolution;
pub mod simulation;
pub mod snapshot;
pub mod tick;
pub mod transition;

pub use clock::{ClockError, TickClock};
pub use config::{ConfigError, SimulationConfig};
pub use decision::{DecisionError, DecisionSource, ScriptedDecisionSource, StubDecisionSource};
pub use simulation::{BuildError, Simulation};
pub use snapshot::SimulationSnapshot;
pub use tick::{PassSummary, TickError};
