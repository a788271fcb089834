//! Error types for the textworld-agents crate.
//!
//! All operations that can fail return typed errors rather than panicking.

use textworld_types::ActorId;

/// Errors that can occur during actor state operations.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    /// A need decayed below zero. Fatal to the owning actor; raised once.
    #[error("need {need} of {actor_name} ({actor}) fell below zero ({value})")]
    NeedViolated {
        /// The owning actor.
        actor: ActorId,
        /// The owning actor's name.
        actor_name: String,
        /// The violated need's name.
        need: String,
        /// The value after the violating decay.
        value: f64,
    },

    /// Actor with the given ID was not found in the roster.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// Actor name already exists in the roster.
    #[error("duplicate actor name: {0}")]
    DuplicateName(String),

    /// The roster cannot hold more actors.
    #[error("actor roster is full")]
    RosterFull,
}
