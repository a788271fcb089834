//! Tick errors and per-pass summaries.
//!
//! A [`TickError`] aborts the pass it occurred in. The only error a valid
//! world produces is a violated need, which surfaces as
//! [`TickError::Actor`] wrapping [`ActorError::NeedViolated`]; the other
//! variants indicate a broken invariant.

use textworld_agents::ActorError;
use textworld_types::ActorId;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: crate::clock::ClockError,
    },

    /// An actor operation failed (including need violations).
    #[error("actor error: {source}")]
    Actor {
        /// The underlying actor error.
        #[from]
        source: ActorError,
    },

    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: textworld_world::WorldError,
    },
}

impl TickError {
    /// The violated need's owner and name, if this is a need violation.
    pub fn need_violation(&self) -> Option<(ActorId, &str, &str)> {
        match self {
            Self::Actor {
                source:
                    ActorError::NeedViolated {
                        actor,
                        actor_name,
                        need,
                        ..
                    },
            } => Some((*actor, actor_name.as_str(), need.as_str())),
            _ => None,
        }
    }
}

/// Summary of a single update pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// 1-based pass number.
    pub pass: u64,
    /// Decision calls made this pass.
    pub decisions: u32,
    /// Moves that changed an actor's location.
    pub moves: u32,
    /// Statements delivered.
    pub utterances: u32,
    /// Intents dropped (unknown exits, unplaced actors).
    pub dropped: u32,
}

impl PassSummary {
    pub(crate) const fn new(pass: u64) -> Self {
        Self {
            pass,
            decisions: 0,
            moves: 0,
            utterances: 0,
            dropped: 0,
        }
    }
}
