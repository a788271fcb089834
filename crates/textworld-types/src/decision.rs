//! Decision exchange between an autonomous actor and the text-generation
//! collaborator.
//!
//! The core builds a [`DecisionRequest`] from the actor's state and its
//! surroundings; the collaborator returns an optional [`Decision`]. The core
//! never depends on how the collaborator turns one into the other.

use serde::{Deserialize, Serialize};

use crate::ids::ActorId;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A single buffered statement heard by an actor since its last decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// Name of the speaker.
    pub speaker: String,
    /// What was said.
    pub content: String,
}

/// Everything an autonomous actor knows when it is asked to decide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// The deciding actor.
    pub actor_id: ActorId,
    /// The deciding actor's name.
    pub actor_name: String,
    /// Name plus public and private facts.
    pub private_description: String,
    /// Name of the actor's current location.
    pub location_name: String,
    /// Description of the actor's current location.
    pub location_description: String,
    /// Exit names available from the current location, in declared order.
    pub exits: Vec<String>,
    /// Recent history entries, oldest first.
    pub recent_history: Vec<String>,
    /// Public descriptions of the other actors present.
    pub nearby_actors: Vec<String>,
    /// Statements heard since the last decision, oldest first.
    pub recent_utterances: Vec<Utterance>,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// The collaborator's structured reply.
///
/// Matches the JSON shape `{"response": <text|null>, "move": <exit|null>}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// A line to speak, if any.
    #[serde(default)]
    pub response: Option<String>,
    /// An exit to move through, if any.
    #[serde(default, rename = "move")]
    pub move_direction: Option<String>,
}

impl Decision {
    /// True when the decision carries neither speech nor movement.
    pub fn is_empty(&self) -> bool {
        self.response.as_deref().is_none_or(|r| r.trim().is_empty())
            && self
                .move_direction
                .as_deref()
                .is_none_or(|m| m.trim().is_empty())
    }
}
