//! Intents: actions an actor has decided on but the world has not yet applied.
//!
//! Intents are queued by the player's command input or produced by an
//! autonomous actor's decision, then resolved at the actor's location during
//! the next update pass.

use serde::{Deserialize, Serialize};

/// An action awaiting resolution.
///
/// Serialized with an `action` tag so queued intents read the same way the
/// command layer writes them: `{"action": "move", "direction": "north"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Intent {
    /// Leave the current location through the exit with this name.
    Move {
        /// Exit name, matched case-insensitively.
        direction: String,
    },
    /// Speak to everyone at the current location.
    Say {
        /// The utterance.
        content: String,
    },
}

impl Intent {
    /// Build a [`Intent::Move`] through the named exit.
    pub fn move_through(direction: impl Into<String>) -> Self {
        Self::Move {
            direction: direction.into(),
        }
    }

    /// Build a [`Intent::Say`] with the given content.
    pub fn say(content: impl Into<String>) -> Self {
        Self::Say {
            content: content.into(),
        }
    }

    /// Short label used in log fields.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Move { .. } => "move",
            Self::Say { .. } => "say",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_action_tag() {
        let intent = Intent::move_through("North");
        let json = serde_json::to_value(&intent).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({"action": "move", "direction": "North"}))
        );
    }

    #[test]
    fn deserialize_say() {
        let parsed: Result<Intent, _> =
            serde_json::from_str(r#"{"action": "say", "content": "hello"}"#);
        assert_eq!(parsed.ok(), Some(Intent::say("hello")));
    }

    #[test]
    fn kind_labels() {
        assert_eq!(Intent::say("x").kind(), "say");
        assert_eq!(Intent::move_through("x").kind(), "move");
    }
}
