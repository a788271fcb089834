//! World-definition records supplied by the asset loader.
//!
//! These are consumed once when the world is constructed: location records
//! fill the grid, character records become the initial autonomous roster.
//! Field aliases accept the asset files' short names (`emoji`, `color`).

use serde::{Deserialize, Serialize};

/// A location definition from the asset files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Display name (unique within a world).
    pub name: String,
    /// Prose shown to the player and fed to autonomous actors.
    #[serde(default = "default_description")]
    pub description: String,
    /// Short icon string shown by map renderers.
    #[serde(default = "default_icon", alias = "emoji")]
    pub display_icon: String,
    /// Renderer color name.
    #[serde(default = "default_color", alias = "color")]
    pub display_color: String,
}

impl LocationRecord {
    /// Create a record with default description and display metadata.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: default_description(),
            display_icon: default_icon(),
            display_color: default_color(),
        }
    }
}

/// A character definition from the asset files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Character name (unique within a world).
    pub name: String,
    /// Facts only the character itself knows.
    #[serde(default)]
    pub private_facts: Vec<String>,
    /// Facts visible to anyone sharing a location with the character.
    #[serde(default)]
    pub public_facts: Vec<String>,
}

fn default_description() -> String {
    "A location".to_owned()
}

fn default_icon() -> String {
    "\u{1f6ab}".to_owned()
}

fn default_color() -> String {
    "green".to_owned()
}
