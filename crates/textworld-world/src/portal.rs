//! Portals: named, directed exits from one location to another.

use serde::{Deserialize, Serialize};
use textworld_types::LocationId;

/// A named exit leading to a destination location.
///
/// Portals are immutable once built and need not be symmetric: an exit
/// from A to B says nothing about an exit from B to A.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portal {
    /// Exit name as shown to actors (e.g. `"North"`).
    pub name: String,
    /// Where the exit leads.
    pub destination: LocationId,
}

impl Portal {
    /// Create a portal.
    pub fn new(name: impl Into<String>, destination: LocationId) -> Self {
        Self {
            name: name.into(),
            destination,
        }
    }

    /// Case-insensitive comparison against a requested direction.
    pub fn matches(&self, direction: &str) -> bool {
        self.name.to_lowercase() == direction.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_ignores_case() {
        let portal = Portal::new("North", LocationId(1));
        assert!(portal.matches("north"));
        assert!(portal.matches("NORTH"));
        assert!(!portal.matches("nort"));
    }
}
