//! Type-safe identifier wrappers around arena indices.
//!
//! Locations and actors live in flat, append-only tables owned by the
//! simulation. Every cross-reference (a portal's destination, an actor's
//! current location, a location's occupants) stores one of these indices
//! instead of a pointer, so the world graph has no reference cycles and the
//! identifiers stay valid for the whole run.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around a `u32` table index with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an identifier for the given table position.
            ///
            /// Returns `None` if the position does not fit in a `u32`.
            pub fn from_index(index: usize) -> Option<Self> {
                u32::try_from(index).ok().map(Self)
            }

            /// Return the table position this identifier refers to.
            pub fn index(self) -> usize {
                usize::try_from(self.0).unwrap_or(usize::MAX)
            }

            /// Return the inner `u32` value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier for a location (one tile of the world grid).
    LocationId
}

define_id! {
    /// Identifier for an actor (the player or an autonomous character).
    ActorId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        let id = LocationId::from_index(7);
        assert_eq!(id, Some(LocationId(7)));
        assert_eq!(id.map(LocationId::index), Some(7));
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = ActorId(3);
        let json = serde_json::to_string(&original).ok();
        assert_eq!(json.as_deref(), Some("3"));
        let restored: Result<ActorId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn id_display_matches_inner() {
        let id = ActorId(42);
        assert_eq!(id.to_string(), "42");
    }
}
