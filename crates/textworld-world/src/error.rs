//! Error types for the `textworld-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use textworld_types::{ActorId, LocationId};

/// Errors that can occur during world-graph operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A location was not found in the world grid.
    #[error("location not found: {0}")]
    LocationNotFound(LocationId),

    /// No tile exists at the given coordinates.
    #[error("no tile at ({x}, {y})")]
    TileOutOfBounds {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },

    /// The actor is not present at the specified location.
    #[error("actor {actor} is not at location {location}")]
    ActorNotAtLocation {
        /// The actor.
        actor: ActorId,
        /// The location.
        location: LocationId,
    },

    /// The actor is already in the location's occupant set.
    #[error("actor {actor} is already at location {location}")]
    ActorAlreadyAtLocation {
        /// The actor.
        actor: ActorId,
        /// The location.
        location: LocationId,
    },

    /// The number of location records disagrees with the grid size.
    #[error("grid of {expected} tiles built from {actual} location records")]
    InvariantViolation {
        /// `width * height`.
        expected: usize,
        /// Number of records supplied.
        actual: usize,
    },

    /// The grid has no tiles.
    #[error("world grid must be at least 1x1 (got {width}x{height})")]
    EmptyGrid {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,
}
