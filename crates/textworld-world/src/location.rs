//! Location tiles with exits and occupant tracking.
//!
//! A [`LocationState`] is one tile of the world grid. Its `occupants` list is
//! a visibility index only: it mirrors which actors currently stand here and
//! is maintained exclusively by the actor location-transition operation. The
//! update pass never walks it to drive actors.

use serde::{Deserialize, Serialize};
use textworld_types::{ActorId, LocationId, LocationRecord};

use crate::error::WorldError;
use crate::portal::Portal;

/// Runtime state for one tile of the world grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationState {
    /// Stable identifier (the tile's storage index).
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Prose description.
    pub description: String,
    /// Short icon for map renderers.
    pub display_icon: String,
    /// Renderer color name.
    pub display_color: String,
    /// Grid column.
    pub x: usize,
    /// Grid row.
    pub y: usize,
    /// Outgoing exits in declared order.
    exits: Vec<Portal>,
    /// Actors present, in attachment order.
    occupants: Vec<ActorId>,
}

impl LocationState {
    /// Build a tile from its definition record and grid position.
    ///
    /// Starts with no exits and no occupants.
    pub fn from_record(id: LocationId, record: LocationRecord, x: usize, y: usize) -> Self {
        Self {
            id,
            name: record.name,
            description: record.description,
            display_icon: record.display_icon,
            display_color: record.display_color,
            x,
            y,
            exits: Vec::new(),
            occupants: Vec::new(),
        }
    }

    // -------------------------------------------------------------------
    // Exits
    // -------------------------------------------------------------------

    /// Append an exit.
    pub fn add_exit(&mut self, portal: Portal) {
        self.exits.push(portal);
    }

    /// All exits in declared order.
    pub fn exits(&self) -> &[Portal] {
        &self.exits
    }

    /// Exit names in declared order.
    pub fn exit_names(&self) -> Vec<String> {
        self.exits.iter().map(|p| p.name.clone()).collect()
    }

    /// Find an exit by case-insensitive name. Duplicates resolve to the
    /// first declared match.
    pub fn find_exit(&self, direction: &str) -> Option<&Portal> {
        self.exits.iter().find(|p| p.matches(direction))
    }

    /// Find the first exit leading to `destination`.
    pub fn exit_towards(&self, destination: LocationId) -> Option<&Portal> {
        self.exits.iter().find(|p| p.destination == destination)
    }

    // -------------------------------------------------------------------
    // Occupants
    // -------------------------------------------------------------------

    /// Snapshot of present actors in attachment order.
    pub fn list_present_actors(&self) -> Vec<ActorId> {
        self.occupants.clone()
    }

    /// Borrowed view of present actors in attachment order.
    pub fn occupants(&self) -> &[ActorId] {
        &self.occupants
    }

    /// Number of actors present.
    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    /// Check whether a specific actor is here.
    pub fn contains_actor(&self, actor: ActorId) -> bool {
        self.occupants.contains(&actor)
    }

    /// Attach an actor at the end of the occupant order.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ActorAlreadyAtLocation`] if the actor is already
    /// attached.
    pub fn add_occupant(&mut self, actor: ActorId) -> Result<(), WorldError> {
        if self.contains_actor(actor) {
            return Err(WorldError::ActorAlreadyAtLocation {
                actor,
                location: self.id,
            });
        }
        self.occupants.push(actor);
        Ok(())
    }

    /// Detach an actor, preserving the order of the others.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ActorNotAtLocation`] if the actor is not here.
    pub fn remove_occupant(&mut self, actor: ActorId) -> Result<(), WorldError> {
        let position = self
            .occupants
            .iter()
            .position(|a| *a == actor)
            .ok_or(WorldError::ActorNotAtLocation {
                actor,
                location: self.id,
            })?;
        self.occupants.remove(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile() -> LocationState {
        LocationState::from_record(LocationId(0), LocationRecord::named("Room1"), 0, 0)
    }

    #[test]
    fn find_exit_case_insensitive_first_match() {
        let mut loc = tile();
        loc.add_exit(Portal::new("South", LocationId(1)));
        loc.add_exit(Portal::new("south", LocationId(2)));
        let found = loc.find_exit("SOUTH").map(|p| p.destination);
        assert_eq!(found, Some(LocationId(1)));
        assert!(loc.find_exit("east").is_none());
    }

    #[test]
    fn occupants_keep_attachment_order() {
        let mut loc = tile();
        assert!(loc.add_occupant(ActorId(2)).is_ok());
        assert!(loc.add_occupant(ActorId(0)).is_ok());
        assert!(loc.add_occupant(ActorId(1)).is_ok());
        assert!(loc.remove_occupant(ActorId(0)).is_ok());
        assert_eq!(loc.list_present_actors(), vec![ActorId(2), ActorId(1)]);
    }

    #[test]
    fn double_attach_and_missing_detach_are_errors() {
        let mut loc = tile();
        assert!(loc.add_occupant(ActorId(5)).is_ok());
        assert!(matches!(
            loc.add_occupant(ActorId(5)),
            Err(WorldError::ActorAlreadyAtLocation { .. })
        ));
        assert!(matches!(
            loc.remove_occupant(ActorId(9)),
            Err(WorldError::ActorNotAtLocation { .. })
        ));
        assert_eq!(loc.occupant_count(), 1);
    }

    #[test]
    fn exit_towards_finds_return_portal() {
        let mut loc = tile();
        loc.add_exit(Portal::new("East", LocationId(3)));
        assert_eq!(
            loc.exit_towards(LocationId(3)).map(|p| p.name.as_str()),
            Some("East")
        );
        assert!(loc.exit_towards(LocationId(4)).is_none());
    }
}
