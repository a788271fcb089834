//! Actor location transitions.
//!
//! This is the only code path that changes an actor's location, and with it
//! the occupant sets of the origin and destination tiles. Each move records
//! what everyone involved saw:
//!
//! 1. Actors left behind see the mover leave, naming the exit used (or
//!    `UNKNOWN` if no exit of the origin leads to the destination). The
//!    mover records who it left.
//! 2. The mover is detached from the origin and attached to the destination.
//! 3. The mover records its arrival.
//! 4. The mover and every actor already at the destination record the
//!    encounter, both ways.
//!
//! Moving to the current location does nothing. A first placement skips
//! step 1 and the detach.

use textworld_agents::ActorRoster;
use textworld_types::{ActorId, LocationId};
use textworld_world::WorldMap;
use tracing::debug;

use crate::tick::TickError;

/// Marker used when no exit of the origin leads to the destination.
pub const UNKNOWN_EXIT: &str = "UNKNOWN";

/// Move `mover` to `destination`, keeping occupant sets in sync and
/// recording the observations of everyone involved.
///
/// Returns `false` when the actor was already there.
///
/// # Errors
///
/// Returns [`TickError::World`] if either location is missing or the
/// occupant sets disagree with the actor's location field, and
/// [`TickError::Actor`] if the mover or an occupant is not in the roster.
pub fn move_actor(
    world: &mut WorldMap,
    roster: &mut ActorRoster,
    mover: ActorId,
    destination: LocationId,
) -> Result<bool, TickError> {
    let (mover_name, origin) = {
        let actor = roster.require(mover)?;
        (actor.name.clone(), actor.location())
    };
    if origin == Some(destination) {
        return Ok(false);
    }
    let destination_name = world.require(destination)?.name.clone();

    if let Some(origin_id) = origin {
        let origin_tile = world.require(origin_id)?;
        let origin_name = origin_tile.name.clone();
        let exit_name = origin_tile
            .exit_towards(destination)
            .map_or_else(|| UNKNOWN_EXIT.to_owned(), |p| p.name.to_lowercase());
        let left_behind: Vec<ActorId> = origin_tile
            .occupants()
            .iter()
            .copied()
            .filter(|id| *id != mover)
            .collect();

        for other in left_behind {
            let observer = roster.require_mut(other)?;
            observer.observe(format!(
                "Saw {mover_name} leave {origin_name} towards {destination_name} (Using: {exit_name})"
            ));
            let other_name = observer.name.clone();
            roster
                .require_mut(mover)?
                .record(format!("Left {other_name} at {origin_name}"));
        }

        world.require_mut(origin_id)?.remove_occupant(mover)?;
    }

    world.require_mut(destination)?.add_occupant(mover)?;
    let actor = roster.require_mut(mover)?;
    actor.set_location(Some(destination));
    actor.record(format!("Moved to {destination_name}"));

    let already_here: Vec<ActorId> = world
        .require(destination)?
        .occupants()
        .iter()
        .copied()
        .filter(|id| *id != mover)
        .collect();
    for other in already_here {
        let observer = roster.require_mut(other)?;
        observer.observe(format!("Encountered {mover_name} in {destination_name}"));
        let other_name = observer.name.clone();
        roster
            .require_mut(mover)?
            .record(format!("Encountered {other_name} in {destination_name}"));
    }

    debug!(actor_id = %mover, from = ?origin, to = %destination, "Actor moved");
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use textworld_agents::{Actor, ActorKind, AutonomousState};
    use textworld_types::LocationRecord;

    use super::*;

    /// Two tiles side by side, A and B in the west tile, C in the east.
    fn setup() -> (WorldMap, ActorRoster) {
        let mut world = WorldMap::from_records(
            2,
            1,
            vec![LocationRecord::named("West"), LocationRecord::named("East")],
        )
        .unwrap();
        world.connect_grid().unwrap();
        let mut roster = ActorRoster::new();
        for name in ["A", "B"] {
            roster
                .insert(Actor::new(ActorId(0), name, ActorKind::Player))
                .unwrap();
        }
        roster
            .insert(Actor::new(
                ActorId(0),
                "C",
                ActorKind::Autonomous(AutonomousState::new(100.0)),
            ))
            .unwrap();
        move_actor(&mut world, &mut roster, ActorId(0), LocationId(0)).unwrap();
        move_actor(&mut world, &mut roster, ActorId(1), LocationId(0)).unwrap();
        move_actor(&mut world, &mut roster, ActorId(2), LocationId(1)).unwrap();
        (world, roster)
    }

    fn history(roster: &ActorRoster, id: u32) -> Vec<String> {
        roster
            .get(ActorId(id))
            .map(|a| a.history().oldest_first().to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn first_placement_attaches_and_records_arrival() {
        let (world, roster) = setup();
        assert_eq!(
            world.location(LocationId(0)).unwrap().list_present_actors(),
            vec![ActorId(0), ActorId(1)]
        );
        assert_eq!(history(&roster, 0).first().map(String::as_str), Some("Moved to West"));
        assert!(history(&roster, 1).contains(&"Encountered A in West".to_owned()));
        assert!(history(&roster, 0).contains(&"Encountered B in West".to_owned()));
    }

    #[test]
    fn move_updates_both_occupant_sets_and_observations() {
        let (mut world, mut roster) = setup();
        let moved = move_actor(&mut world, &mut roster, ActorId(0), LocationId(1)).unwrap();
        assert!(moved);
        assert_eq!(world.location(LocationId(0)).unwrap().occupant_count(), 1);
        assert_eq!(world.location(LocationId(1)).unwrap().occupant_count(), 2);
        assert_eq!(roster.get(ActorId(0)).unwrap().location(), Some(LocationId(1)));

        assert!(
            history(&roster, 1)
                .contains(&"Saw A leave West towards East (Using: east)".to_owned())
        );
        let a = history(&roster, 0);
        assert!(a.contains(&"Left B at West".to_owned()));
        assert!(a.contains(&"Moved to East".to_owned()));
        assert!(a.contains(&"Encountered C in East".to_owned()));
        assert!(history(&roster, 2).contains(&"Encountered A in East".to_owned()));
    }

    #[test]
    fn encounter_makes_autonomous_actor_reactive() {
        let (mut world, mut roster) = setup();
        move_actor(&mut world, &mut roster, ActorId(0), LocationId(1)).unwrap();
        let c = roster.get_mut(ActorId(2)).and_then(|a| a.autonomous_mut().cloned());
        assert!(c.is_some_and(|s| s.is_reactive()));
    }

    #[test]
    fn moving_to_current_location_is_a_no_op() {
        let (mut world, mut roster) = setup();
        let before = history(&roster, 0).len();
        let moved = move_actor(&mut world, &mut roster, ActorId(0), LocationId(0)).unwrap();
        assert!(!moved);
        assert_eq!(history(&roster, 0).len(), before);
        assert_eq!(world.location(LocationId(0)).unwrap().occupant_count(), 2);
    }

    #[test]
    fn teleport_without_exit_reports_unknown() {
        let mut world = WorldMap::from_records(
            2,
            1,
            vec![LocationRecord::named("Here"), LocationRecord::named("There")],
        )
        .unwrap();
        let mut roster = ActorRoster::new();
        roster.insert(Actor::new(ActorId(0), "A", ActorKind::Player)).unwrap();
        roster.insert(Actor::new(ActorId(0), "B", ActorKind::Player)).unwrap();
        move_actor(&mut world, &mut roster, ActorId(0), LocationId(0)).unwrap();
        move_actor(&mut world, &mut roster, ActorId(1), LocationId(0)).unwrap();
        move_actor(&mut world, &mut roster, ActorId(0), LocationId(1)).unwrap();
        assert!(
            history(&roster, 1)
                .contains(&"Saw A leave Here towards There (Using: UNKNOWN)".to_owned())
        );
    }

    #[test]
    fn missing_destination_is_an_error() {
        let (mut world, mut roster) = setup();
        let result = move_actor(&mut world, &mut roster, ActorId(0), LocationId(42));
        assert!(matches!(result, Err(TickError::World { .. })));
        assert_eq!(world.location(LocationId(0)).unwrap().occupant_count(), 2);
    }
}
