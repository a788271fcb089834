//! Intent resolution at a location.
//!
//! Resolution is two-phase. The update pass first collects every intent of
//! a location's occupants as `(ActorId, Intent)` pairs, in occupant order;
//! only then are they applied, in that same order. Every decision in the
//! batch therefore saw the same occupant snapshot.
//!
//! Each intent resolves against the acting actor's location at the moment
//! it is applied, so a `Say` queued behind a `Move` is heard at the new
//! location.

use textworld_agents::ActorRoster;
use textworld_types::{ActorId, Intent};
use textworld_world::WorldMap;
use tracing::debug;

use crate::tick::{PassSummary, TickError};
use crate::transition;

/// Apply a batch of collected intents in order.
///
/// Moves through unknown exits and intents of unplaced actors are dropped
/// without error and counted in `summary.dropped`.
///
/// # Errors
///
/// Returns [`TickError`] only if world and roster disagree (a missing
/// actor or location).
pub fn resolve_intents(
    world: &mut WorldMap,
    roster: &mut ActorRoster,
    intents: Vec<(ActorId, Intent)>,
    summary: &mut PassSummary,
) -> Result<(), TickError> {
    for (actor_id, intent) in intents {
        match intent {
            Intent::Move { direction } => {
                if resolve_move(world, roster, actor_id, &direction)? {
                    summary.moves = summary.moves.saturating_add(1);
                } else {
                    summary.dropped = summary.dropped.saturating_add(1);
                }
            }
            Intent::Say { content } => {
                if resolve_say(world, roster, actor_id, &content)? {
                    summary.utterances = summary.utterances.saturating_add(1);
                } else {
                    summary.dropped = summary.dropped.saturating_add(1);
                }
            }
        }
    }
    Ok(())
}

/// Resolve a move. Returns `false` if the intent was dropped.
fn resolve_move(
    world: &mut WorldMap,
    roster: &mut ActorRoster,
    actor_id: ActorId,
    direction: &str,
) -> Result<bool, TickError> {
    let actor = roster.require(actor_id)?;
    let Some(here) = actor.location() else {
        debug!(actor_id = %actor_id, "Dropped move of unplaced actor");
        return Ok(false);
    };
    let mover_name = actor.name.clone();
    let tile = world.require(here)?;
    let Some(portal) = tile.find_exit(direction) else {
        debug!(actor_id = %actor_id, direction, location = %tile.name, "Dropped move through unknown exit");
        return Ok(false);
    };
    let portal_name = portal.name.clone();
    let destination = portal.destination;
    let present = tile.list_present_actors();

    for id in present {
        let actor = roster.require_mut(id)?;
        if id == actor_id {
            actor.record(format!("Moved through portal '{portal_name}'"));
        } else {
            actor.observe(format!("Saw {mover_name} go through portal '{portal_name}'"));
        }
    }

    transition::move_actor(world, roster, actor_id, destination)?;
    Ok(true)
}

/// Deliver speech to everyone at the speaker's location, speaker included.
/// Returns `false` if the speaker is unplaced.
fn resolve_say(
    world: &WorldMap,
    roster: &mut ActorRoster,
    speaker: ActorId,
    content: &str,
) -> Result<bool, TickError> {
    let actor = roster.require(speaker)?;
    let Some(here) = actor.location() else {
        debug!(actor_id = %speaker, "Dropped speech of unplaced actor");
        return Ok(false);
    };
    let speaker_name = actor.name.clone();
    for id in world.require(here)?.occupants() {
        roster.require_mut(*id)?.hear(speaker, &speaker_name, content);
    }
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use textworld_agents::{Actor, ActorKind};
    use textworld_types::{LocationId, LocationRecord};

    use super::*;

    /// Room1 above Room2, A and B in Room1.
    fn setup() -> (WorldMap, ActorRoster) {
        let mut world = WorldMap::from_records(
            1,
            2,
            vec![LocationRecord::named("Room1"), LocationRecord::named("Room2")],
        )
        .unwrap();
        world.add_portal(LocationId(0), "South", LocationId(1)).unwrap();
        world.add_portal(LocationId(1), "North", LocationId(0)).unwrap();
        let mut roster = ActorRoster::new();
        for name in ["A", "B"] {
            let id = roster
                .insert(Actor::new(ActorId(0), name, ActorKind::Player))
                .unwrap();
            transition::move_actor(&mut world, &mut roster, id, LocationId(0)).unwrap();
        }
        (world, roster)
    }

    #[test]
    fn move_records_portal_and_relocates() {
        let (mut world, mut roster) = setup();
        let mut summary = PassSummary::new(1);
        resolve_intents(
            &mut world,
            &mut roster,
            vec![(ActorId(0), Intent::move_through("SOUTH"))],
            &mut summary,
        )
        .unwrap();
        assert_eq!(summary.moves, 1);
        let a = roster.get(ActorId(0)).unwrap();
        assert_eq!(a.location(), Some(LocationId(1)));
        assert!(a.history().contains("Moved through portal 'South'"));
        let b = roster.get(ActorId(1)).unwrap();
        assert!(b.history().contains("Saw A go through portal 'South'"));
    }

    #[test]
    fn unknown_exit_is_dropped_without_state_change() {
        let (mut world, mut roster) = setup();
        let before = roster.get(ActorId(0)).unwrap().history().len();
        let mut summary = PassSummary::new(1);
        let result = resolve_intents(
            &mut world,
            &mut roster,
            vec![(ActorId(0), Intent::move_through("up"))],
            &mut summary,
        );
        assert!(result.is_ok());
        assert_eq!(summary.dropped, 1);
        assert_eq!(roster.get(ActorId(0)).unwrap().history().len(), before);
        assert_eq!(world.location(LocationId(0)).unwrap().occupant_count(), 2);
        assert_eq!(world.location(LocationId(1)).unwrap().occupant_count(), 0);
    }

    #[test]
    fn speech_after_move_is_heard_at_new_location() {
        let (mut world, mut roster) = setup();
        let mut summary = PassSummary::new(1);
        resolve_intents(
            &mut world,
            &mut roster,
            vec![
                (ActorId(0), Intent::move_through("south")),
                (ActorId(0), Intent::say("anyone here?")),
            ],
            &mut summary,
        )
        .unwrap();
        let a = roster.get(ActorId(0)).unwrap();
        assert!(a.history().contains("(Said) A: anyone here?"));
        let b = roster.get(ActorId(1)).unwrap();
        assert!(!b.history().contains("(Heard) A: anyone here?"));
        assert_eq!(summary.utterances, 1);
    }
}
