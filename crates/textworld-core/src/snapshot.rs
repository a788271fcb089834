//! Read-only presentation snapshot.
//!
//! Hosts render from a [`SimulationSnapshot`] rather than reaching into the
//! simulation: need gauges for the player, an occupancy grid for the
//! minimap, the player's surroundings and history.

use serde::Serialize;
use textworld_agents::Actor;
use textworld_types::ActorId;

use crate::simulation::Simulation;

/// A point-in-time view of the simulation for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSnapshot {
    /// Passes run so far.
    pub pass: u64,
    /// The player's view, if a player exists.
    pub player: Option<PlayerView>,
    /// Occupant counts, one row per grid row.
    pub occupancy: Vec<Vec<usize>>,
    /// Every location with its occupants, in storage order.
    pub locations: Vec<LocationView>,
}

/// Player-centric view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    /// Player id.
    pub id: ActorId,
    /// Player name.
    pub name: String,
    /// Current location name.
    pub location: Option<String>,
    /// Current location description.
    pub description: Option<String>,
    /// Exits of the current location.
    pub exits: Vec<String>,
    /// Other actors present.
    pub nearby: Vec<String>,
    /// Needs in declared order.
    pub needs: Vec<NeedView>,
    /// History, newest first.
    pub history: Vec<String>,
}

/// One need gauge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeedView {
    /// Need name.
    pub name: String,
    /// Current value.
    pub value: f64,
    /// Maximum value.
    pub max_value: f64,
    /// `value / max_value` as a percentage.
    pub percentage: f64,
}

/// One location and who is there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationView {
    /// Location name.
    pub name: String,
    /// Grid column.
    pub x: usize,
    /// Grid row.
    pub y: usize,
    /// Map icon.
    pub icon: String,
    /// Renderer color.
    pub color: String,
    /// Names of present actors, in attachment order.
    pub occupants: Vec<String>,
}

impl Simulation {
    /// Capture a snapshot for rendering.
    pub fn snapshot(&self) -> SimulationSnapshot {
        let world = self.world();
        let roster = self.roster();
        let name_of = |id: &ActorId| roster.get(*id).map(|a| a.name.clone());

        let occupancy = (0..world.height())
            .map(|y| {
                (0..world.width())
                    .map(|x| world.get_tile_at(x, y).map_or(0, |t| t.occupant_count()))
                    .collect()
            })
            .collect();

        let locations = world
            .locations()
            .map(|t| LocationView {
                name: t.name.clone(),
                x: t.x,
                y: t.y,
                icon: t.display_icon.clone(),
                color: t.display_color.clone(),
                occupants: t.occupants().iter().filter_map(name_of).collect(),
            })
            .collect();

        let player = self
            .player_id()
            .and_then(|id| roster.get(id))
            .map(|p| self.player_view(p));

        SimulationSnapshot {
            pass: self.pass_count(),
            player,
            occupancy,
            locations,
        }
    }

    fn player_view(&self, player: &Actor) -> PlayerView {
        let tile = player.location().and_then(|at| self.world().location(at));
        PlayerView {
            id: player.id,
            name: player.name.clone(),
            location: tile.map(|t| t.name.clone()),
            description: tile.map(|t| t.description.clone()),
            exits: tile.map(|t| t.exit_names()).unwrap_or_default(),
            nearby: tile
                .map(|t| {
                    t.occupants()
                        .iter()
                        .filter(|id| **id != player.id)
                        .filter_map(|id| self.roster().get(*id))
                        .map(|a| a.name.clone())
                        .collect()
                })
                .unwrap_or_default(),
            needs: player
                .needs()
                .iter()
                .map(|n| NeedView {
                    name: n.name.clone(),
                    value: n.value(),
                    max_value: n.max_value,
                    percentage: n.percentage(),
                })
                .collect(),
            history: player.history().newest_first().cloned().collect(),
        }
    }
}
