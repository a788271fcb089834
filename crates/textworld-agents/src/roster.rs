//! The single authoritative actor table.
//!
//! Actors are appended once at world construction and never removed, so an
//! [`ActorId`] is the actor's index in the table for the whole run. Needs
//! are advanced through this table only; location occupant lists are
//! never traversed to drive updates.

use textworld_types::{ActorId, CharacterRecord};
use tracing::{debug, info};

use crate::actor::{Actor, ActorKind, AutonomousState};
use crate::config::PlayerConfig;
use crate::error::ActorError;

/// Append-only table of every actor in the simulation.
#[derive(Debug, Clone, Default)]
pub struct ActorRoster {
    actors: Vec<Actor>,
    player: Option<ActorId>,
}

impl ActorRoster {
    /// Create an empty roster.
    pub const fn new() -> Self {
        Self {
            actors: Vec::new(),
            player: None,
        }
    }

    fn next_id(&self, name: &str) -> Result<ActorId, ActorError> {
        if self.find_by_name(name).is_some() {
            return Err(ActorError::DuplicateName(name.to_owned()));
        }
        ActorId::from_index(self.actors.len()).ok_or(ActorError::RosterFull)
    }

    /// Add the player from configuration. Later calls replace which actor
    /// [`ActorRoster::player_id`] reports.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::DuplicateName`] if the name is taken.
    pub fn spawn_player(&mut self, config: &PlayerConfig) -> Result<ActorId, ActorError> {
        let id = self.next_id(&config.name)?;
        let actor = Actor::new(id, config.name.clone(), ActorKind::Player)
            .with_facts(config.public_facts.clone(), config.private_facts.clone())
            .with_needs(config.build_needs());
        self.actors.push(actor);
        self.player = Some(id);
        info!(actor_id = %id, name = %config.name, "Spawned player");
        Ok(id)
    }

    /// Add an autonomous character from its definition record.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::DuplicateName`] if the name is taken.
    pub fn spawn_autonomous(
        &mut self,
        record: CharacterRecord,
        decision_interval: f64,
    ) -> Result<ActorId, ActorError> {
        let id = self.next_id(&record.name)?;
        let actor = Actor::new(
            id,
            record.name,
            ActorKind::Autonomous(AutonomousState::new(decision_interval)),
        )
        .with_facts(record.public_facts, record.private_facts);
        debug!(actor_id = %id, name = %actor.name, "Spawned autonomous actor");
        self.actors.push(actor);
        Ok(id)
    }

    /// Add a pre-built actor. Its `id` is overwritten with its table index.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::DuplicateName`] if the name is taken.
    pub fn insert(&mut self, mut actor: Actor) -> Result<ActorId, ActorError> {
        let id = self.next_id(&actor.name)?;
        actor.id = id;
        if actor.is_player() {
            self.player = Some(id);
        }
        self.actors.push(actor);
        Ok(id)
    }

    /// The player, if one was spawned.
    pub const fn player_id(&self) -> Option<ActorId> {
        self.player
    }

    /// Get an actor.
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.index())
    }

    /// Get an actor mutably.
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id.index())
    }

    /// Get an actor or fail with [`ActorError::ActorNotFound`].
    pub fn require(&self, id: ActorId) -> Result<&Actor, ActorError> {
        self.get(id).ok_or(ActorError::ActorNotFound(id))
    }

    /// Mutable variant of [`ActorRoster::require`].
    pub fn require_mut(&mut self, id: ActorId) -> Result<&mut Actor, ActorError> {
        self.get_mut(id).ok_or(ActorError::ActorNotFound(id))
    }

    /// First actor with the given name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Actor> {
        let wanted = name.to_lowercase();
        self.actors.iter().find(|a| a.name.to_lowercase() == wanted)
    }

    /// Number of actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// All actors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    /// Advance every actor's needs once, in roster order.
    ///
    /// # Errors
    ///
    /// The first [`ActorError::NeedViolated`] aborts the remaining actors.
    pub fn advance_all_needs(&mut self) -> Result<(), ActorError> {
        for actor in &mut self.actors {
            actor.advance_needs()?;
        }
        Ok(())
    }
}
