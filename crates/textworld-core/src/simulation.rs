//! The Simulation root: world grid, actor roster, clock and update pass.
//!
//! One update pass runs, in order:
//!
//! 1. **Needs** -- every actor's needs advance once, through the roster.
//!    Location occupant lists are a visibility index and are not walked.
//! 2. **Collect** -- for each location in grid storage order, snapshot its
//!    occupants and gather their intents: queued intents first, then a
//!    decision if an autonomous actor's gate is open. An actor contributes
//!    at most once per pass even if it moved into a later location.
//!    Decision cooldowns count down by the wall-clock time since the
//!    previous pass, so a burst of catch-up passes does not reopen them.
//! 3. **Resolve** -- apply that location's batch before moving on.
//!
//! A violated need aborts the pass with [`TickError::Actor`]. Decision
//! failures and timeouts only cost the actor its turn.

use std::collections::BTreeSet;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use textworld_agents::{Actor, ActorError, ActorRoster, AutonomousState};
use textworld_types::{
    ActorId, CharacterRecord, Decision, DecisionRequest, Intent, LocationId, LocationRecord,
};
use textworld_world::{LocationState, WorldError, WorldMap, generate_forest};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::clock::{ClockError, TickClock};
use crate::config::SimulationConfig;
use crate::decision::{DecisionError, DecisionSource};
use crate::resolution;
use crate::tick::{PassSummary, TickError};
use crate::transition;

/// Default number of history entries shown to a deciding actor.
const DEFAULT_HISTORY_WINDOW: usize = 20;

/// Default deadline for a single decision call.
const DEFAULT_DECISION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound on the passes a single tick may run.
const DEFAULT_MAX_CATCH_UP_PASSES: usize = 5;

/// Errors that can occur while building a simulation.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// World generation or lookup failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// Actor creation failed.
    #[error("actor error: {source}")]
    Actor {
        /// The underlying actor error.
        #[from]
        source: ActorError,
    },

    /// The clock rejected the configured period.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// Initial placement failed.
    #[error("placement error: {source}")]
    Placement {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },

    /// Occupant sets disagree with the roster's placed actors.
    #[error("{placed} placed actors but {attached} occupant entries")]
    OccupancyMismatch {
        /// Actors with a location.
        placed: usize,
        /// Occupant entries across all tiles.
        attached: usize,
    },
}

/// The simulation root.
#[derive(Debug)]
pub struct Simulation {
    world: WorldMap,
    roster: ActorRoster,
    clock: TickClock,
    decision_timeout: Duration,
    history_window: usize,
    max_catch_up_passes: usize,
    last_pass_at: Instant,
    passes: u64,
}

impl Simulation {
    /// Create a simulation over an existing world with no actors.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Clock`] if `update_period` is not positive.
    pub fn new(world: WorldMap, update_period: f64) -> Result<Self, BuildError> {
        Ok(Self {
            world,
            roster: ActorRoster::new(),
            clock: TickClock::new(update_period)?,
            decision_timeout: DEFAULT_DECISION_TIMEOUT,
            history_window: DEFAULT_HISTORY_WINDOW,
            max_catch_up_passes: DEFAULT_MAX_CATCH_UP_PASSES,
            last_pass_at: Instant::now(),
            passes: 0,
        })
    }

    /// Builder: bound the passes one tick may run. At least one pass is
    /// always allowed.
    #[must_use]
    pub fn with_max_catch_up_passes(mut self, passes: usize) -> Self {
        self.max_catch_up_passes = passes.max(1);
        self
    }

    /// Builder: bound each decision call.
    #[must_use]
    pub const fn with_decision_timeout(mut self, timeout: Duration) -> Self {
        self.decision_timeout = timeout;
        self
    }

    /// Builder: how many history entries a deciding actor sees.
    #[must_use]
    pub const fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Build the configured forest, spawn the characters at random tiles
    /// and the player at its configured start.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if generation, spawning or placement fails, or
    /// if the resulting occupant sets disagree with the roster.
    pub fn from_config(
        config: &SimulationConfig,
        locations: Vec<LocationRecord>,
        characters: Vec<CharacterRecord>,
    ) -> Result<Self, BuildError> {
        let mut rng = config
            .world
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        let world = generate_forest(
            config.world.width,
            config.world.height,
            locations,
            &config.world.landmarks,
            &mut rng,
        )?;
        let mut sim = Self::new(world, config.time.update_period_secs)?
            .with_decision_timeout(Duration::from_millis(config.actors.decision_timeout_ms))
            .with_history_window(config.actors.history_window)
            .with_max_catch_up_passes(config.time.max_catch_up_passes);

        for record in characters {
            let x = rng.random_range(0..config.world.width);
            let y = rng.random_range(0..config.world.height);
            let at = sim.tile_id_at(x, y)?;
            let id = sim
                .roster
                .spawn_autonomous(record, config.actors.decision_interval_secs)?;
            transition::move_actor(&mut sim.world, &mut sim.roster, id, at)?;
        }

        let player = &config.actors.player;
        let start = sim.tile_id_at(player.start_x, player.start_y)?;
        let player_id = sim.roster.spawn_player(player)?;
        transition::move_actor(&mut sim.world, &mut sim.roster, player_id, start)?;

        sim.verify_occupancy()?;
        info!(
            world = %config.world.name,
            seed = ?config.world.seed,
            locations = sim.world.location_count(),
            actors = sim.roster.len(),
            "Simulation built"
        );
        Ok(sim)
    }

    fn tile_id_at(&self, x: usize, y: usize) -> Result<LocationId, BuildError> {
        self.world
            .tile_id_at(x, y)
            .ok_or_else(|| WorldError::TileOutOfBounds { x, y }.into())
    }

    /// Add an actor and place it at `at`. The actor's `id` is replaced by
    /// its roster index, which is returned.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Actor`] for a duplicate name and
    /// [`BuildError::Placement`] if `at` does not exist.
    pub fn add_actor(&mut self, actor: Actor, at: LocationId) -> Result<ActorId, BuildError> {
        self.world.require(at)?;
        let id = self.roster.insert(actor)?;
        transition::move_actor(&mut self.world, &mut self.roster, id, at)?;
        Ok(id)
    }

    /// Check that every placed actor is attached exactly where its location
    /// field says.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::OccupancyMismatch`] if the counts disagree and
    /// [`BuildError::World`] if an actor is missing from its tile.
    pub fn verify_occupancy(&self) -> Result<(), BuildError> {
        let mut placed = 0_usize;
        for actor in self.roster.iter() {
            let Some(at) = actor.location() else { continue };
            placed = placed.saturating_add(1);
            if !self.world.require(at)?.contains_actor(actor.id) {
                return Err(WorldError::ActorNotAtLocation {
                    actor: actor.id,
                    location: at,
                }
                .into());
            }
        }
        let attached = self
            .world
            .locations()
            .map(LocationState::occupant_count)
            .fold(0_usize, usize::saturating_add);
        if placed != attached {
            return Err(BuildError::OccupancyMismatch { placed, attached });
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Read surface
    // -------------------------------------------------------------------

    /// The world grid.
    pub const fn world(&self) -> &WorldMap {
        &self.world
    }

    /// The actor roster.
    pub const fn roster(&self) -> &ActorRoster {
        &self.roster
    }

    /// The tile at `(x, y)`.
    pub fn get_tile_at(&self, x: usize, y: usize) -> Option<&LocationState> {
        self.world.get_tile_at(x, y)
    }

    /// An actor by id.
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.roster.get(id)
    }

    /// The player, if one was spawned.
    pub const fn player_id(&self) -> Option<ActorId> {
        self.roster.player_id()
    }

    /// Update passes run so far.
    pub const fn pass_count(&self) -> u64 {
        self.passes
    }

    /// The fixed-step clock.
    pub const fn clock(&self) -> &TickClock {
        &self.clock
    }

    // -------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------

    /// Queue an intent for an actor's next pass.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Actor`] if the actor does not exist.
    pub fn queue_intent(&mut self, actor: ActorId, intent: Intent) -> Result<(), TickError> {
        debug!(actor_id = %actor, kind = intent.kind(), "Queued intent");
        self.roster.require_mut(actor)?.queue_intent(intent);
        Ok(())
    }

    // -------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------

    /// Accumulate `delta_time` seconds and run the update passes that became
    /// due, returning their summaries.
    ///
    /// At most `max_catch_up_passes` run; whole periods beyond that are
    /// dropped so a slow frame cannot snowball into the next one.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Clock`] for an invalid delta and propagates the
    /// first pass error (a violated need). Periods still due stay in the
    /// clock for the next tick.
    pub async fn tick<S: DecisionSource>(
        &mut self,
        delta_time: f64,
        source: &mut S,
    ) -> Result<Vec<PassSummary>, TickError> {
        self.clock.accumulate(delta_time)?;
        let mut summaries = Vec::new();
        while summaries.len() < self.max_catch_up_passes && self.clock.take_pass() {
            summaries.push(self.update_pass(source).await?);
        }
        let dropped = self.clock.discard_backlog();
        if dropped > 0.0 {
            warn!(
                dropped_secs = dropped,
                period_secs = self.clock.update_period(),
                max_passes = self.max_catch_up_passes,
                "Tick fell behind, dropping backlog"
            );
        }
        Ok(summaries)
    }

    /// Run one update pass immediately, bypassing the clock.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Actor`] on a need violation; the pass stops
    /// before any intent is collected.
    pub async fn update_pass<S: DecisionSource>(
        &mut self,
        source: &mut S,
    ) -> Result<PassSummary, TickError> {
        self.passes = self.passes.saturating_add(1);
        let mut summary = PassSummary::new(self.passes);

        self.roster.advance_all_needs()?;

        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_pass_at).as_secs_f64();
        self.last_pass_at = now;
        let mut acted: BTreeSet<ActorId> = BTreeSet::new();
        for location in self.world.location_ids() {
            let occupants = self.world.require(location)?.list_present_actors();
            let mut batch = Vec::new();
            for actor_id in occupants {
                if !acted.insert(actor_id) {
                    continue;
                }
                let intents = self
                    .collect_intents(actor_id, elapsed, source, &mut summary)
                    .await?;
                batch.extend(intents.into_iter().map(|intent| (actor_id, intent)));
            }
            if !batch.is_empty() {
                resolution::resolve_intents(
                    &mut self.world,
                    &mut self.roster,
                    batch,
                    &mut summary,
                )?;
            }
        }

        debug!(
            pass = summary.pass,
            decisions = summary.decisions,
            moves = summary.moves,
            utterances = summary.utterances,
            dropped = summary.dropped,
            "Update pass complete"
        );
        Ok(summary)
    }

    /// Drain an actor's queue and, if its gate is open, ask the source.
    async fn collect_intents<S: DecisionSource>(
        &mut self,
        actor_id: ActorId,
        elapsed: f64,
        source: &mut S,
        summary: &mut PassSummary,
    ) -> Result<Vec<Intent>, TickError> {
        let actor = self.roster.require_mut(actor_id)?;
        let mut intents = actor.drain_intents();
        let due = actor.autonomous_mut().is_some_and(|s| s.poll(elapsed));
        if !due {
            return Ok(intents);
        }

        let request = self.build_request(actor_id)?;
        summary.decisions = summary.decisions.saturating_add(1);
        let deadline_ms = u64::try_from(self.decision_timeout.as_millis()).unwrap_or(u64::MAX);

        let decision = match tokio::time::timeout(self.decision_timeout, source.decide(&request))
            .await
        {
            Ok(Ok(Some(decision))) => decision,
            Ok(Ok(None)) => {
                debug!(actor_id = %actor_id, "No decision produced");
                return Ok(intents);
            }
            Ok(Err(e)) => {
                warn!(actor_id = %actor_id, error = %e, "Decision source failed");
                return Ok(intents);
            }
            Err(_) => {
                let e = DecisionError::Timeout {
                    actor_id,
                    deadline_ms,
                };
                warn!(error = %e, "Decision timed out");
                return Ok(intents);
            }
        };

        intents.extend(self.decision_intents(actor_id, decision, summary)?);
        Ok(intents)
    }

    /// Build the decision context for an actor, consuming its buffered
    /// statements.
    fn build_request(&mut self, actor_id: ActorId) -> Result<DecisionRequest, TickError> {
        let recent_utterances = self
            .roster
            .require_mut(actor_id)?
            .autonomous_mut()
            .map(AutonomousState::take_statements)
            .unwrap_or_default();

        let actor = self.roster.require(actor_id)?;
        let tile = actor.location().and_then(|at| self.world.location(at));
        let nearby_actors = tile
            .map(|t| {
                t.occupants()
                    .iter()
                    .filter(|id| **id != actor_id)
                    .filter_map(|id| self.roster.get(*id))
                    .map(Actor::public_description)
                    .collect()
            })
            .unwrap_or_default();

        Ok(DecisionRequest {
            actor_id,
            actor_name: actor.name.clone(),
            private_description: actor.private_description(),
            location_name: tile.map(|t| t.name.clone()).unwrap_or_default(),
            location_description: tile.map(|t| t.description.clone()).unwrap_or_default(),
            exits: tile.map(LocationState::exit_names).unwrap_or_default(),
            recent_history: actor.history().recent(self.history_window).to_vec(),
            nearby_actors,
            recent_utterances,
        })
    }

    /// Turn a decision into intents. The move is kept only if it names an
    /// exit of the actor's current location.
    fn decision_intents(
        &self,
        actor_id: ActorId,
        decision: Decision,
        summary: &mut PassSummary,
    ) -> Result<Vec<Intent>, TickError> {
        let mut intents = Vec::new();
        if let Some(line) = decision.response.filter(|r| !r.trim().is_empty()) {
            intents.push(Intent::Say { content: line });
        }
        if let Some(direction) = decision.move_direction.filter(|m| !m.trim().is_empty()) {
            let actor = self.roster.require(actor_id)?;
            let exit = actor
                .location()
                .and_then(|at| self.world.location(at))
                .and_then(|t| t.find_exit(direction.trim()));
            match exit {
                Some(portal) => intents.push(Intent::move_through(portal.name.clone())),
                None => {
                    debug!(actor_id = %actor_id, direction = %direction, "Dropped decided move through unknown exit");
                    summary.dropped = summary.dropped.saturating_add(1);
                }
            }
        }
        Ok(intents)
    }
}
