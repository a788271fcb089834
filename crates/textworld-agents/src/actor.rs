//! Actors: the player and autonomous characters.
//!
//! Both variants share one [`Actor`] struct carrying needs, a location, a
//! history log and a FIFO of pending intents. What differs is where intents
//! come from, which is captured by the closed [`ActorKind`] variant: the
//! player's intents are queued by the command layer, an autonomous actor's
//! are produced by a gated decision call.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use textworld_types::{ActorId, Intent, LocationId, Utterance};

use crate::error::ActorError;
use crate::history::HistoryLog;
use crate::need::Need;

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

/// Where an actor's intents come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActorKind {
    /// Intents arrive only from external command input.
    Player,
    /// Intents arrive from periodic or event-triggered decisions.
    Autonomous(AutonomousState),
}

/// Decision gating state for an autonomous actor.
///
/// A decision is due when the countdown reaches zero or when something
/// happened nearby since the last decision (the reactive flag). Taking a
/// decision resets both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutonomousState {
    decision_interval: f64,
    time_until_decision: f64,
    reactive: bool,
    recent_statements: Vec<Utterance>,
}

impl AutonomousState {
    /// Start with a full countdown and nothing buffered.
    pub const fn new(decision_interval: f64) -> Self {
        Self {
            decision_interval,
            time_until_decision: decision_interval,
            reactive: false,
            recent_statements: Vec::new(),
        }
    }

    /// Advance the countdown by `elapsed` seconds and report whether a
    /// decision is due. When it is, the countdown and reactive flag reset.
    pub fn poll(&mut self, elapsed: f64) -> bool {
        self.time_until_decision -= elapsed;
        if self.time_until_decision <= 0.0 || self.reactive {
            self.time_until_decision = self.decision_interval;
            self.reactive = false;
            return true;
        }
        false
    }

    /// Request a decision on the next poll.
    pub const fn mark_reactive(&mut self) {
        self.reactive = true;
    }

    /// Whether a nearby event is pending.
    pub const fn is_reactive(&self) -> bool {
        self.reactive
    }

    /// Seconds left before an unprompted decision.
    pub const fn time_until_decision(&self) -> f64 {
        self.time_until_decision
    }

    /// Statements heard since the last decision.
    pub fn recent_statements(&self) -> &[Utterance] {
        &self.recent_statements
    }

    /// Take and clear the buffered statements.
    pub fn take_statements(&mut self) -> Vec<Utterance> {
        std::mem::take(&mut self.recent_statements)
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// An entity with needs, a location, a history and pending intents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable identifier (roster index).
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Facts visible to anyone nearby.
    pub public_facts: Vec<String>,
    /// Facts only this actor knows.
    pub private_facts: Vec<String>,
    needs: Vec<Need>,
    location: Option<LocationId>,
    history: HistoryLog,
    pending_intents: VecDeque<Intent>,
    kind: ActorKind,
}

impl Actor {
    /// Create an unplaced actor.
    pub fn new(id: ActorId, name: impl Into<String>, kind: ActorKind) -> Self {
        Self {
            id,
            name: name.into(),
            public_facts: Vec::new(),
            private_facts: Vec::new(),
            needs: Vec::new(),
            location: None,
            history: HistoryLog::new(),
            pending_intents: VecDeque::new(),
            kind,
        }
    }

    /// Builder: set facts.
    #[must_use]
    pub fn with_facts(mut self, public_facts: Vec<String>, private_facts: Vec<String>) -> Self {
        self.public_facts = public_facts;
        self.private_facts = private_facts;
        self
    }

    /// Builder: set needs in declared order.
    #[must_use]
    pub fn with_needs(mut self, needs: Vec<Need>) -> Self {
        self.needs = needs;
        self
    }

    /// Mutable access to the autonomous state, if this is an autonomous actor.
    pub const fn autonomous_mut(&mut self) -> Option<&mut AutonomousState> {
        match &mut self.kind {
            ActorKind::Autonomous(state) => Some(state),
            ActorKind::Player => None,
        }
    }

    /// Whether this is the player.
    pub const fn is_player(&self) -> bool {
        matches!(self.kind, ActorKind::Player)
    }

    // -------------------------------------------------------------------
    // Location
    // -------------------------------------------------------------------

    /// Current location, `None` before first placement.
    pub const fn location(&self) -> Option<LocationId> {
        self.location
    }

    /// Overwrite the location field.
    ///
    /// This does not touch any occupant set; callers outside the
    /// simulation's transition operation will desynchronise the world.
    pub const fn set_location(&mut self, location: Option<LocationId>) {
        self.location = location;
    }

    // -------------------------------------------------------------------
    // Descriptions
    // -------------------------------------------------------------------

    /// Name and public facts, as seen by others.
    pub fn public_description(&self) -> String {
        describe(&self.name, &self.public_facts, &[])
    }

    /// Name with public and private facts, as seen by the actor itself.
    pub fn private_description(&self) -> String {
        describe(&self.name, &self.public_facts, &self.private_facts)
    }

    // -------------------------------------------------------------------
    // History and perception
    // -------------------------------------------------------------------

    /// The history log.
    pub const fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Append a history entry without marking anything as noteworthy.
    pub fn record(&mut self, entry: impl Into<String>) {
        self.history.push(entry);
    }

    /// Append a history entry for something that happened nearby.
    ///
    /// Autonomous actors become reactive and decide on their next update.
    pub fn observe(&mut self, entry: impl Into<String>) {
        self.history.push(entry);
        if let Some(state) = self.autonomous_mut() {
            state.mark_reactive();
        }
    }

    /// Receive speech. The sole channel through which speech enters history.
    ///
    /// The speaker's own words are tagged `(Said)`, others' `(Heard)`.
    /// Speech from others also makes an autonomous actor reactive and is
    /// buffered for its next decision.
    pub fn hear(&mut self, speaker: ActorId, speaker_name: &str, content: &str) {
        if speaker == self.id {
            self.history.push(format!("(Said) {speaker_name}: {content}"));
            return;
        }
        self.history.push(format!("(Heard) {speaker_name}: {content}"));
        if let Some(state) = self.autonomous_mut() {
            state.mark_reactive();
            state.recent_statements.push(Utterance {
                speaker: speaker_name.to_owned(),
                content: content.to_owned(),
            });
        }
    }

    // -------------------------------------------------------------------
    // Needs
    // -------------------------------------------------------------------

    /// Needs in declared order.
    pub fn needs(&self) -> &[Need] {
        &self.needs
    }

    /// Current value of a need by case-insensitive name.
    pub fn get_need_value(&self, name: &str) -> Option<f64> {
        let wanted = name.to_lowercase();
        self.needs
            .iter()
            .find(|n| n.name.to_lowercase() == wanted)
            .map(Need::value)
    }

    /// Advance every need once, in declared order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ActorError::NeedViolated`]; needs after it are not
    /// advanced this pass.
    pub fn advance_needs(&mut self) -> Result<(), ActorError> {
        for need in &mut self.needs {
            need.advance(self.id, &self.name)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Intents
    // -------------------------------------------------------------------

    /// Queue an intent for the next update pass.
    pub fn queue_intent(&mut self, intent: Intent) {
        self.pending_intents.push_back(intent);
    }

    /// Number of queued intents.
    pub fn pending_count(&self) -> usize {
        self.pending_intents.len()
    }

    /// Empty the pending queue, returning its contents in FIFO order.
    pub fn drain_intents(&mut self) -> Vec<Intent> {
        self.pending_intents.drain(..).collect()
    }
}

fn describe(name: &str, public_facts: &[String], private_facts: &[String]) -> String {
    let mut out = format!("Name: {name}\nKnown Information:");
    for fact in public_facts.iter().chain(private_facts) {
        out.push_str("\n\t");
        out.push_str(fact);
    }
    out
}
