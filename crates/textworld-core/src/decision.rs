//! Decision source trait and in-process implementations.
//!
//! When an autonomous actor's decision gate opens, the update pass hands a
//! [`DecisionRequest`] to a [`DecisionSource`] and awaits an optional
//! [`Decision`]. The trait abstracts where decisions come from: a remote
//! text-generation backend, a scripted sequence in tests, or a stub that
//! never acts.
//!
//! A failed or empty decision is never fatal: the pass treats it as "no
//! intent" and carries on.

use std::collections::VecDeque;
use std::future::Future;

use textworld_types::{ActorId, Decision, DecisionRequest};

/// Errors that can occur while obtaining a decision.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    /// The actor did not decide within the deadline.
    #[error("actor {actor_id} timed out (deadline: {deadline_ms}ms)")]
    Timeout {
        /// The actor that timed out.
        actor_id: ActorId,
        /// The deadline in milliseconds.
        deadline_ms: u64,
    },

    /// An internal error in the decision source.
    #[error("decision source error: {message}")]
    Internal {
        /// Description of the error.
        message: String,
    },
}

/// A source of autonomous-actor decisions.
///
/// Calls are strictly sequential: the simulation holds `&mut self` on both
/// itself and the source for the duration of a call, so no second decision
/// can start while one is in flight.
pub trait DecisionSource {
    /// Decide what the requesting actor does next.
    ///
    /// `Ok(None)` means the source had nothing usable to offer.
    ///
    /// # Errors
    ///
    /// Returns [`DecisionError`] if the source failed. The caller logs it and
    /// proceeds as if `Ok(None)` had been returned.
    fn decide(
        &mut self,
        request: &DecisionRequest,
    ) -> impl Future<Output = Result<Option<Decision>, DecisionError>>;
}

/// A stub decision source that never decides anything.
///
/// Lets the simulation run without a text-generation backend: autonomous
/// actors still have their gates polled but produce no intents.
#[derive(Debug, Clone, Default)]
pub struct StubDecisionSource;

impl StubDecisionSource {
    /// Create a new stub decision source.
    pub const fn new() -> Self {
        Self
    }
}

impl DecisionSource for StubDecisionSource {
    async fn decide(
        &mut self,
        _request: &DecisionRequest,
    ) -> Result<Option<Decision>, DecisionError> {
        Ok(None)
    }
}

/// A decision source that replays a fixed queue of answers and records
/// every request it receives.
///
/// Once the queue is exhausted every further call returns `Ok(None)`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisionSource {
    answers: VecDeque<Result<Option<Decision>, String>>,
    requests: Vec<DecisionRequest>,
}

impl ScriptedDecisionSource {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a decision.
    #[must_use]
    pub fn then_decide(mut self, decision: Decision) -> Self {
        self.answers.push_back(Ok(Some(decision)));
        self
    }

    /// Queue an empty answer.
    #[must_use]
    pub fn then_nothing(mut self) -> Self {
        self.answers.push_back(Ok(None));
        self
    }

    /// Queue a failure.
    #[must_use]
    pub fn then_fail(mut self, message: impl Into<String>) -> Self {
        self.answers.push_back(Err(message.into()));
        self
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.requests.len()
    }

    /// Every request received, in call order.
    pub fn requests(&self) -> &[DecisionRequest] {
        &self.requests
    }
}

impl DecisionSource for ScriptedDecisionSource {
    async fn decide(
        &mut self,
        request: &DecisionRequest,
    ) -> Result<Option<Decision>, DecisionError> {
        self.requests.push(request.clone());
        match self.answers.pop_front() {
            Some(Ok(answer)) => Ok(answer),
            Some(Err(message)) => Err(DecisionError::Internal { message }),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request() -> DecisionRequest {
        DecisionRequest {
            actor_id: ActorId(1),
            actor_name: String::from("Michael"),
            private_description: String::from("Name: Michael"),
            location_name: String::from("The Well"),
            location_description: String::from("A location"),
            exits: vec![String::from("North")],
            recent_history: Vec::new(),
            nearby_actors: Vec::new(),
            recent_utterances: Vec::new(),
        }
    }

    #[tokio::test]
    async fn stub_never_decides() {
        let mut source = StubDecisionSource::new();
        let result = source.decide(&request()).await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn scripted_replays_in_order_then_goes_quiet() {
        let mut source = ScriptedDecisionSource::new()
            .then_decide(Decision {
                response: Some(String::from("Hello")),
                move_direction: None,
            })
            .then_fail("backend down");

        let first = source.decide(&request()).await.unwrap();
        assert_eq!(first.and_then(|d| d.response).as_deref(), Some("Hello"));
        assert!(source.decide(&request()).await.is_err());
        assert!(source.decide(&request()).await.unwrap().is_none());
        assert_eq!(source.call_count(), 3);
        assert_eq!(
            source.requests().first().map(|r| r.actor_name.as_str()),
            Some("Michael")
        );
    }
}
