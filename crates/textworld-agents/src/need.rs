//! Needs: decaying scalars such as Health, Faith or Sanity.
//!
//! A need only ever decays; nothing replenishes it. Once its value drops
//! below zero the need is violated: the violation is reported exactly once
//! and the value is frozen from then on.
//!
//! The current value is derived from the number of decay steps applied
//! (`initial - decay * steps`) rather than by repeated subtraction, so the
//! boundary at zero is hit exactly when the arithmetic says it should be.

use serde::{Deserialize, Serialize};
use textworld_types::ActorId;

use crate::error::ActorError;

/// A single decaying scalar owned by one actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Need {
    /// Display name, matched case-insensitively.
    pub name: String,
    /// Current value.
    value: f64,
    /// Ceiling used for percentage display.
    pub max_value: f64,
    /// Amount subtracted per update pass.
    pub decay_per_tick: f64,
    initial_value: f64,
    steps: u32,
    violated: bool,
}

impl Need {
    /// Create a need at `value` out of `max_value`.
    pub fn new(name: impl Into<String>, value: f64, max_value: f64, decay_per_tick: f64) -> Self {
        Self {
            name: name.into(),
            value,
            max_value,
            decay_per_tick,
            initial_value: value,
            steps: 0,
            violated: false,
        }
    }

    /// Current value.
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Whether this need has already been violated.
    pub const fn is_violated(&self) -> bool {
        self.violated
    }

    /// Value as a percentage of `max_value`, for display.
    pub fn percentage(&self) -> f64 {
        if self.max_value <= 0.0 {
            return 0.0;
        }
        self.value / self.max_value * 100.0
    }

    /// Apply one decay step.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::NeedViolated`] the first time the value falls
    /// below zero. Later calls leave the value unchanged and return `Ok`.
    pub fn advance(&mut self, owner: ActorId, owner_name: &str) -> Result<(), ActorError> {
        if self.violated {
            return Ok(());
        }
        self.steps = self.steps.saturating_add(1);
        self.value = self.initial_value - self.decay_per_tick * f64::from(self.steps);
        if self.value < 0.0 {
            self.violated = true;
            return Err(ActorError::NeedViolated {
                actor: owner,
                actor_name: owner_name.to_owned(),
                need: self.name.clone(),
                value: self.value,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: ActorId = ActorId(0);

    #[test]
    fn decays_by_rate() {
        let mut need = Need::new("Health", 100.0, 100.0, 0.5);
        assert!(need.advance(OWNER, "A").is_ok());
        assert!(need.advance(OWNER, "A").is_ok());
        assert!((need.value() - 99.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reaching_exactly_zero_is_not_a_violation() {
        let mut need = Need::new("Health", 0.2, 100.0, 0.1);
        assert!(need.advance(OWNER, "A").is_ok());
        assert!(need.advance(OWNER, "A").is_ok());
        assert!(need.value().abs() < f64::EPSILON);
        assert!(!need.is_violated());
    }

    #[test]
    fn violation_surfaces_once_then_freezes() {
        let mut need = Need::new("Sanity", 1.0, 100.0, 0.6);
        assert!(need.advance(OWNER, "A").is_ok());
        let second = need.advance(OWNER, "A");
        assert!(matches!(
            second,
            Err(ActorError::NeedViolated { ref need, .. }) if need == "Sanity"
        ));
        let frozen = need.value();
        assert!(need.advance(OWNER, "A").is_ok());
        assert!((need.value() - frozen).abs() < f64::EPSILON);
        assert!(need.is_violated());
    }

    #[test]
    fn percentage_of_max() {
        let need = Need::new("Faith", 25.0, 50.0, 0.0);
        assert!((need.percentage() - 50.0).abs() < f64::EPSILON);
        let degenerate = Need::new("Void", 1.0, 0.0, 0.0);
        assert!(degenerate.percentage().abs() < f64::EPSILON);
    }
}
