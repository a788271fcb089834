//! Configuration and defaults for actors.
//!
//! These values correspond to the `actors` section of
//! `textworld-config.yaml`. [`ActorsConfig`] bundles every tunable so that
//! callers (the simulation, tests) can override defaults.

use serde::{Deserialize, Serialize};

use crate::need::Need;

/// Actor tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorsConfig {
    /// Seconds of simulated time between unprompted autonomous decisions
    /// (default: 10.0).
    #[serde(default = "default_decision_interval")]
    pub decision_interval_secs: f64,

    /// Upper bound on a single decision call in milliseconds
    /// (default: 30000). Expiry counts as "no intent".
    #[serde(default = "default_decision_timeout")]
    pub decision_timeout_ms: u64,

    /// Number of recent history entries shown to a deciding actor
    /// (default: 20).
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// The human-controlled actor.
    #[serde(default)]
    pub player: PlayerConfig,
}

impl Default for ActorsConfig {
    fn default() -> Self {
        Self {
            decision_interval_secs: default_decision_interval(),
            decision_timeout_ms: default_decision_timeout(),
            history_window: default_history_window(),
            player: PlayerConfig::default(),
        }
    }
}

const fn default_decision_interval() -> f64 {
    10.0
}

const fn default_decision_timeout() -> u64 {
    30_000
}

const fn default_history_window() -> usize {
    20
}

/// The player's identity, needs and starting tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Player name.
    pub name: String,
    /// Facts anyone nearby can see.
    #[serde(default)]
    pub public_facts: Vec<String>,
    /// Facts only the player knows.
    #[serde(default)]
    pub private_facts: Vec<String>,
    /// Needs in declared order.
    #[serde(default)]
    pub needs: Vec<NeedConfig>,
    /// Starting column.
    #[serde(default)]
    pub start_x: usize,
    /// Starting row.
    #[serde(default)]
    pub start_y: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "John Ward".to_owned(),
            public_facts: vec![
                "John Ward is a priest".to_owned(),
                "John Ward is 6 feet tall".to_owned(),
                "John Ward is White".to_owned(),
                "John Ward is muscular".to_owned(),
            ],
            private_facts: Vec::new(),
            needs: vec![
                NeedConfig::full("Health", 0.0001),
                NeedConfig::full("Faith", 0.0002),
                NeedConfig::full("Sanity", 0.001),
            ],
            start_x: 4,
            start_y: 1,
        }
    }
}

impl PlayerConfig {
    /// Build the configured needs.
    pub fn build_needs(&self) -> Vec<Need> {
        self.needs.iter().map(NeedConfig::to_need).collect()
    }
}

/// One need definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedConfig {
    /// Need name.
    pub name: String,
    /// Starting value (default: 100).
    #[serde(default = "default_need_value")]
    pub value: f64,
    /// Maximum value (default: 100).
    #[serde(default = "default_need_value")]
    pub max_value: f64,
    /// Decay per update pass.
    pub decay_per_tick: f64,
}

impl NeedConfig {
    /// A need starting at 100 out of 100.
    pub fn full(name: &str, decay_per_tick: f64) -> Self {
        Self {
            name: name.to_owned(),
            value: default_need_value(),
            max_value: default_need_value(),
            decay_per_tick,
        }
    }

    /// Build the runtime [`Need`].
    pub fn to_need(&self) -> Need {
        Need::new(self.name.clone(), self.value, self.max_value, self.decay_per_tick)
    }
}

const fn default_need_value() -> f64 {
    100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_player_matches_forest_game() {
        let config = ActorsConfig::default();
        assert_eq!(config.player.name, "John Ward");
        assert_eq!(config.player.needs.len(), 3);
        assert!((config.decision_interval_secs - 10.0).abs() < f64::EPSILON);
        let needs = config.player.build_needs();
        assert_eq!(needs.first().map(|n| n.name.as_str()), Some("Health"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let parsed: Result<ActorsConfig, _> = serde_json::from_str(
            r#"{"decision_interval_secs": 2.5, "player": {"name": "Ann", "needs": [{"name": "Hope", "decay_per_tick": 1.0}]}}"#,
        );
        assert!(parsed.is_ok());
        if let Ok(c) = parsed {
            assert!((c.decision_interval_secs - 2.5).abs() < f64::EPSILON);
            assert_eq!(c.decision_timeout_ms, 30_000);
            assert_eq!(c.player.name, "Ann");
            assert!(c.player.public_facts.is_empty());
            let hope = c.player.needs.first().map(|n| n.value);
            assert_eq!(hope.map(|v| (v - 100.0).abs() < f64::EPSILON), Some(true));
        }
    }
}
