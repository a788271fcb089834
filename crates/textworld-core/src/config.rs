//! Configuration loading and typed config structures for the Textworld
//! simulation.
//!
//! The canonical configuration lives in `textworld-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads the file and applies
//! environment overrides.

use std::path::Path;

use serde::Deserialize;
use textworld_agents::ActorsConfig;
use textworld_world::{Landmark, generation::default_landmarks};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value for {name} ({value:?}): {reason}")]
    InvalidEnv {
        /// Variable name.
        name: String,
        /// Offending value.
        value: String,
        /// Parser message.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `textworld-config.yaml`. Every field has a
/// default, so an empty file yields the stock forest game.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Grid size, seed and landmarks.
    #[serde(default)]
    pub world: WorldConfig,

    /// Update period and frame pacing.
    #[serde(default)]
    pub time: TimeConfig,

    /// Player definition and autonomous decision tuning.
    #[serde(default)]
    pub actors: ActorsConfig,

    /// Text-generation backend settings.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Asset file locations.
    #[serde(default)]
    pub assets: AssetsConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `TEXTWORLD_LLM_URL` overrides `llm.api_url`
    /// - `TEXTWORLD_LLM_MODEL` overrides `llm.model`
    /// - `TEXTWORLD_LLM_API_KEY` overrides `llm.api_key`
    /// - `TEXTWORLD_SEED` overrides `world.seed`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override does not parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string and apply env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `TEXTWORLD_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if `TEXTWORLD_SEED` is not a
    /// number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.llm.apply_env_overrides();
        if let Ok(val) = std::env::var("TEXTWORLD_SEED") {
            let seed = val
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidEnv {
                    name: "TEXTWORLD_SEED".to_owned(),
                    value: val.clone(),
                    reason: e.to_string(),
                })?;
            self.world.seed = Some(seed);
        }
        Ok(())
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable world name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Grid width in tiles.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Grid height in tiles.
    #[serde(default = "default_height")]
    pub height: usize,

    /// RNG seed for layout and starting positions. `None` draws from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Locations pinned to fixed coordinates after shuffling.
    #[serde(default = "default_landmarks")]
    pub landmarks: Vec<Landmark>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            width: default_width(),
            height: default_height(),
            seed: None,
            landmarks: default_landmarks(),
        }
    }
}

fn default_world_name() -> String {
    "The Forest".to_owned()
}

const fn default_width() -> usize {
    10
}

const fn default_height() -> usize {
    16
}

/// Time configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeConfig {
    /// Seconds of accumulated time per update pass.
    #[serde(default = "default_update_period")]
    pub update_period_secs: f64,

    /// Host frame interval in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Most passes a single tick may run; older whole periods are dropped.
    #[serde(default = "default_max_catch_up_passes")]
    pub max_catch_up_passes: usize,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            update_period_secs: default_update_period(),
            frame_interval_ms: default_frame_interval_ms(),
            max_catch_up_passes: default_max_catch_up_passes(),
        }
    }
}

const fn default_update_period() -> f64 {
    1.0
}

const fn default_frame_interval_ms() -> u64 {
    100
}

const fn default_max_catch_up_passes() -> usize {
    5
}

/// Text-generation backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LlmConfig {
    /// Backend name: `ollama`, `openai` or `anthropic`.
    #[serde(default = "default_llm_backend")]
    pub backend: String,

    /// Base API URL.
    #[serde(default = "default_llm_url")]
    pub api_url: String,

    /// API key (unused by Ollama).
    #[serde(default)]
    pub api_key: String,

    /// Model identifier.
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Directory holding an optional `system.j2` prompt override.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    /// JSON-lines file receiving every exchange. Empty disables logging.
    #[serde(default = "default_decision_log")]
    pub decision_log: String,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl LlmConfig {
    /// Apply `TEXTWORLD_LLM_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("TEXTWORLD_LLM_URL") {
            self.api_url = val;
        }
        if let Ok(val) = std::env::var("TEXTWORLD_LLM_MODEL") {
            self.model = val;
        }
        if let Ok(val) = std::env::var("TEXTWORLD_LLM_API_KEY") {
            self.api_key = val;
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend: default_llm_backend(),
            api_url: default_llm_url(),
            api_key: String::new(),
            model: default_llm_model(),
            templates_dir: default_templates_dir(),
            decision_log: default_decision_log(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_llm_backend() -> String {
    "ollama".to_owned()
}

fn default_llm_url() -> String {
    "http://localhost:11434".to_owned()
}

fn default_llm_model() -> String {
    "mistral".to_owned()
}

fn default_templates_dir() -> String {
    "templates".to_owned()
}

fn default_decision_log() -> String {
    "output.log".to_owned()
}

const fn default_request_timeout_ms() -> u64 {
    25_000
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: `pretty` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_log_format() -> String {
    "pretty".to_owned()
}

/// Asset file locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetsConfig {
    /// JSON array of location records.
    #[serde(default = "default_locations_asset")]
    pub locations: String,

    /// JSON array of character records.
    #[serde(default = "default_characters_asset")]
    pub characters: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            locations: default_locations_asset(),
            characters: default_characters_asset(),
        }
    }
}

fn default_locations_asset() -> String {
    "assets/locations.json".to_owned()
}

fn default_characters_asset() -> String {
    "assets/characters.json".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_stock_game() {
        let config = SimulationConfig::parse_without_env("").unwrap();
        assert_eq!(config.world.width, 10);
        assert_eq!(config.world.height, 16);
        assert_eq!(config.world.landmarks.len(), 3);
        assert!((config.time.update_period_secs - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.time.max_catch_up_passes, 5);
        assert_eq!(config.actors.player.name, "John Ward");
        assert_eq!(config.llm.backend, "ollama");
    }

    #[test]
    fn parses_nested_sections() {
        let yaml = r"
world:
  width: 4
  height: 3
  seed: 7
  landmarks:
    - name: The Well
      x: 1
      y: 1
time:
  update_period_secs: 0.5
  max_catch_up_passes: 2
actors:
  decision_interval_secs: 3.0
  player:
    name: Ann
    needs:
      - name: Hope
        decay_per_tick: 0.5
llm:
  backend: openai
  model: gpt-test
logging:
  format: json
";
        let config = SimulationConfig::parse_without_env(yaml).unwrap();
        assert_eq!(config.world.width, 4);
        assert_eq!(config.world.seed, Some(7));
        assert_eq!(config.world.landmarks.len(), 1);
        assert!((config.time.update_period_secs - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.time.max_catch_up_passes, 2);
        assert_eq!(config.actors.player.name, "Ann");
        assert_eq!(config.llm.backend, "openai");
        assert_eq!(config.llm.api_url, "http://localhost:11434");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.assets.characters, "assets/characters.json");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = SimulationConfig::parse_without_env("world: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("textworld-config-does-not-exist.yaml");
        let result = SimulationConfig::from_file(&path);
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
