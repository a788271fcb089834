//! Configuration types for the decision runner.
//!
//! Built from the `llm` section of `textworld-config.yaml` (after its
//! `TEXTWORLD_LLM_*` environment overrides have been applied).

use std::path::PathBuf;
use std::time::Duration;

use textworld_core::config::LlmConfig;

use crate::error::RunnerError;

/// Complete runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Backend connection settings.
    pub backend: LlmBackendConfig,
    /// Directory searched for a `system.j2` override.
    pub templates_dir: String,
    /// Decision log file, if logging is enabled.
    pub decision_log: Option<PathBuf>,
    /// HTTP request timeout.
    pub request_timeout: Duration,
}

/// Configuration for a single LLM backend.
#[derive(Debug, Clone)]
pub struct LlmBackendConfig {
    /// The backend type.
    pub backend_type: BackendType,
    /// Base API URL (e.g. `http://localhost:11434`).
    pub api_url: String,
    /// API key for authentication (ignored by Ollama).
    pub api_key: String,
    /// Model identifier (e.g. `mistral`).
    pub model: String,
}

/// Supported LLM backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Ollama native `/api/generate` endpoint.
    Ollama,
    /// `OpenAI`-compatible chat completions API.
    OpenAi,
    /// Anthropic Messages API.
    Anthropic,
}

impl BackendType {
    /// Parse a backend name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] for an unknown name.
    pub fn parse(name: &str) -> Result<Self, RunnerError> {
        match name.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" | "openai-compatible" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(RunnerError::Config(format!(
                "unknown backend type: {other} (expected ollama, openai, or anthropic)"
            ))),
        }
    }
}

impl RunnerConfig {
    /// Build from the simulation's LLM configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] for an unknown backend or an empty
    /// API URL.
    pub fn from_llm_config(config: &LlmConfig) -> Result<Self, RunnerError> {
        let backend_type = BackendType::parse(&config.backend)?;
        let api_url = config.api_url.trim_end_matches('/').to_owned();
        if api_url.is_empty() {
            return Err(RunnerError::Config("llm.api_url is empty".to_owned()));
        }
        let decision_log = if config.decision_log.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(&config.decision_log))
        };

        Ok(Self {
            backend: LlmBackendConfig {
                backend_type,
                api_url,
                api_key: config.api_key.clone(),
                model: config.model.clone(),
            },
            templates_dir: config.templates_dir.clone(),
            decision_log,
            request_timeout: Duration::from_millis(config.request_timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_are_case_insensitive() {
        assert_eq!(BackendType::parse("Ollama").ok(), Some(BackendType::Ollama));
        assert_eq!(BackendType::parse("OPENAI").ok(), Some(BackendType::OpenAi));
        assert_eq!(
            BackendType::parse("anthropic").ok(),
            Some(BackendType::Anthropic)
        );
        assert!(BackendType::parse("gemini").is_err());
    }

    #[test]
    fn from_llm_config_trims_url_and_disables_empty_log() {
        let llm = LlmConfig {
            api_url: "http://localhost:11434/".to_owned(),
            decision_log: String::new(),
            ..LlmConfig::default()
        };
        let config = RunnerConfig::from_llm_config(&llm);
        assert!(config.is_ok());
        if let Ok(c) = config {
            assert_eq!(c.backend.api_url, "http://localhost:11434");
            assert!(c.decision_log.is_none());
            assert_eq!(c.backend.backend_type, BackendType::Ollama);
        }
    }

    #[test]
    fn empty_url_is_rejected() {
        let llm = LlmConfig {
            api_url: String::new(),
            ..LlmConfig::default()
        };
        assert!(RunnerConfig::from_llm_config(&llm).is_err());
    }
}
