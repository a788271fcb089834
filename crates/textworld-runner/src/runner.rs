//! LLM-backed decision source for autonomous actors.
//!
//! Pipeline per decision:
//! 1. Render the prompt from the [`DecisionRequest`]
//! 2. Call the configured backend
//! 3. Parse the reply into a [`Decision`]
//! 4. Append the exchange to the decision log
//!
//! Backend failures surface as [`DecisionError::Internal`]; an unparseable
//! reply is `Ok(None)`. Either way the simulation skips the actor's turn.

use std::time::Instant;

use textworld_core::{DecisionError, DecisionSource};
use textworld_types::{Decision, DecisionRequest};
use tracing::{debug, info};

use crate::config::RunnerConfig;
use crate::decision_log::DecisionLog;
use crate::error::RunnerError;
use crate::llm::{LlmBackend, create_backend};
use crate::parse::parse_llm_response;
use crate::prompt::PromptEngine;

/// Maximum length of the raw reply echoed in debug logs.
const MAX_LOGGED_RESPONSE_LEN: usize = 400;

/// Decision source that asks a remote model what an actor does next.
pub struct LlmDecisionSource {
    prompts: PromptEngine,
    backend: LlmBackend,
    log: Option<DecisionLog>,
}

impl LlmDecisionSource {
    /// Build from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the prompt template or HTTP client cannot
    /// be set up.
    pub fn from_config(config: &RunnerConfig) -> Result<Self, RunnerError> {
        let prompts = PromptEngine::new(&config.templates_dir)?;
        let backend = create_backend(&config.backend, config.request_timeout)?;
        let log = config.decision_log.clone().map(DecisionLog::new);
        info!(
            backend = backend.name(),
            model = %config.backend.model,
            api_url = %config.backend.api_url,
            decision_log = ?log.as_ref().map(DecisionLog::path),
            "LLM decision source ready"
        );
        Ok(Self::new(prompts, backend, log))
    }

    /// Assemble from parts.
    pub const fn new(prompts: PromptEngine, backend: LlmBackend, log: Option<DecisionLog>) -> Self {
        Self {
            prompts,
            backend,
            log,
        }
    }

    async fn decide_inner(
        &self,
        request: &DecisionRequest,
    ) -> Result<Option<Decision>, RunnerError> {
        let prompt = self.prompts.render(request)?;

        let started = Instant::now();
        let raw = self.backend.complete(&prompt).await?;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let decision = parse_llm_response(&raw);
        debug!(
            actor_id = %request.actor_id,
            actor_name = %request.actor_name,
            backend = self.backend.name(),
            latency_ms,
            raw_response = %truncate_string(&raw, MAX_LOGGED_RESPONSE_LEN),
            parsed = decision.is_some(),
            "LLM replied"
        );

        if let Some(log) = &self.log {
            log.record(&request.actor_name, &prompt, &raw, decision.as_ref());
        }
        Ok(decision)
    }
}

impl DecisionSource for LlmDecisionSource {
    async fn decide(
        &mut self,
        request: &DecisionRequest,
    ) -> Result<Option<Decision>, DecisionError> {
        self.decide_inner(request)
            .await
            .map_err(|e| DecisionError::Internal {
                message: e.to_string(),
            })
    }
}

/// Truncate a string to `max_len` bytes on a char boundary, appending `...`.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_owned();
    }
    let end = (0..=max_len)
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0);
    let mut truncated = s.get(..end).unwrap_or_default().to_owned();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::{BackendType, LlmBackendConfig};
    use textworld_types::ActorId;

    fn unreachable_source() -> Option<LlmDecisionSource> {
        let config = RunnerConfig {
            backend: LlmBackendConfig {
                backend_type: BackendType::Ollama,
                api_url: "http://127.0.0.1:9".to_owned(),
                api_key: String::new(),
                model: "mistral".to_owned(),
            },
            templates_dir: "/nonexistent/textworld/templates".to_owned(),
            decision_log: None,
            request_timeout: Duration::from_millis(500),
        };
        LlmDecisionSource::from_config(&config).ok()
    }

    fn request() -> DecisionRequest {
        DecisionRequest {
            actor_id: ActorId(2),
            actor_name: "Mary".to_owned(),
            private_description: "Name: Mary".to_owned(),
            location_name: "The Car".to_owned(),
            location_description: "A rusted car.".to_owned(),
            exits: vec!["North".to_owned()],
            recent_history: Vec::new(),
            nearby_actors: Vec::new(),
            recent_utterances: Vec::new(),
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_an_internal_error() {
        let source = unreachable_source();
        assert!(source.is_some());
        let Some(mut source) = source else { return };

        let result = source.decide(&request()).await;
        assert!(matches!(result, Err(DecisionError::Internal { .. })));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("abcdef", 3), "abc...");
        // 'é' is two bytes; cutting at 2 would split it.
        assert_eq!(truncate_string("aéb", 2), "a...");
    }
}
