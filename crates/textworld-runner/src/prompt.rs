//! Prompt template loading and rendering via `minijinja`.
//!
//! The system prompt is rendered from the [`DecisionRequest`] fields
//! (`actor_name`, `location_name`, `location_description`,
//! `recent_history`, `private_description`, `nearby_actors`, `exits`).
//! A built-in template ships with the crate; dropping a `system.j2` into
//! the configured templates directory replaces it without recompiling.
//!
//! The user prompt is plain text: the statements heard since the last
//! decision, one `speaker: statement` per line.

use std::path::Path;

use minijinja::Environment;
use textworld_types::DecisionRequest;
use tracing::debug;

use crate::error::RunnerError;

/// Built-in system prompt used when no override exists on disk.
const DEFAULT_SYSTEM_TEMPLATE: &str = include_str!("../templates/system.j2");

/// User prompt sent when the actor heard nothing since its last decision.
pub const IDLE_USER_PROMPT: &str = "<Not engaged in conversation>";

/// Manages prompt template loading and rendering.
pub struct PromptEngine {
    env: Environment<'static>,
}

/// The complete rendered prompt ready to send to an LLM backend.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    /// System message describing the actor and its surroundings.
    pub system: String,
    /// User message carrying the conversation the actor is part of.
    pub user: String,
}

impl PromptEngine {
    /// Create a prompt engine, preferring `{templates_dir}/system.j2` over
    /// the built-in template.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Template`] if the override exists but cannot
    /// be read or does not compile.
    pub fn new(templates_dir: &str) -> Result<Self, RunnerError> {
        let path = Path::new(templates_dir).join("system.j2");
        let source = if path.is_file() {
            debug!(path = %path.display(), "loading system prompt override");
            load_template(templates_dir, "system.j2")?
        } else {
            DEFAULT_SYSTEM_TEMPLATE.to_owned()
        };
        Self::from_source(source)
    }

    /// Create a prompt engine from template source text.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Template`] if the template does not compile.
    pub fn from_source(source: String) -> Result<Self, RunnerError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template_owned("system", source)
            .map_err(|e| RunnerError::Template(format!("failed to add system template: {e}")))?;
        Ok(Self { env })
    }

    /// Render the full prompt for an actor's decision.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Template`] if rendering fails.
    pub fn render(&self, request: &DecisionRequest) -> Result<RenderedPrompt, RunnerError> {
        let system = self
            .env
            .get_template("system")
            .map_err(|e| RunnerError::Template(format!("missing system template: {e}")))?
            .render(request)
            .map_err(|e| RunnerError::Template(format!("system render failed: {e}")))?;

        Ok(RenderedPrompt {
            system,
            user: user_prompt(request),
        })
    }
}

/// Build the user prompt from the statements heard since the last decision.
pub fn user_prompt(request: &DecisionRequest) -> String {
    if request.recent_utterances.is_empty() {
        return IDLE_USER_PROMPT.to_owned();
    }
    request
        .recent_utterances
        .iter()
        .map(|u| format!("{}: {}", u.speaker, u.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read a template file from disk.
fn load_template(dir: &str, filename: &str) -> Result<String, RunnerError> {
    let path = format!("{dir}/{filename}");
    std::fs::read_to_string(&path)
        .map_err(|e| RunnerError::Template(format!("failed to read {path}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use textworld_types::{ActorId, Utterance};

    fn sample_request() -> DecisionRequest {
        DecisionRequest {
            actor_id: ActorId(1),
            actor_name: "Mary".to_owned(),
            private_description: "Name: Mary\nKnown Information:\n\tKeeps bees".to_owned(),
            location_name: "The Well".to_owned(),
            location_description: "An old stone well.".to_owned(),
            exits: vec!["North".to_owned(), "South".to_owned()],
            recent_history: vec!["Moved to The Well".to_owned()],
            nearby_actors: vec!["Name: John Ward".to_owned()],
            recent_utterances: Vec::new(),
        }
    }

    #[test]
    fn default_template_renders_surroundings() {
        let engine = PromptEngine::from_source(DEFAULT_SYSTEM_TEMPLATE.to_owned());
        assert!(engine.is_ok());
        let Ok(engine) = engine else { return };

        let prompt = engine.render(&sample_request());
        assert!(prompt.is_ok());
        if let Ok(p) = prompt {
            assert!(p.system.contains("You are Mary"));
            assert!(p.system.contains("The Well: An old stone well."));
            assert!(p.system.contains("Moved to The Well"));
            assert!(p.system.contains("Keeps bees"));
            assert!(p.system.contains("Name: John Ward"));
            assert!(p.system.contains("\"north\", \"south\", null"));
            assert!(p.system.contains("fewer than 200 characters"));
            assert_eq!(p.user, IDLE_USER_PROMPT);
        }
    }

    #[test]
    fn user_prompt_lists_statements_in_order() {
        let mut request = sample_request();
        request.recent_utterances = vec![
            Utterance {
                speaker: "John Ward".to_owned(),
                content: "Hello?".to_owned(),
            },
            Utterance {
                speaker: "Mary".to_owned(),
                content: "Who's there?".to_owned(),
            },
        ];
        assert_eq!(user_prompt(&request), "John Ward: Hello?\nMary: Who's there?");
    }

    #[test]
    fn override_on_disk_replaces_builtin() {
        let dir = std::env::temp_dir().join(format!("textworld-prompt-{}", std::process::id()));
        std::fs::create_dir_all(&dir).ok();
        std::fs::write(dir.join("system.j2"), "Actor {{ actor_name }} at {{ location_name }}").ok();

        let engine = PromptEngine::new(&dir.to_string_lossy());
        assert!(engine.is_ok());
        if let Ok(engine) = engine {
            let prompt = engine.render(&sample_request());
            assert!(prompt.is_ok());
            if let Ok(p) = prompt {
                assert_eq!(p.system, "Actor Mary at The Well");
            }
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_directory_falls_back_to_builtin() {
        let engine = PromptEngine::new("/nonexistent/textworld/templates");
        assert!(engine.is_ok());
    }

    #[test]
    fn broken_template_is_rejected() {
        let engine = PromptEngine::from_source("{% for x in %}".to_owned());
        assert!(engine.is_err());
    }
}
