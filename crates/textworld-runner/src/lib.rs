//! Text-generation decision source for autonomous Textworld actors.
//!
//! Turns a [`DecisionRequest`] into a prompt, sends it to a remote model and
//! parses the reply back into a [`Decision`]:
//!
//! 1. Render the system prompt from the actor's surroundings
//! 2. Build the user prompt from the statements it heard
//! 3. Call the configured backend (Ollama, OpenAI-compatible, Anthropic)
//! 4. Extract the JSON object from the reply, recovering from common
//!    formatting slips
//! 5. Append the exchange to the decision log
//!
//! Any failure along the way yields "no decision"; the simulation treats
//! that as a skipped turn.
//!
//! # Modules
//!
//! - [`config`] -- Runner configuration derived from the `llm` config section.
//! - [`decision_log`] -- JSON-lines record of every exchange.
//! - [`error`] -- [`RunnerError`].
//! - [`llm`] -- Backend dispatch over `reqwest`.
//! - [`parse`] -- Reply parsing with recovery strategies.
//! - [`prompt`] -- `minijinja` prompt rendering.
//! - [`runner`] -- [`LlmDecisionSource`], the `DecisionSource` implementation.
//!
//! [`DecisionRequest`]: textworld_types::DecisionRequest
//! [`Decision`]: textworld_types::Decision
//! [`RunnerError`]: error::RunnerError
//! [`LlmDecisionSource`]: runner::LlmDecisionSource

pub mod config;
pub mod decision_log;
pub mod error;
pub mod llm;
pub mod parse;
pub mod prompt;
pub mod runner;

pub use config::{BackendType, RunnerConfig};
pub use error::RunnerError;
pub use runner::LlmDecisionSource;
