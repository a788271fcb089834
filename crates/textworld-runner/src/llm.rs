//! LLM backend abstraction and implementations.
//!
//! Enum dispatch over the supported backends, all reached over HTTP via
//! `reqwest`. Ollama is driven through its native `/api/generate` endpoint
//! with streaming disabled; the other two speak the `OpenAI` chat
//! completions and Anthropic Messages protocols.
//!
//! The runner does not care which model is behind the API. It sends a
//! prompt and expects a text reply containing one JSON object.

use std::time::Duration;

use crate::config::{BackendType, LlmBackendConfig};
use crate::error::RunnerError;
use crate::prompt::RenderedPrompt;

/// Upper bound on generated tokens for a single reply.
const MAX_TOKENS: u32 = 256;

// ---------------------------------------------------------------------------
// Unified backend enum
// ---------------------------------------------------------------------------

/// An LLM backend that can process a prompt and return a response.
///
/// Uses enum dispatch instead of trait objects because async methods
/// are not dyn-compatible.
pub enum LlmBackend {
    /// Ollama native generate API.
    Ollama(OllamaBackend),
    /// `OpenAI`-compatible chat completions API.
    OpenAi(OpenAiBackend),
    /// Anthropic Messages API.
    Anthropic(AnthropicBackend),
}

impl LlmBackend {
    /// Send a prompt to the LLM and return the response text.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::LlmBackend`] if the HTTP call fails or the
    /// response text cannot be extracted.
    pub async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        match self {
            Self::Ollama(backend) => backend.complete(prompt).await,
            Self::OpenAi(backend) => backend.complete(prompt).await,
            Self::Anthropic(backend) => backend.complete(prompt).await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Ollama(_) => "ollama",
            Self::OpenAi(_) => "openai-compatible",
            Self::Anthropic(_) => "anthropic",
        }
    }
}

/// Shared connection details for every backend.
struct Endpoint {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl Endpoint {
    fn new(config: &LlmBackendConfig, timeout: Duration) -> Result<Self, RunnerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RunnerError::LlmBackend(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

/// POST a JSON body and return the decoded JSON reply.
async fn send_json(
    label: &str,
    request: reqwest::RequestBuilder,
    body: &serde_json::Value,
) -> Result<serde_json::Value, RunnerError> {
    let response = request
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| RunnerError::LlmBackend(format!("{label} request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error body".to_owned());
        return Err(RunnerError::LlmBackend(format!(
            "{label} returned {status}: {error_body}"
        )));
    }

    response
        .json()
        .await
        .map_err(|e| RunnerError::LlmBackend(format!("{label} response parse failed: {e}")))
}

// ---------------------------------------------------------------------------
// Ollama backend
// ---------------------------------------------------------------------------

/// Backend for a local Ollama server.
///
/// Sends requests to `{api_url}/api/generate` and reads the `response`
/// field of the single non-streamed reply.
pub struct OllamaBackend {
    endpoint: Endpoint,
}

impl OllamaBackend {
    /// Create a new Ollama backend.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::LlmBackend`] if the HTTP client cannot be built.
    pub fn new(config: &LlmBackendConfig, timeout: Duration) -> Result<Self, RunnerError> {
        Ok(Self {
            endpoint: Endpoint::new(config, timeout)?,
        })
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        let url = format!("{}/api/generate", self.endpoint.api_url);
        let body = serde_json::json!({
            "model": self.endpoint.model,
            "system": prompt.system,
            "prompt": prompt.user,
            "stream": false,
            "format": "json",
            "options": {"num_predict": MAX_TOKENS}
        });

        let json = send_json("Ollama", self.endpoint.client.post(&url), &body).await?;
        extract_ollama_content(&json)
    }
}

/// Extract the text from an Ollama generate response.
fn extract_ollama_content(json: &serde_json::Value) -> Result<String, RunnerError> {
    json.get("response")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| RunnerError::LlmBackend("Ollama response missing response".to_owned()))
}

// ---------------------------------------------------------------------------
// OpenAI-compatible backend
// ---------------------------------------------------------------------------

/// Backend for `OpenAI`-compatible chat completions APIs.
///
/// Sends requests to `{api_url}/chat/completions`.
pub struct OpenAiBackend {
    endpoint: Endpoint,
}

impl OpenAiBackend {
    /// Create a new `OpenAI`-compatible backend.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::LlmBackend`] if the HTTP client cannot be built.
    pub fn new(config: &LlmBackendConfig, timeout: Duration) -> Result<Self, RunnerError> {
        Ok(Self {
            endpoint: Endpoint::new(config, timeout)?,
        })
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        let url = format!("{}/chat/completions", self.endpoint.api_url);
        let body = serde_json::json!({
            "model": self.endpoint.model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user}
            ],
            "temperature": 0.7,
            "max_tokens": MAX_TOKENS,
            "response_format": {"type": "json_object"}
        });

        let request = self
            .endpoint
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.endpoint.api_key));
        let json = send_json("OpenAI", request, &body).await?;
        extract_openai_content(&json)
    }
}

/// Extract the text content from an `OpenAI` chat completions response.
fn extract_openai_content(json: &serde_json::Value) -> Result<String, RunnerError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            RunnerError::LlmBackend(
                "OpenAI response missing choices[0].message.content".to_owned(),
            )
        })
}

// ---------------------------------------------------------------------------
// Anthropic Messages API backend
// ---------------------------------------------------------------------------

/// Backend for the Anthropic Messages API.
///
/// The system prompt is a top-level field and the reply text sits at
/// `content[0].text`.
pub struct AnthropicBackend {
    endpoint: Endpoint,
}

impl AnthropicBackend {
    /// Create a new Anthropic Messages API backend.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::LlmBackend`] if the HTTP client cannot be built.
    pub fn new(config: &LlmBackendConfig, timeout: Duration) -> Result<Self, RunnerError> {
        Ok(Self {
            endpoint: Endpoint::new(config, timeout)?,
        })
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        let url = format!("{}/messages", self.endpoint.api_url);
        let body = serde_json::json!({
            "model": self.endpoint.model,
            "max_tokens": MAX_TOKENS,
            "system": prompt.system,
            "messages": [
                {"role": "user", "content": prompt.user}
            ]
        });

        let request = self
            .endpoint
            .client
            .post(&url)
            .header("x-api-key", &self.endpoint.api_key)
            .header("anthropic-version", "2023-06-01");
        let json = send_json("Anthropic", request, &body).await?;
        extract_anthropic_content(&json)
    }
}

/// Extract the text content from an Anthropic Messages API response.
fn extract_anthropic_content(json: &serde_json::Value) -> Result<String, RunnerError> {
    json.get("content")
        .and_then(|c| c.get(0))
        .and_then(|b| b.get("text"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            RunnerError::LlmBackend("Anthropic response missing content[0].text".to_owned())
        })
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Create an LLM backend from configuration.
///
/// # Errors
///
/// Returns [`RunnerError::LlmBackend`] if the HTTP client cannot be built.
pub fn create_backend(
    config: &LlmBackendConfig,
    timeout: Duration,
) -> Result<LlmBackend, RunnerError> {
    Ok(match config.backend_type {
        BackendType::Ollama => LlmBackend::Ollama(OllamaBackend::new(config, timeout)?),
        BackendType::OpenAi => LlmBackend::OpenAi(OpenAiBackend::new(config, timeout)?),
        BackendType::Anthropic => LlmBackend::Anthropic(AnthropicBackend::new(config, timeout)?),
    })
}
