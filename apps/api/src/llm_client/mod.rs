//! Inference client: the single point of entry for all text-generation calls.
//!
//! ARCHITECTURAL RULE: No other module may call the inference service directly.
//! The router only sees the `TextGenerator` trait, so tests swap in a stub and
//! production wraps `InferenceClient` in a `CachedGenerator`.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod cache;
pub mod prompts;

pub use cache::CachedGenerator;

const STOP_SEQUENCE: &str = "</s>";
const MAX_ATTEMPTS: u32 = 2;
const RETRY_BASE_DELAY_MS: u64 = 500;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("inference service returned no content")]
    EmptyContent,
}

impl LlmError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Http(err)
        }
    }
}

/// Sampling parameters for a single call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationParams {
    /// Short, near-deterministic answer used for intent labels.
    pub const CLASSIFY: GenerationParams = GenerationParams {
        max_tokens: 10,
        temperature: 0.1,
    };

    /// Free-form conversational answer.
    pub const REPLY: GenerationParams = GenerationParams {
        max_tokens: 800,
        temperature: 0.7,
    };
}

/// Anything that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    stop: [&'a str; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Trimmed text of the first choice, if it has any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// HTTP client for an OpenAI-compatible chat-completion endpoint
/// (Hugging Face Inference API layout).
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    endpoint: String,
    model: String,
    token: String,
}

impl InferenceClient {
    pub fn new(
        base_url: &str,
        model: &str,
        token: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!(
                "{}/models/{}/v1/chat/completions",
                base_url.trim_end_matches('/'),
                model
            ),
            model: model.to_string(),
            token,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw call to the chat-completion endpoint.
    /// Retries 429 and 5xx responses once; timeouts and connection errors are returned as-is.
    pub async fn call(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            stop: [STOP_SEQUENCE],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = Duration::from_millis(RETRY_BASE_DELAY_MS << (attempt - 1));
                warn!(
                    "Inference attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.token)
                .json(&request_body)
                .send()
                .await
                .map_err(LlmError::from_transport)?;

            let status = response.status();
            let body = response.text().await.map_err(LlmError::from_transport)?;

            if status.as_u16() == 429 || status.is_server_error() {
                warn!("Inference API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = serde_json::from_str::<ApiErrorBody>(&body)
                    .map(|e| e.error)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let completion: ChatCompletionResponse = serde_json::from_str(&body)?;

            if let Some(usage) = &completion.usage {
                debug!(
                    "Inference call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return Ok(completion);
        }

        Err(last_error.unwrap_or(LlmError::EmptyContent))
    }
}

#[async_trait]
impl TextGenerator for InferenceClient {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, LlmError> {
        let completion = self.call(prompt, params).await?;
        completion
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}
