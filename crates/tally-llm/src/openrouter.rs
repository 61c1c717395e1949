//! OpenRouter Provider Implementation
//!
//! Speaks the OpenAI-compatible chat completions protocol, so it also works
//! against any gateway exposing `/chat/completions`.

use crate::http::{build_client, send_with_retry};
use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tally_domain::LlmProvider;
use tracing::debug;

/// Default chat completions endpoint
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default timeout for hosted requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Hosted chat-completions provider
pub struct OpenRouterProvider {
    api_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl OpenRouterProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Config` if the key or model is empty, or the HTTP
    /// client cannot be built.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        let model = model.into();

        if api_key.trim().is_empty() {
            return Err(LlmError::Config("API key is empty".to_string()));
        }
        if model.trim().is_empty() {
            return Err(LlmError::Config("model name is empty".to_string()));
        }

        Ok(Self {
            api_url: api_url.into(),
            api_key,
            model,
            client: build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Replace the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Configured endpoint
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl LlmProvider for OpenRouterProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("Chat completion request ({} prompt chars)", prompt.len());

        let response = send_with_retry(
            || {
                self.client
                    .post(&self.api_url)
                    .bearer_auth(&self.api_key)
                    .json(&body)
            },
            self.max_retries,
            &self.model,
        )?;

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        extract_content(parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn extract_content(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no message content".to_string()))
}
