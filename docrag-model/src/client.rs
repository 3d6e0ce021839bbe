//! Remote chat-completion client with bounded retry.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::config::LlmConfig;
use crate::error::{ModelError, Result};
use crate::message::ChatMessage;

/// Bounded retry with exponential backoff for transport failures.
///
/// HTTP error statuses are never retried; only failures to complete the
/// request/response exchange count against the budget.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub attempts: u32,
    /// Delay before the first retry; doubles after each failure.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: 3, base_delay: Duration::from_millis(500) }
    }
}

/// A stateless client for an OpenAI-compatible `/v1/chat/completions`
/// endpoint.
///
/// Each call is a single request/response with bounded retry; there is no
/// session state. Construction validates that the base URL and API key are
/// present, so a misconfigured client fails before any network traffic.
///
/// # Example
///
/// ```rust,ignore
/// use docrag_model::{ChatClient, ChatMessage, LlmConfig};
///
/// let client = ChatClient::new(&LlmConfig::from_env())?;
/// let answer = client
///     .chat(&[ChatMessage::user("hello")], 0.1, 400)
///     .await?;
/// ```
#[derive(Debug)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    retry: RetryPolicy,
}

/// Normalize a base URL so it always ends in `/v1`, without a trailing slash.
fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/v1") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/v1")
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl ChatClient {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ConfigError`] if the base URL or API key is
    /// missing, or if the HTTP client cannot be constructed.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let base_url = config.base_url.as_deref().ok_or_else(|| {
            ModelError::ConfigError("OPENAI_BASE_URL is not configured".to_string())
        })?;
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            ModelError::ConfigError("OPENAI_API_KEY is not configured".to_string())
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModelError::ConfigError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", normalize_base_url(base_url)),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            retry: RetryPolicy::default(),
        })
    }

    /// Override the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Send a chat-completion request and return the first choice's content.
    ///
    /// Transport failures are retried per the [`RetryPolicy`]; an HTTP
    /// status ≥ 400 is terminal and carries the status code and raw body.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Transport`] after the retry budget is spent,
    /// [`ModelError::Api`] on an error status, or
    /// [`ModelError::InvalidResponse`] if the payload has no choices.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let body = ChatRequest { model: &self.model, messages, temperature, max_tokens };

        let mut delay = self.retry.base_delay;
        let mut attempt = 1;
        let response = loop {
            debug!(endpoint = %self.endpoint, model = %self.model, attempt, "sending chat request");

            match self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => break response,
                Err(e) if attempt < self.retry.attempts => {
                    warn!(attempt, error = %e, retry_in = ?delay, "chat request failed, retrying");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(e) => {
                    error!(attempt, error = %e, "chat request failed, retry budget spent");
                    return Err(ModelError::Transport(e.to_string()));
                }
            }
        };

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "chat endpoint returned error status");
            return Err(ModelError::Api { status: status.as_u16(), body });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("failed to parse response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ModelError::InvalidResponse("response contained no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_v1_suffix() {
        assert_eq!(normalize_base_url("http://llm.example.com"), "http://llm.example.com/v1");
        assert_eq!(normalize_base_url("http://llm.example.com/"), "http://llm.example.com/v1");
    }

    #[test]
    fn existing_v1_suffix_is_kept() {
        assert_eq!(normalize_base_url("http://llm.example.com/v1"), "http://llm.example.com/v1");
        assert_eq!(normalize_base_url("http://llm.example.com/v1/"), "http://llm.example.com/v1");
    }

    #[test]
    fn missing_base_url_fails_fast() {
        let config = LlmConfig::default().with_api_key("secret");
        let err = ChatClient::new(&config).unwrap_err();
        assert!(matches!(err, ModelError::ConfigError(_)));
    }

    #[test]
    fn missing_api_key_fails_fast() {
        let config = LlmConfig::default().with_base_url("http://llm.example.com");
        let err = ChatClient::new(&config).unwrap_err();
        assert!(matches!(err, ModelError::ConfigError(_)));
    }
}
