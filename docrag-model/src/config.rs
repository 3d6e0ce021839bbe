//! Configuration for the remote chat endpoint.

use std::time::Duration;

/// The default model requested from the completion endpoint.
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.2-1B-instruct";

/// The default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for an OpenAI-compatible completion endpoint.
///
/// `base_url` and `api_key` are optional here so a process can start without
/// them; [`ChatClient::new`](crate::ChatClient::new) rejects a config that is
/// missing either, before any network call is made.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Endpoint base URL. Normalized to end in `/v1` by the client.
    pub base_url: Option<String>,
    /// Bearer token for the endpoint.
    pub api_key: Option<String>,
    /// Model name sent in the request payload.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LlmConfig {
    /// Build a config from `OPENAI_BASE_URL`, `OPENAI_API_KEY`, and
    /// `OPENAI_MODEL` environment variables. Unset variables leave the
    /// corresponding field at its default.
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            base_url: non_empty("OPENAI_BASE_URL"),
            api_key: non_empty("OPENAI_API_KEY"),
            model: non_empty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
