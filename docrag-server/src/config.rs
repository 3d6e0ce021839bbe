//! Process configuration, read once at startup.

use docrag_model::LlmConfig;
use tracing::warn;

/// Immutable configuration snapshot for the server process.
///
/// Built from the environment exactly once in `main` and passed by reference
/// afterwards; nothing reads ambient environment state past startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address for the HTTP listener.
    pub host: String,
    /// Bind port for the HTTP listener.
    pub port: u16,
    /// Directory holding vector store collections.
    pub store_path: String,
    /// Collection name within the store.
    pub collection: String,
    /// Default ingestion folder when a request does not name one.
    pub default_folder: String,
    /// Remote chat endpoint settings.
    pub llm: LlmConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            store_path: "vector_store".to_string(),
            collection: "docs".to_string(),
            default_folder: "data/pdfs".to_string(),
            llm: LlmConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// `USE_REMOTE_LLM` is accepted for compatibility with earlier
    /// deployments; the local LLM path no longer exists, so a falsy value
    /// only produces a warning and the remote endpoint is used regardless.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        if let Some(flag) = var("USE_REMOTE_LLM") {
            if flag == "0" || flag.eq_ignore_ascii_case("false") {
                warn!("USE_REMOTE_LLM is disabled but the local LLM path was removed; using the remote endpoint");
            }
        }

        Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: var("PORT").and_then(|p| p.parse().ok()).unwrap_or(defaults.port),
            store_path: var("VECTOR_STORE_PATH").unwrap_or(defaults.store_path),
            collection: var("COLLECTION_NAME").unwrap_or(defaults.collection),
            default_folder: var("PDF_FOLDER").unwrap_or(defaults.default_folder),
            llm: LlmConfig::from_env(),
        }
    }
}
