//! HTTP surface: `/health`, `/ingest`, `/api/ask`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use docrag_rag::{ingest_folder, HashEmbedder, PersistentVectorStore, RagError, VectorStore, WordChunker};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::engine::AnswerEngine;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The vector store behind both ingestion and retrieval.
    pub store: Arc<dyn VectorStore>,
    /// The answer engine for `/api/ask`.
    pub engine: Arc<AnswerEngine>,
    /// Chunking parameters used at ingestion.
    pub chunker: WordChunker,
    /// Model name reported by `/health`.
    pub model: String,
    /// Ingestion folder used when a request does not name one.
    pub default_folder: String,
}

impl AppState {
    /// Build the state from configuration: open the store, wire the engine.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn VectorStore> = Arc::new(
            PersistentVectorStore::open(
                &config.store_path,
                &config.collection,
                Arc::new(HashEmbedder::default()),
            )
            .await
            .context("failed to open vector store")?,
        );
        let engine = Arc::new(AnswerEngine::new(store.clone(), &config.llm));

        Ok(Self {
            store,
            engine,
            chunker: WordChunker::default(),
            model: config.llm.model.clone(),
            default_folder: config.default_folder.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct IngestRequest {
    folder: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AskRequest {
    question: String,
    #[serde(default = "default_top_k")]
    top_k: usize,
}

fn default_top_k() -> usize {
    4
}

/// Build the application router.
pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/ingest", post(ingest))
        .route("/api/ask", post(ask))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until shutdown.
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config).await?;
    let app = app_router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| "invalid host/port for docrag server")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("docrag listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let docs_indexed = state.store.count().await.unwrap_or(0);
    Json(json!({
        "status": "ok",
        "llm_mode": "remote",
        "model": state.model,
        "docs_indexed": docs_indexed,
    }))
}

async fn ingest(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> impl IntoResponse {
    let folder = request
        .folder
        .as_deref()
        .unwrap_or(&state.default_folder)
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .to_string();

    match ingest_folder(state.store.as_ref(), &state.chunker, &folder).await {
        Ok(report) => (StatusCode::OK, Json(json!(report))),
        Err(RagError::FolderNotFound(_)) => {
            (StatusCode::OK, Json(json!({ "error": format!("Folder not found: {folder}") })))
        }
        Err(e) => {
            error!(error = %e, "ingestion failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e.to_string() })))
        }
    }
}

async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> impl IntoResponse {
    match state.engine.ask(&request.question, request.top_k).await {
        Ok(response) => (StatusCode::OK, Json(json!(response))),
        Err(e) => {
            error!(error = %e, "ask failed before the LLM boundary");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e.to_string() })))
        }
    }
}
