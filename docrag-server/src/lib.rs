//! HTTP API for the docrag retrieval-augmented question-answering backend.
//!
//! Three routes: `GET /health`, `POST /ingest`, `POST /api/ask`. The [`engine`]
//! module holds the answer pipeline; [`routes`] wires it into axum.

pub mod config;
pub mod engine;
pub mod routes;

pub use config::AppConfig;
pub use engine::{AnswerEngine, AskResponse, NO_CONTEXT_ANSWER};
pub use routes::{app_router, run_server, AppState};
