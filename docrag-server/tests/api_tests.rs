//! End-to-end tests for the HTTP surface, with a counting mock LLM upstream.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::routing::post;
use axum::{Json, Router};
use docrag_model::LlmConfig;
use docrag_rag::{Chunk, HashEmbedder, PersistentVectorStore, VectorStore, WordChunker};
use docrag_server::{app_router, AnswerEngine, AppState, NO_CONTEXT_ANSWER};
use serde_json::{json, Value};
use tempfile::TempDir;

/// A mock chat endpoint that counts calls and answers with a fixed string.
async fn spawn_mock_llm() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route(
            "/v1/chat/completions",
            post(|axum::extract::State(hits): axum::extract::State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "mock answer"}}]
                }))
            }),
        )
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind mock llm");
    let addr = listener.local_addr().expect("mock llm addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock llm run");
    });
    (format!("http://{addr}"), hits)
}

struct TestApp {
    base: String,
    store: Arc<dyn VectorStore>,
    llm_hits: Arc<AtomicUsize>,
    _store_dir: TempDir,
}

async fn spawn_app() -> TestApp {
    let (llm_base, llm_hits) = spawn_mock_llm().await;
    let store_dir = tempfile::tempdir().expect("store dir");

    let store: Arc<dyn VectorStore> = Arc::new(
        PersistentVectorStore::open(store_dir.path(), "test", Arc::new(HashEmbedder::new(64)))
            .await
            .expect("open store"),
    );
    let llm = LlmConfig::default()
        .with_base_url(&llm_base)
        .with_api_key("test-key")
        .with_model("test-model");
    let state = AppState {
        store: store.clone(),
        engine: Arc::new(AnswerEngine::new(store.clone(), &llm)),
        chunker: WordChunker::default(),
        model: llm.model.clone(),
        default_folder: "data/pdfs".to_string(),
    };

    let app = app_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind app");
    let addr = listener.local_addr().expect("app addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("app run");
    });

    TestApp { base: format!("http://{addr}"), store, llm_hits, _store_dir: store_dir }
}

fn chunk(id: &str, text: &str, index: usize) -> Chunk {
    Chunk { id: id.to_string(), text: text.to_string(), source: "atls.pdf".to_string(), index }
}

#[tokio::test]
async fn health_reports_mode_model_and_count() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{}/health", app.base))
        .send()
        .await
        .expect("health response")
        .json()
        .await
        .expect("health json");

    assert_eq!(body["status"], "ok");
    assert_eq!(body["llm_mode"], "remote");
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["docs_indexed"], 0);
}

#[tokio::test]
async fn ingest_missing_folder_returns_structured_error() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/ingest", app.base))
        .json(&json!({"folder": "no/such/folder"}))
        .send()
        .await
        .expect("ingest response");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("ingest json");
    assert_eq!(body["error"], "Folder not found: no/such/folder");
}

#[tokio::test]
async fn ingest_empty_folder_adds_nothing() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let data_dir = tempfile::tempdir().unwrap();
    std::fs::write(data_dir.path().join("notes.txt"), "not a pdf").unwrap();

    let body: Value = client
        .post(format!("{}/ingest", app.base))
        .json(&json!({"folder": data_dir.path().to_str().unwrap()}))
        .send()
        .await
        .expect("ingest response")
        .json()
        .await
        .expect("ingest json");

    assert_eq!(body["added_chunks"], 0);
    assert_eq!(body["total_chunks"], 0);
}

#[tokio::test]
async fn ask_on_empty_store_skips_the_llm() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("{}/api/ask", app.base))
        .json(&json!({"question": "what is the primary survey?"}))
        .send()
        .await
        .expect("ask response")
        .json()
        .await
        .expect("ask json");

    assert_eq!(body["answer"], NO_CONTEXT_ANSWER);
    assert_eq!(body["context_preview"], json!([]));
    assert_eq!(app.llm_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn ask_with_context_returns_answer_and_previews() {
    let app = spawn_app().await;
    app.store
        .add(&[
            chunk("1", "airway management comes first in the primary survey", 0),
            chunk("2", "breathing assessment follows airway", 1),
            chunk("3", "circulation and hemorrhage control come third", 2),
        ])
        .await
        .unwrap();

    let client = reqwest::Client::new();
    let body: Value = client
        .post(format!("{}/api/ask", app.base))
        .json(&json!({"question": "what comes first in the primary survey?", "top_k": 2}))
        .send()
        .await
        .expect("ask response")
        .json()
        .await
        .expect("ask json");

    assert_eq!(body["answer"], "mock answer");
    let previews = body["context_preview"].as_array().expect("preview array");
    assert_eq!(previews.len(), 2);
    for preview in previews {
        let line = preview.as_str().expect("preview line");
        assert!(line.starts_with("- (atls.pdf, chunk "));
    }
    assert_eq!(app.llm_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn ask_clamps_top_k() {
    let app = spawn_app().await;
    let chunks: Vec<Chunk> =
        (0..15).map(|i| chunk(&format!("id-{i}"), "identical filler text", i)).collect();
    app.store.add(&chunks).await.unwrap();

    let client = reqwest::Client::new();
    let body: Value = client
        .post(format!("{}/api/ask", app.base))
        .json(&json!({"question": "filler", "top_k": 50}))
        .send()
        .await
        .expect("ask response")
        .json()
        .await
        .expect("ask json");
    assert_eq!(body["context_preview"].as_array().unwrap().len(), 10);

    let body: Value = client
        .post(format!("{}/api/ask", app.base))
        .json(&json!({"question": "filler", "top_k": 0}))
        .send()
        .await
        .expect("ask response")
        .json()
        .await
        .expect("ask json");
    assert_eq!(body["context_preview"].as_array().unwrap().len(), 1);
}
