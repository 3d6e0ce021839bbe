//! Debug-logging pass-through proxy.
//!
//! Forwards every request to the configured upstream API verbatim, logging
//! method, path, headers, and bounded body previews on both legs. No retry,
//! no pooling beyond the reqwest defaults, no protocol translation.

use std::net::SocketAddr;

use anyhow::Context;
use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, info};

/// Largest request/response body the proxy will buffer.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Characters of body shown in log previews.
const LOG_PREVIEW_CHARS: usize = 500;

/// Upstream target and the client used to reach it.
#[derive(Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    target: String,
}

impl ProxyState {
    /// Create state for the given upstream base URL (no trailing slash).
    pub fn new(target: impl Into<String>) -> Self {
        let target = target.into().trim_end_matches('/').to_string();
        Self { client: reqwest::Client::new(), target }
    }

    /// The upstream base URL requests are forwarded to.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Build the proxy router: `/health` plus a catch-all forwarder.
pub fn proxy_router(state: ProxyState) -> Router {
    Router::new().route("/health", get(health)).fallback(forward).with_state(state)
}

/// Bind and serve until shutdown.
pub async fn run_proxy(host: &str, port: u16, state: ProxyState) -> anyhow::Result<()> {
    let app = proxy_router(state.clone());
    let addr: SocketAddr =
        format!("{host}:{port}").parse().with_context(|| "invalid host/port for proxy")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(target = %state.target(), "proxy listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<ProxyState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "proxy": "docrag video API proxy",
        "target": state.target,
    }))
}

/// Render a bounded, lossy preview of a body for logging.
fn body_preview(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).chars().take(LOG_PREVIEW_CHARS).collect()
}

/// Copy headers, skipping the ones that must not cross the proxy boundary.
fn forwardable_headers(headers: &HeaderMap, skip: &[&str]) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !skip.contains(&name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

async fn forward(State(state): State<ProxyState>, request: Request) -> Response {
    let method = request.method().clone();
    let headers = request.headers().clone();
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let body = match to_bytes(request.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "failed to read request body");
            return proxy_error(format!("failed to read request body: {e}"));
        }
    };

    let url = format!("{}{}", state.target, path_and_query);
    info!(
        %method,
        path = %path_and_query,
        headers = ?headers,
        body = %body_preview(&body),
        "proxying request"
    );

    let upstream = state
        .client
        .request(method, &url)
        .headers(forwardable_headers(&headers, &["host"]))
        .body(body)
        .send()
        .await;

    let upstream = match upstream {
        Ok(response) => response,
        Err(e) => {
            error!(%url, error = %e, "upstream request failed");
            return proxy_error(format!("upstream request failed: {e}"));
        }
    };

    let status = upstream.status();
    let response_headers =
        forwardable_headers(upstream.headers(), &["connection", "transfer-encoding"]);
    let response_body = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(%url, error = %e, "failed to read upstream body");
            return proxy_error(format!("failed to read upstream body: {e}"));
        }
    };

    info!(
        status = status.as_u16(),
        body = %body_preview(&response_body),
        "relaying response"
    );

    let mut response = Response::builder().status(status);
    if let Some(headers) = response.headers_mut() {
        *headers = response_headers;
    }
    response
        .body(Body::from(response_body))
        .unwrap_or_else(|e| proxy_error(format!("failed to build response: {e}")))
}

fn proxy_error(message: String) -> Response {
    (StatusCode::BAD_GATEWAY, Json(json!({ "error": "Proxy error", "message": message })))
        .into_response()
}
