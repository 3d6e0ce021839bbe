use docrag_proxy::{run_proxy, ProxyState};
use tracing_subscriber::EnvFilter;

const DEFAULT_TARGET: &str = "https://api.heygen.com/v1";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let target =
        std::env::var("PROXY_TARGET_URL").unwrap_or_else(|_| DEFAULT_TARGET.to_string());
    let host = std::env::var("PROXY_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PROXY_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3001);

    run_proxy(&host, port, ProxyState::new(target)).await
}
