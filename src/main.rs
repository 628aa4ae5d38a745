use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use aurora_qa::core::config::AppConfig;
use aurora_qa::core::logging;
use aurora_qa::server;
use aurora_qa::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenv::dotenv();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init(&config.log_dir);
    tracing::debug!(?config, "Configuration loaded");

    let bind_addr = config.bind_addr();
    let state = AppState::initialize(config)?;

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let addr = listener.local_addr()?;
    tracing::info!(
        upstream = %state.config.upstream_url,
        cache = %state.config.cache_path.display(),
        model = %state.config.model,
        "Listening on {}",
        addr
    );

    let app: Router = server::router(state);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
