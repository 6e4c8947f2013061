use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use numbers_dictation_server::api::routes::{create_router, AppState};
use numbers_dictation_server::{logging, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init();

    let settings = Settings::from_env().context("failed to load settings")?;

    let addr: SocketAddr = settings
        .addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", settings.addr()))?;

    tracing::info!("Numbers Dictation API v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    settings.log_summary();

    let state = Arc::new(AppState::new(&settings));
    let app = create_router(state, &settings);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
