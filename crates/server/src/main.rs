//! Hostel assistant server binary

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use hostel_agent_config::load_settings;
use hostel_agent_server::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Credentials are optional at startup: menu, photos, and complaint
    // intake work without the QA upstreams.
    let settings = load_settings(None, false).context("failed to load settings")?;

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let state = AppState::new(settings);

    let _cleanup_shutdown = state.sessions.start_cleanup_task();

    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Hostel assistant listening on {}", addr);

    axum::serve(listener, router)
        .await
        .context("server error")?;

    Ok(())
}
