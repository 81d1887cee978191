use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use std::{net::SocketAddr, time::Duration};
use tower_http::cors::CorsLayer;

use hangman::{
    config::Config,
    core::{GameManager, CLEANUP_INTERVAL_SECONDS},
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.environment.default_log_filter().into()),
        )
        .init();

    tracing::info!("🪢 Hangman game server starting...");

    let state = AppState::new(GameManager::new(), config.secret_key.clone())
        .with_secure_cookies(!config.is_development());

    spawn_cleanup_task(state.clone());

    let public_origin: HeaderValue = config
        .public_url
        .parse()
        .with_context(|| format!("PUBLIC_URL '{}' is not a valid origin", config.public_url))?;

    let cors = CorsLayer::new()
        .allow_origin(public_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = routes::build_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.addr))?;

    tracing::info!("✅ Server listening on http://{}", config.addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    tracing::info!("👋 Shutting down game server...");
    Ok(())
}

/// Periodically evict stale and finished games
fn spawn_cleanup_task(state: AppState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECONDS));
        loop {
            interval.tick().await;
            let removed = state.game_manager.write().await.cleanup_stale_games();
            if removed > 0 {
                tracing::info!("🧹 Cleaned up {} stale games", removed);
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
