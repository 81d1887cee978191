pub mod game;
pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    middleware::{rate_limit_middleware, security_headers_middleware},
    state::AppState,
};

/// Requests taking longer than this are answered with 408
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the application router with all routes and middleware
///
/// CORS is left to the caller since allowed origins depend on deployment.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(game::show_index))
        .route("/health", get(health::health_check))
        .route("/start_game", post(game::start_game))
        .route("/guess", post(game::guess))
        .route("/game_state", get(game::game_state))
        // Add middleware layers (applied in reverse order)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(middleware::from_fn(security_headers_middleware))
                .layer(middleware::from_fn_with_state(
                    state.rate_limiter.clone(),
                    rate_limit_middleware,
                )),
        )
        .with_state(state)
}
