use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::state::AppState;

/// Health check endpoint
///
/// # Returns
///
/// JSON response with status and game statistics
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let games = state.game_manager.read().await.get_stats();

    (
        StatusCode::OK,
        Json(serde_json::json!({"status": "ok", "games": games})),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameManager;
    use axum::{body::Body, http::Request, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let state = AppState::new(GameManager::new(), "secret".to_string());
        state.game_manager.write().await.create_game();

        let app = Router::new()
            .route("/health", axum::routing::get(health_check))
            .with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["games"]["total_games"], 1);
        assert_eq!(body["games"]["active_games"], 1);
    }
}
