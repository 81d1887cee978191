use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::core::GuessError;
use crate::models::ErrorResponse;

/// Errors returned to HTTP clients as `{"error": "..."}`
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No game in progress")]
    NoActiveSession,
    #[error("Invalid guess")]
    InvalidGuess,
    #[error("Game is already over")]
    GameOver,
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NoActiveSession => StatusCode::NOT_FOUND,
            AppError::InvalidGuess => StatusCode::BAD_REQUEST,
            AppError::GameOver => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GuessError> for AppError {
    fn from(err: GuessError) -> Self {
        match err {
            GuessError::InvalidInput(_) => AppError::InvalidGuess,
            GuessError::GameOver => AppError::GameOver,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(detail) = &self {
            tracing::error!("💥 Internal error: {}", detail);
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
