use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{error::AppError, state::AppState};

/// Name of the cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "hangman_session";

/// The game session named by the request's session cookie
///
/// Rejects with `NoActiveSession` when the cookie is missing, tampered
/// with, or expired. The game itself may still have been evicted; callers
/// look it up in the manager.
#[derive(Debug, Clone)]
pub struct CurrentGame {
    pub game_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentGame
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Internal("Failed to extract cookies".to_string()))?;

        let token = jar.get(SESSION_COOKIE).map(|cookie| cookie.value());

        let (game_id, _) = super::token::verify_session_token(token, &app_state.secret_key)
            .ok_or(AppError::NoActiveSession)?;

        Ok(CurrentGame { game_id })
    }
}
