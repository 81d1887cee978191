use askama::Template;
use axum::{extract::rejection::JsonRejection, extract::State, response::IntoResponse, Json};
use axum_extra::extract::cookie::CookieJar;
use cookie::{Cookie, SameSite};

use crate::{
    auth::{generate_session_token, CurrentGame, SESSION_COOKIE, TOKEN_EXPIRY_SECONDS},
    core::{GuessOutcome, SharedGame, MAX_ATTEMPTS},
    error::AppError,
    models::{GameStateResponse, GuessRequest, GuessResponse, StartGameResponse},
    state::AppState,
};

/// Template for the game page
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    max_attempts: usize,
}

/// Show the game page
pub async fn show_index() -> impl IntoResponse {
    IndexTemplate {
        max_attempts: MAX_ATTEMPTS,
    }
}

/// Look up the game named by the session cookie
async fn find_game(state: &AppState, current: &CurrentGame) -> Result<SharedGame, AppError> {
    state
        .game_manager
        .read()
        .await
        .get_game(&current.game_id)
        .ok_or(AppError::NoActiveSession)
}

/// Start a new game for the caller
///
/// Any game the caller's cookie already points at is discarded.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `previous` - The caller's current game, if any
/// * `jar` - Cookie jar for setting the session cookie
///
/// # Returns
///
/// Game metadata and a session cookie naming the new game
pub async fn start_game(
    State(state): State<AppState>,
    previous: Option<CurrentGame>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (game_id, game) = {
        let mut manager = state.game_manager.write().await;
        if let Some(previous) = previous {
            if manager.remove_game(&previous.game_id) {
                tracing::debug!("🗑️ Replaced game {}", previous.game_id);
            }
        }
        manager.create_game()
    };

    let token = generate_session_token(&game_id, &state.secret_key)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(state.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(TOKEN_EXPIRY_SECONDS as i64))
        .build();

    let game = game.lock().await;
    tracing::info!(
        "🎮 Game {} started (category: {}, length: {})",
        game_id,
        game.category,
        game.word_length()
    );
    tracing::debug!("Game {} word is {:?}", game_id, game.word());

    Ok((jar.add(cookie), Json(StartGameResponse::from_session(&game))))
}

/// Guess a letter in the caller's game
///
/// The game is resolved before the letter is validated, so a caller without
/// a game always gets `No game in progress`.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `current` - The caller's game, from the session cookie
/// * `payload` - JSON body with the letter
///
/// # Returns
///
/// What the guess revealed
pub async fn guess(
    State(state): State<AppState>,
    current: CurrentGame,
    payload: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Json<GuessResponse>, AppError> {
    let game = find_game(&state, &current).await?;

    let letter = match payload {
        Ok(Json(request)) => request.letter()?,
        Err(rejection) => {
            tracing::debug!("Rejected guess body: {}", rejection);
            return Err(AppError::InvalidGuess);
        }
    };

    // Holding the session lock serializes guesses on the same game
    let mut game = game.lock().await;
    let outcome = match game.guess_letter(letter) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::debug!("Guess {:?} rejected in game {}: {}", letter, game.game_id, err);
            return Err(err.into());
        }
    };

    match &outcome {
        GuessOutcome::Correct { is_win: true, .. } => {
            tracing::info!("🏆 Game {} won", game.game_id);
        }
        GuessOutcome::Incorrect {
            is_game_over: true, ..
        } => {
            tracing::info!("💀 Game {} lost", game.game_id);
        }
        _ => {}
    }

    Ok(Json(outcome.into()))
}

/// Current state of the caller's game
///
/// # Returns
///
/// Snapshot of the game, including the answer once it is over
pub async fn game_state(
    State(state): State<AppState>,
    current: CurrentGame,
) -> Result<Json<GameStateResponse>, AppError> {
    let game = find_game(&state, &current).await?;
    let game = game.lock().await;

    Ok(Json(GameStateResponse::from_session(&game)))
}
