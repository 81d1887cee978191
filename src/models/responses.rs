use serde::{Deserialize, Serialize};

use crate::core::{GameSession, GameState, GuessOutcome};

pub const ALREADY_GUESSED_MESSAGE: &str = "You already guessed this letter!";

/// Metadata returned when a game starts
///
/// Never carries the secret word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameResponse {
    pub category: String,
    pub word_length: usize,
    pub max_attempts: usize,
}

impl StartGameResponse {
    pub fn from_session(game: &GameSession) -> Self {
        Self {
            category: game.category.clone(),
            word_length: game.word_length(),
            max_attempts: game.max_attempts,
        }
    }
}

/// Result of a single guess, tagged by `status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GuessResponse {
    Correct {
        /// Word with unguessed letters masked
        word_state: String,
        /// Positions of every revealed letter
        revealed_letters: Vec<usize>,
        is_win: bool,
    },
    Incorrect {
        incorrect_guesses: usize,
        is_game_over: bool,
    },
    AlreadyGuessed {
        message: String,
    },
}

impl From<GuessOutcome> for GuessResponse {
    fn from(outcome: GuessOutcome) -> Self {
        match outcome {
            GuessOutcome::Correct {
                masked_word,
                revealed_positions,
                is_win,
            } => GuessResponse::Correct {
                word_state: masked_word,
                revealed_letters: revealed_positions,
                is_win,
            },
            GuessOutcome::Incorrect {
                incorrect_count,
                is_game_over,
            } => GuessResponse::Incorrect {
                incorrect_guesses: incorrect_count,
                is_game_over,
            },
            GuessOutcome::AlreadyGuessed => GuessResponse::AlreadyGuessed {
                message: ALREADY_GUESSED_MESSAGE.to_string(),
            },
        }
    }
}

/// Snapshot of the caller's game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateResponse {
    pub category: String,
    pub word_length: usize,
    pub max_attempts: usize,
    pub word_state: String,
    pub guessed_letters: Vec<char>,
    pub incorrect_guesses: usize,
    pub remaining_attempts: usize,
    pub state: GameState,
    /// The secret word (only included once the game is over)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl GameStateResponse {
    pub fn from_session(game: &GameSession) -> Self {
        Self {
            category: game.category.clone(),
            word_length: game.word_length(),
            max_attempts: game.max_attempts,
            word_state: game.masked_word(),
            guessed_letters: game.guessed_letters(),
            incorrect_guesses: game.incorrect_count(),
            remaining_attempts: game.remaining_attempts(),
            state: game.state,
            answer: game.is_finished().then(|| game.word().to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
