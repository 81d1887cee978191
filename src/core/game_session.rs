use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use time::OffsetDateTime;

use super::MASK_PLACEHOLDER;

/// Game state enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Active,
    Won,
    Lost,
}

/// Result of a letter guess that was accepted by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter occurs in the word
    Correct {
        masked_word: String,
        revealed_positions: Vec<usize>,
        is_win: bool,
    },
    /// The letter does not occur in the word
    Incorrect {
        incorrect_count: usize,
        is_game_over: bool,
    },
    /// The letter was guessed before; nothing changed
    AlreadyGuessed,
}

/// Guesses the session refuses to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("guess must be a single letter a-z, got {0:?}")]
    InvalidInput(char),
    #[error("game is already over")]
    GameOver,
}

/// A single hangman game
#[derive(Debug)]
pub struct GameSession {
    /// Unique identifier for this game
    pub game_id: String,
    /// Category the word was drawn from
    pub category: String,
    /// The secret word
    word: String,
    /// Letters guessed so far, correct or not
    guessed_letters: BTreeSet<char>,
    /// Number of guesses that missed
    incorrect_count: usize,
    /// Misses allowed before the game is lost
    pub max_attempts: usize,
    /// Current game state
    pub state: GameState,
    /// When the game was created
    pub created_at: OffsetDateTime,
    /// When the game was won or lost
    pub finished_at: Option<OffsetDateTime>,
}

impl GameSession {
    /// Create a new game session
    ///
    /// # Arguments
    ///
    /// * `game_id` - Unique identifier for this game
    /// * `category` - Category the word belongs to
    /// * `word` - The word to guess
    /// * `max_attempts` - Incorrect guesses allowed before losing
    pub fn new(game_id: String, category: String, word: String, max_attempts: usize) -> Self {
        Self {
            game_id,
            category,
            word,
            guessed_letters: BTreeSet::new(),
            incorrect_count: 0,
            max_attempts,
            state: GameState::Active,
            created_at: OffsetDateTime::now_utc(),
            finished_at: None,
        }
    }

    /// Apply a single letter guess
    ///
    /// # Arguments
    ///
    /// * `letter` - The guessed letter, must be in `a`-`z`
    ///
    /// # Returns
    ///
    /// What the guess revealed
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for anything but `a`-`z` and `GameOver` once the
    /// game has been won or lost. Neither mutates the session.
    pub fn guess_letter(&mut self, letter: char) -> Result<GuessOutcome, GuessError> {
        if !letter.is_ascii_lowercase() {
            return Err(GuessError::InvalidInput(letter));
        }

        if self.is_finished() {
            return Err(GuessError::GameOver);
        }

        if !self.guessed_letters.insert(letter) {
            return Ok(GuessOutcome::AlreadyGuessed);
        }

        if self.word.contains(letter) {
            let is_win = self.is_won();
            if is_win {
                self.finish(GameState::Won);
            }

            return Ok(GuessOutcome::Correct {
                masked_word: self.masked_word(),
                revealed_positions: self.revealed_positions(),
                is_win,
            });
        }

        self.incorrect_count += 1;
        let is_game_over = self.incorrect_count >= self.max_attempts;
        if is_game_over {
            self.finish(GameState::Lost);
        }

        Ok(GuessOutcome::Incorrect {
            incorrect_count: self.incorrect_count,
            is_game_over,
        })
    }

    fn finish(&mut self, state: GameState) {
        self.state = state;
        self.finished_at = Some(OffsetDateTime::now_utc());
    }

    /// Word with unguessed letters replaced by the placeholder
    pub fn masked_word(&self) -> String {
        self.word
            .chars()
            .map(|c| {
                if self.guessed_letters.contains(&c) {
                    c
                } else {
                    MASK_PLACEHOLDER
                }
            })
            .collect()
    }

    /// Indices of every position whose letter has been guessed
    pub fn revealed_positions(&self) -> Vec<usize> {
        self.word
            .chars()
            .enumerate()
            .filter(|(_, c)| self.guessed_letters.contains(c))
            .map(|(index, _)| index)
            .collect()
    }

    /// True once every distinct letter of the word has been guessed
    pub fn is_won(&self) -> bool {
        self.word.chars().all(|c| self.guessed_letters.contains(&c))
    }

    pub fn is_finished(&self) -> bool {
        self.state != GameState::Active
    }

    pub fn incorrect_count(&self) -> usize {
        self.incorrect_count
    }

    pub fn remaining_attempts(&self) -> usize {
        self.max_attempts.saturating_sub(self.incorrect_count)
    }

    /// Guessed letters in alphabetical order
    pub fn guessed_letters(&self) -> Vec<char> {
        self.guessed_letters.iter().copied().collect()
    }

    pub fn word_length(&self) -> usize {
        self.word.chars().count()
    }

    /// The secret word
    ///
    /// Only hand this to clients once the game is finished.
    pub fn word(&self) -> &str {
        &self.word
    }
}
