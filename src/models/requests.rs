use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request to guess a single letter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuessRequest {
    /// The guessed letter
    #[serde(default)]
    pub letter: Option<String>,
}

impl GuessRequest {
    /// Clean and validate a guessed letter
    ///
    /// # Arguments
    ///
    /// * `letter` - Raw letter input
    ///
    /// # Returns
    ///
    /// The lowercased letter if valid, `InvalidGuess` otherwise
    ///
    /// # Validation Rules
    ///
    /// - Input is lowercased first, so `"A"` is accepted as `'a'`
    /// - Exactly one character after lowercasing
    /// - Must be in `a`-`z`
    pub fn validate_letter(letter: &str) -> Result<char, AppError> {
        let cleaned = letter.to_lowercase();
        let mut chars = cleaned.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_lowercase() => Ok(c),
            _ => Err(AppError::InvalidGuess),
        }
    }

    /// The validated letter carried by this request
    pub fn letter(&self) -> Result<char, AppError> {
        self.letter
            .as_deref()
            .ok_or(AppError::InvalidGuess)
            .and_then(Self::validate_letter)
    }
}
