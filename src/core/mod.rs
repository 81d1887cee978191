pub mod constants;
pub mod game_manager;
pub mod game_session;
pub mod word_bank;

pub use constants::*;
pub use game_manager::{GameManager, SharedGame};
pub use game_session::{GameSession, GameState, GuessError, GuessOutcome};
pub use word_bank::{WordBank, WordBankError};
