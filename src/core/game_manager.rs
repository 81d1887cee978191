use rand::{distributions::Alphanumeric, rngs::StdRng, Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;

use super::{
    GameSession, GameState, WordBank, FINISHED_GAME_TTL_SECONDS, GAME_ID_LENGTH, GAME_TTL_SECONDS,
    MAX_ATTEMPTS,
};

/// A game session that can be locked independently of the manager
pub type SharedGame = Arc<Mutex<GameSession>>;

/// Manager for all active game sessions
#[derive(Debug)]
pub struct GameManager {
    /// Map of game_id to GameSession
    games: HashMap<String, SharedGame>,
    /// Where new words come from
    word_bank: WordBank,
    /// Random source for word selection
    rng: StdRng,
    /// Misses allowed in every new game
    max_attempts: usize,
}

impl GameManager {
    /// Create a new game manager with the default word bank
    pub fn new() -> Self {
        Self::with_word_bank(WordBank::default(), StdRng::from_entropy())
    }

    /// Create a game manager with a specific word bank and random source
    ///
    /// # Arguments
    ///
    /// * `word_bank` - Words new games are drawn from
    /// * `rng` - Random source used for word selection
    pub fn with_word_bank(word_bank: WordBank, rng: StdRng) -> Self {
        Self {
            games: HashMap::new(),
            word_bank,
            rng,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// Create a new game session with a unique ID and a random word
    ///
    /// # Returns
    ///
    /// The game_id and a handle to the newly created game
    pub fn create_game(&mut self) -> (String, SharedGame) {
        let mut game_id = Self::generate_game_id();

        // Ensure uniqueness (very unlikely to collide, but check anyway)
        while self.games.contains_key(&game_id) {
            game_id = Self::generate_game_id();
        }

        let (category, word) = self.word_bank.pick_random(&mut self.rng);
        let game = GameSession::new(
            game_id.clone(),
            category.to_string(),
            word.to_string(),
            self.max_attempts,
        );

        let shared = Arc::new(Mutex::new(game));
        self.games.insert(game_id.clone(), Arc::clone(&shared));
        (game_id, shared)
    }

    /// Generate a cryptographically secure URL-safe random game ID
    ///
    /// IDs come from the OS RNG, not the injected word RNG, so a seeded
    /// manager still hands out unguessable IDs.
    fn generate_game_id() -> String {
        use rand::rngs::OsRng;

        OsRng
            .sample_iter(&Alphanumeric)
            .take(GAME_ID_LENGTH)
            .map(char::from)
            .collect()
    }

    /// Retrieve a game session by ID
    ///
    /// # Arguments
    ///
    /// * `game_id` - The game's unique identifier
    ///
    /// # Returns
    ///
    /// Handle to the GameSession if found, None otherwise
    pub fn get_game(&self, game_id: &str) -> Option<SharedGame> {
        self.games.get(game_id).cloned()
    }

    /// Remove a game session
    ///
    /// # Returns
    ///
    /// True if a game was removed
    pub fn remove_game(&mut self, game_id: &str) -> bool {
        self.games.remove(game_id).is_some()
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    pub fn word_bank(&self) -> &WordBank {
        &self.word_bank
    }

    /// Remove games that are too old or finished
    ///
    /// Games locked by an in-flight request are left for the next sweep.
    ///
    /// # Returns
    ///
    /// Number of games cleaned up
    pub fn cleanup_stale_games(&mut self) -> usize {
        let now = OffsetDateTime::now_utc();
        let cutoff_time = now - Duration::seconds(GAME_TTL_SECONDS as i64);
        let finished_cutoff = now - Duration::seconds(FINISHED_GAME_TTL_SECONDS as i64);

        let stale_game_ids: Vec<String> = self
            .games
            .iter()
            .filter_map(|(game_id, game)| {
                let game = game.try_lock().ok()?;

                if game.created_at < cutoff_time {
                    return Some(game_id.clone());
                }

                match game.finished_at {
                    Some(finished_at) if finished_at < finished_cutoff => Some(game_id.clone()),
                    _ => None,
                }
            })
            .collect();

        for game_id in &stale_game_ids {
            self.remove_game(game_id);
        }

        stale_game_ids.len()
    }

    /// Get statistics about current games
    ///
    /// Games locked by an in-flight request are counted as active.
    ///
    /// # Returns
    ///
    /// JSON value with game statistics
    pub fn get_stats(&self) -> serde_json::Value {
        let (mut won, mut lost) = (0, 0);
        for game in self.games.values() {
            match game.try_lock().map(|g| g.state) {
                Ok(GameState::Won) => won += 1,
                Ok(GameState::Lost) => lost += 1,
                _ => {}
            }
        }

        serde_json::json!({
            "total_games": self.games.len(),
            "active_games": self.games.len() - won - lost,
            "won_games": won,
            "lost_games": lost,
        })
    }
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}
