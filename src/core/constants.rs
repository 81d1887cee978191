/// Incorrect guesses allowed before a game is lost
pub const MAX_ATTEMPTS: usize = 6;

/// Character shown in place of letters that have not been guessed yet
pub const MASK_PLACEHOLDER: char = '_';

/// Length of generated game IDs
pub const GAME_ID_LENGTH: usize = 12;

/// Games older than this are evicted regardless of state (1 hour)
pub const GAME_TTL_SECONDS: u64 = 3600;

/// Finished games are evicted this long after they end (30 minutes)
pub const FINISHED_GAME_TTL_SECONDS: u64 = 1800;

/// How often the background sweeper runs (5 minutes)
pub const CLEANUP_INTERVAL_SECONDS: u64 = 300;
