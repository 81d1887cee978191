use crate::core::GameManager;
use crate::middleware::RateLimiter;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub game_manager: Arc<RwLock<GameManager>>,
    pub secret_key: String,
    /// Mark the session cookie `Secure` (off in development)
    pub secure_cookies: bool,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(game_manager: GameManager, secret_key: String) -> Self {
        Self {
            game_manager: Arc::new(RwLock::new(game_manager)),
            secret_key,
            secure_cookies: true,
            rate_limiter: RateLimiter::new(),
        }
    }

    pub fn with_secure_cookies(mut self, secure_cookies: bool) -> Self {
        self.secure_cookies = secure_cookies;
        self
    }
}
