pub mod middleware;
pub mod token;

pub use middleware::{CurrentGame, SESSION_COOKIE};
pub use token::{generate_session_token, verify_session_token, TOKEN_EXPIRY_SECONDS};
