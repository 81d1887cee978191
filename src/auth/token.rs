use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// How long a session token stays valid (24 hours)
pub const TOKEN_EXPIRY_SECONDS: u64 = 86400;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("system time error: {0}")]
    Clock(#[from] std::time::SystemTimeError),
    #[error("HMAC initialization error: invalid key length")]
    Key,
}

fn now_secs() -> Result<u64, TokenError> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

/// Generate a signed token naming a game session
///
/// # Arguments
///
/// * `game_id` - The game session ID
/// * `secret_key` - Secret key for signing
///
/// # Returns
///
/// Signed token string in format: `game_id.expiry.signature`
///
/// # Errors
///
/// Returns an error if HMAC initialization fails or time is invalid
pub fn generate_session_token(game_id: &str, secret_key: &str) -> Result<String, TokenError> {
    let expiry = now_secs()? + TOKEN_EXPIRY_SECONDS;
    sign_session_token(game_id, expiry, secret_key)
}

fn sign_session_token(game_id: &str, expiry: u64, secret_key: &str) -> Result<String, TokenError> {
    let payload = format!("{}.{}", game_id, expiry);

    let mut mac =
        HmacSha256::new_from_slice(secret_key.as_bytes()).map_err(|_| TokenError::Key)?;
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    Ok(format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(signature)))
}

/// Verify a session token and extract its data
///
/// # Arguments
///
/// * `token` - The token to verify
/// * `secret_key` - Secret key used for signing
///
/// # Returns
///
/// Tuple of (game_id, expiry) if valid and unexpired, None otherwise
///
/// Uses constant-time comparison to prevent timing attacks
pub fn verify_session_token(token: Option<&str>, secret_key: &str) -> Option<(String, u64)> {
    let (payload, signature_b64) = token?.rsplit_once('.')?;
    let (game_id, expiry_str) = payload.split_once('.')?;

    if game_id.is_empty() || expiry_str.contains('.') {
        return None;
    }

    let expiry: u64 = expiry_str.parse().ok()?;
    if now_secs().ok()? > expiry {
        return None;
    }

    let provided_signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;

    // verify_slice compares in constant time
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes()).ok()?;
    mac.update(payload.as_bytes());
    mac.verify_slice(&provided_signature).ok()?;

    Some((game_id.to_string(), expiry))
}
