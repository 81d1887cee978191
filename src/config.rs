use rand::{distributions::Alphanumeric, Rng};
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_PUBLIC_URL: &str = "http://localhost:8000";
const MIN_SECRET_KEY_LENGTH: usize = 32;
const GENERATED_SECRET_KEY_LENGTH: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got '{0}'")]
    InvalidPort(String),
    #[error("HOST '{0}' is not a valid IP address")]
    InvalidHost(String),
    #[error("SECRET_KEY must be at least 32 characters")]
    SecretKeyTooShort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("development") || v.eq_ignore_ascii_case("dev") => {
                Environment::Development
            }
            _ => Environment::Production,
        }
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development => "hangman=debug,tower_http=debug",
            Environment::Production => "hangman=info,tower_http=warn",
        }
    }
}

/// Server settings read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub addr: SocketAddr,
    /// Key used to sign session tokens
    pub secret_key: String,
    /// Origin allowed by CORS
    pub public_url: String,
}

impl Config {
    /// Load settings from process environment (and `.env` if present)
    ///
    /// # Errors
    ///
    /// Returns an error if `HOST`, `PORT` or `SECRET_KEY` are set to invalid values
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal outside development
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::parse(lookup("ENVIRONMENT").as_deref());

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let ip = host
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host.clone()))?;

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let secret_key = match lookup("SECRET_KEY") {
            Some(key) if key.len() < MIN_SECRET_KEY_LENGTH => {
                return Err(ConfigError::SecretKeyTooShort)
            }
            Some(key) => key,
            None => generate_secret_key(),
        };

        let public_url = lookup("PUBLIC_URL").unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string());

        Ok(Self {
            environment,
            addr: SocketAddr::new(ip, port),
            secret_key,
            public_url,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

/// Random alphanumeric signing key, valid for this process only
fn generate_secret_key() -> String {
    rand::thread_rng()
        .sample_iter(Alphanumeric)
        .take(GENERATED_SECRET_KEY_LENGTH)
        .map(char::from)
        .collect()
}
