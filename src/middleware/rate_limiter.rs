use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

/// Client address and the endpoint bucket it is counted against
type BucketKey = (IpAddr, &'static str);

/// Track request rates per IP address and endpoint using sliding window
#[derive(Clone)]
pub struct RateLimiter {
    /// Map of (IP, bucket) -> list of request timestamps
    requests: Arc<Mutex<HashMap<BucketKey, Vec<Instant>>>>,
    /// Last cleanup time
    last_cleanup: Arc<Mutex<Instant>>,
    /// Cleanup interval
    cleanup_interval: Duration,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(HashMap::new())),
            last_cleanup: Arc::new(Mutex::new(Instant::now())),
            cleanup_interval: Duration::from_secs(60),
        }
    }

    /// Check if request is allowed under rate limit
    ///
    /// # Arguments
    ///
    /// * `ip` - Client IP address
    /// * `bucket` - Endpoint bucket the request counts against
    /// * `limit` - Maximum requests allowed in window
    /// * `window` - Length of the sliding window
    ///
    /// # Returns
    ///
    /// True if request is allowed, False if rate limit exceeded
    pub async fn is_allowed(
        &self,
        ip: IpAddr,
        bucket: &'static str,
        limit: usize,
        window: Duration,
    ) -> bool {
        let now = Instant::now();

        let mut requests = self.requests.lock().await;
        let timestamps = requests.entry((ip, bucket)).or_default();

        timestamps.retain(|&ts| now.duration_since(ts) < window);

        if timestamps.len() >= limit {
            return false;
        }

        timestamps.push(now);
        true
    }

    /// Remove stale entries to prevent memory leaks
    async fn cleanup_old_entries(&self) {
        let now = Instant::now();

        let mut last_cleanup = self.last_cleanup.lock().await;
        if now.duration_since(*last_cleanup) < self.cleanup_interval {
            return;
        }

        let mut requests = self.requests.lock().await;
        requests.retain(|_, timestamps| {
            timestamps
                .iter()
                .any(|&ts| now.duration_since(ts) < Duration::from_secs(60))
        });

        *last_cleanup = now;
    }

    #[cfg(test)]
    async fn tracked_buckets(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Get rate limit for endpoint
///
/// Each endpoint has its own budget, so a burst of guesses never blocks
/// starting a new game.
///
/// # Arguments
///
/// * `path` - Request path
///
/// # Returns
///
/// Tuple of (bucket name, requests per second limit)
fn get_rate_limit(path: &str) -> (&'static str, usize) {
    match path {
        "/health" => ("health", 10),
        "/start_game" => ("start_game", 10),
        // One click per letter, leave room for fast typists
        "/guess" => ("guess", 20),
        "/game_state" => ("game_state", 20),
        _ => ("default", 50),
    }
}

/// Axum middleware to enforce rate limits per IP address
///
/// # Arguments
///
/// * `limiter` - Shared rate limiter from application state
/// * `req` - Incoming request
/// * `next` - Next middleware/handler
///
/// # Returns
///
/// Response or rate limit error
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    let path = req.uri().path().to_owned();
    let (bucket, limit) = get_rate_limit(&path);

    if !limiter
        .is_allowed(ip, bucket, limit, Duration::from_secs(1))
        .await
    {
        tracing::warn!("🚦 Rate limit exceeded for {} on {}", ip, path);
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "detail": "Rate limit exceeded. Please try again later."
            })),
        )
            .into_response();
    }

    limiter.cleanup_old_entries().await;

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_rate_limit_guess() {
        assert_eq!(get_rate_limit("/guess"), ("guess", 20));
    }

    #[test]
    fn test_get_rate_limit_start_game() {
        assert_eq!(get_rate_limit("/start_game"), ("start_game", 10));
    }

    #[test]
    fn test_get_rate_limit_health() {
        assert_eq!(get_rate_limit("/health"), ("health", 10));
    }

    #[test]
    fn test_get_rate_limit_default() {
        assert_eq!(get_rate_limit("/"), ("default", 50));
        assert_eq!(get_rate_limit("/unknown"), ("default", 50));
    }

    #[tokio::test]
    async fn test_rate_limiter_allows_under_limit() {
        let limiter = RateLimiter::new();
        let ip: IpAddr = "127.0.0.1".parse().unwrap();

        for _ in 0..5 {
            assert!(limiter.is_allowed(ip, "guess", 5, Duration::from_secs(1)).await);
        }
    }

    #[tokio::test]
    async fn test_rate_limiter_blocks_over_limit() {
        let limiter = RateLimiter::new();
        let ip: IpAddr = "127.0.0.1".parse().unwrap();

        for _ in 0..5 {
            assert!(limiter.is_allowed(ip, "guess", 5, Duration::from_secs(1)).await);
        }

        assert!(!limiter.is_allowed(ip, "guess", 5, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn test_rate_limiter_separate_ips() {
        let limiter = RateLimiter::new();
        let ip1: IpAddr = "127.0.0.1".parse().unwrap();
        let ip2: IpAddr = "127.0.0.2".parse().unwrap();

        for _ in 0..5 {
            assert!(limiter.is_allowed(ip1, "guess", 5, Duration::from_secs(1)).await);
        }

        assert!(!limiter.is_allowed(ip1, "guess", 5, Duration::from_secs(1)).await);
        assert!(limiter.is_allowed(ip2, "guess", 5, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn test_rate_limiter_separate_buckets() {
        let limiter = RateLimiter::new();
        let ip: IpAddr = "127.0.0.1".parse().unwrap();

        for _ in 0..5 {
            assert!(limiter.is_allowed(ip, "guess", 5, Duration::from_secs(1)).await);
        }

        assert!(!limiter.is_allowed(ip, "guess", 5, Duration::from_secs(1)).await);
        assert!(limiter.is_allowed(ip, "start_game", 5, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn test_rate_limiter_window_expires() {
        let limiter = RateLimiter::new();
        let ip: IpAddr = "127.0.0.1".parse().unwrap();
        let window = Duration::from_millis(50);

        assert!(limiter.is_allowed(ip, "guess", 1, window).await);
        assert!(!limiter.is_allowed(ip, "guess", 1, window).await);

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(limiter.is_allowed(ip, "guess", 1, window).await);
    }

    #[tokio::test]
    async fn test_cleanup_removes_idle_ips() {
        let limiter = RateLimiter {
            cleanup_interval: Duration::ZERO,
            ..RateLimiter::new()
        };
        let ip: IpAddr = "127.0.0.1".parse().unwrap();

        limiter.is_allowed(ip, "guess", 5, Duration::from_secs(1)).await;
        let idle: IpAddr = "127.0.0.9".parse().unwrap();
        limiter.requests.lock().await.insert((idle, "guess"), Vec::new());
        assert_eq!(limiter.tracked_buckets().await, 2);

        limiter.cleanup_old_entries().await;

        assert_eq!(limiter.tracked_buckets().await, 1);
    }
}
