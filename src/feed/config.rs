//! Feed configuration and environment variable handling.

use std::env;
use std::time::Duration;

use super::error::FeedError;

/// Default feed endpoint (the dashboard's public store).
pub const DEFAULT_FEED_URL: &str =
    "https://markov-chains-default-rtdb.firebaseio.com/guesses.json";
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default snapshot time-to-live in seconds.
pub const DEFAULT_TTL_SECS: u64 = 300;
/// Default number of retries after the first failed attempt.
pub const DEFAULT_RETRIES: u32 = 1;

/// Feed and cache configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Feed endpoint URL
    pub url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries after the first failed attempt
    pub retries: u32,
    /// Snapshot time-to-live
    pub ttl: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
        }
    }
}

impl FeedConfig {
    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `GUESS_FEED_URL` (optional): feed endpoint URL
    /// - `GUESS_FEED_TIMEOUT_SECS` (optional, default: 10): request timeout
    /// - `GUESS_FEED_RETRIES` (optional, default: 1): retries after a failure
    /// - `GUESS_CACHE_TTL_SECS` (optional, default: 300): snapshot lifetime
    ///
    /// # Errors
    /// Returns an error if a numeric variable is set but unparsable.
    pub fn from_env() -> Result<Self, FeedError> {
        let defaults = Self::default();
        let url = env::var("GUESS_FEED_URL").unwrap_or(defaults.url);
        let timeout =
            Duration::from_secs(parse_secs("GUESS_FEED_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?);
        let ttl = Duration::from_secs(parse_secs("GUESS_CACHE_TTL_SECS", DEFAULT_TTL_SECS)?);
        let retries = match env::var("GUESS_FEED_RETRIES") {
            Ok(raw) => raw.parse().map_err(|_| {
                FeedError::Config("GUESS_FEED_RETRIES must be a non-negative integer".to_string())
            })?,
            Err(_) => DEFAULT_RETRIES,
        };

        Ok(Self {
            url,
            timeout,
            retries,
            ttl,
        })
    }
}

fn parse_secs(var: &str, default: u64) -> Result<u64, FeedError> {
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| FeedError::Config(format!("{} must be a number of seconds", var))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.url, DEFAULT_FEED_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.retries, 1);
    }
}
