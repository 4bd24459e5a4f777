/// Configuration management for the feed service
///
/// Loads configuration from environment variables.
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

/// Personalized feed tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Number of most recent interactions mined for keywords per request
    #[serde(default = "default_history_limit")]
    pub history_limit: i64,
    /// Drop notes the user already interacted with from the feed
    #[serde(default)]
    pub exclude_seen: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            exclude_seen: false,
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

fn default_history_limit() -> i64 {
    500
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app = AppConfig {
            env: get("APP_ENV").unwrap_or_else(|| "development".to_string()),
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: get("APP_PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .context("APP_PORT must be a valid port number")?,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        let database = DatabaseConfig {
            url: get("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: match get("DATABASE_MAX_CONNECTIONS") {
                Some(v) => v
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?,
                None => default_max_connections(),
            },
            acquire_timeout_secs: match get("DATABASE_ACQUIRE_TIMEOUT_SECS") {
                Some(v) => v
                    .parse()
                    .context("DATABASE_ACQUIRE_TIMEOUT_SECS must be a valid u64")?,
                None => default_acquire_timeout_secs(),
            },
        };

        let history_limit = match get("FEED_HISTORY_LIMIT") {
            Some(v) => v
                .parse()
                .context("FEED_HISTORY_LIMIT must be a valid integer")?,
            None => default_history_limit(),
        };
        if history_limit < 1 {
            bail!("FEED_HISTORY_LIMIT must be at least 1, got {}", history_limit);
        }

        let feed = FeedConfig {
            history_limit,
            exclude_seen: match get("FEED_EXCLUDE_SEEN") {
                Some(v) => v.parse().context("FEED_EXCLUDE_SEEN must be true or false")?,
                None => false,
            },
        };

        Ok(Config {
            app,
            database,
            feed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/opennotes")]).unwrap();
        assert_eq!(config.app.port, 5000);
        assert_eq!(config.app.env, "development");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.feed.history_limit, 500);
        assert!(!config.feed.exclude_seen);
    }

    #[test]
    fn test_database_url_required() {
        assert!(load(&[]).is_err());
    }

    #[test]
    fn test_feed_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/opennotes"),
            ("FEED_HISTORY_LIMIT", "50"),
            ("FEED_EXCLUDE_SEEN", "true"),
        ])
        .unwrap();
        assert_eq!(config.feed.history_limit, 50);
        assert!(config.feed.exclude_seen);
    }

    #[test]
    fn test_history_limit_must_be_positive() {
        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/opennotes"),
            ("FEED_HISTORY_LIMIT", "0"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("FEED_HISTORY_LIMIT"));
    }

    #[test]
    fn test_invalid_port() {
        assert!(load(&[
            ("DATABASE_URL", "postgres://localhost/opennotes"),
            ("APP_PORT", "not-a-port"),
        ])
        .is_err());
    }
}
