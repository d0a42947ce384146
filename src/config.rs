//! Runtime configuration loaded from environment variables.

use chrono::Duration;

/// Default bearer token lifetime: seven days.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Server configuration shared with every request through the app state.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Lifetime of issued bearer tokens (from NOTEFUL_TOKEN_TTL_SECS).
    pub token_ttl: Duration,
    /// Allowed CORS origins (from NOTEFUL_CORS_ORIGINS, comma-separated).
    /// `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let token_ttl = std::env::var("NOTEFUL_TOKEN_TTL_SECS")
            .ok()
            .and_then(|s| parse_ttl(&s))
            .unwrap_or_else(|| Duration::seconds(DEFAULT_TOKEN_TTL_SECS));

        let cors_origins = std::env::var("NOTEFUL_CORS_ORIGINS")
            .ok()
            .map(|s| parse_origins(&s))
            .filter(|origins| !origins.is_empty());

        Self {
            token_ttl,
            cors_origins,
        }
    }

    /// Create a config with a specific token lifetime.
    pub fn with_token_ttl(token_ttl: Duration) -> Self {
        Self {
            token_ttl,
            ..Self::default()
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
            cors_origins: None,
        }
    }
}

fn parse_ttl(s: &str) -> Option<Duration> {
    s.trim()
        .parse::<i64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::seconds)
}

fn parse_origins(s: &str) -> Vec<String> {
    s.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
