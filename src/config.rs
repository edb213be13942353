//! Process configuration from the environment

use std::time::Duration;
use thiserror::Error;

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Bot configuration
#[derive(Clone)]
pub struct BotConfig {
    pub telegram_token: String,
    pub app_id: String,
    pub app_key: String,
    /// Override for the recipe search endpoint
    pub recipe_api_url: Option<String>,
    /// Override for the Telegram Bot API host
    pub telegram_api_url: Option<String>,
    pub http_timeout: Duration,
    /// Sessions with no events for this long are dropped
    pub session_idle_ttl: Duration,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(var))
        };
        let seconds = |var: &'static str, default: Duration| match lookup(var) {
            None => Ok(default),
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                _ => Err(ConfigError::Invalid { var, value }),
            },
        };

        Ok(Self {
            telegram_token: required("TELEGRAM_TOKEN")?,
            app_id: required("APP_ID")?,
            app_key: required("APP_KEY")?,
            recipe_api_url: lookup("RECIPE_API_URL"),
            telegram_api_url: lookup("TELEGRAM_API_URL"),
            http_timeout: seconds("RECIPE_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT)?,
            session_idle_ttl: seconds("SESSION_IDLE_TTL_SECS", DEFAULT_SESSION_IDLE_TTL)?,
        })
    }
}

// Credentials stay out of logs
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("recipe_api_url", &self.recipe_api_url)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("http_timeout", &self.http_timeout)
            .field("session_idle_ttl", &self.session_idle_ttl)
            .finish_non_exhaustive()
    }
}
