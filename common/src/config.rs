use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_SECS: u64 = 600;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const PRACTICUM_ENDPOINT: &str = "PRACTICUM_ENDPOINT";
pub const RETRY_TIME: &str = "RETRY_TIME";
pub const LOG_FILE: &str = "HOMEWORK_BOT_LOG_FILE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variables are missing: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("RETRY_TIME must be a positive whole number of seconds, got {0:?}")]
    InvalidRetry(String),
}

/// Everything the bot reads from the environment at startup.
#[derive(Clone)]
pub struct BotConfig {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub retry_secs: u64,
    pub log_file: Option<PathBuf>,
}

// Tokens stay out of Debug output so the config can be logged.
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("retry_secs", &self.retry_secs)
            .field("log_file", &self.log_file)
            .finish_non_exhaustive()
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Values are trimmed and
    /// empty ones count as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let practicum_token = get(PRACTICUM_TOKEN);
        let telegram_token = get(TELEGRAM_TOKEN);
        let telegram_chat_id = get(TELEGRAM_CHAT_ID);

        let (practicum_token, telegram_token, telegram_chat_id) =
            match (practicum_token, telegram_token, telegram_chat_id) {
                (Some(p), Some(t), Some(c)) => (p, t, c),
                (p, t, c) => {
                    let missing = [
                        (PRACTICUM_TOKEN, p.is_none()),
                        (TELEGRAM_TOKEN, t.is_none()),
                        (TELEGRAM_CHAT_ID, c.is_none()),
                    ]
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                    return Err(ConfigError::Missing(missing));
                }
            };

        let retry_secs = match get(RETRY_TIME) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidRetry(raw)),
            },
            None => DEFAULT_RETRY_SECS,
        };

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint: get(PRACTICUM_ENDPOINT).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            retry_secs,
            log_file: log_file_from_lookup(&lookup),
        })
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_secs)
    }
}

/// The log file is needed before the rest of the config is validated,
/// so it can be read on its own.
pub fn log_file_from_env() -> Option<PathBuf> {
    log_file_from_lookup(&|key: &str| std::env::var(key).ok())
}

fn log_file_from_lookup<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(LOG_FILE)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
