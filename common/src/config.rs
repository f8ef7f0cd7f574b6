use std::fmt;
use thiserror::Error;

/// Default status endpoint polled by the watcher.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default pause between two poll cycles, in seconds.
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

// (primary name, legacy alias)
const API_CREDENTIAL: (&str, &str) = ("API_CREDENTIAL", "TOKEN_YANDEX");
const NOTIFIER_CREDENTIAL: (&str, &str) = ("NOTIFIER_CREDENTIAL", "TOKEN_TELEGRAM");
const NOTIFIER_DESTINATION: (&str, &str) = ("NOTIFIER_DESTINATION", "TELEGRAM_CHAT_ID");

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {name}")]
    Missing { name: &'static str },
}

/// Credentials and destination for the Telegram channel.
#[derive(Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Mandatory settings; the process refuses to start without all of them.
#[derive(Clone, PartialEq, Eq)]
pub struct WatcherConfig {
    pub api_credential: String,
    pub telegram: TelegramConfig,
}

impl fmt::Debug for WatcherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatcherConfig")
            .field("api_credential", &"<redacted>")
            .field("telegram", &self.telegram)
            .finish()
    }
}

impl WatcherConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// Each setting is looked up under its primary name first, then under its
    /// legacy alias. A variable that is set but empty counts as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |(name, alias): (&'static str, &'static str)| {
            [name, alias]
                .into_iter()
                .filter_map(|key| lookup(key))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
                .ok_or(ConfigError::Missing { name })
        };

        Ok(Self {
            api_credential: required(API_CREDENTIAL)?,
            telegram: TelegramConfig {
                bot_token: required(NOTIFIER_CREDENTIAL)?,
                chat_id: required(NOTIFIER_DESTINATION)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_all_primary_names_present() {
        let config = WatcherConfig::from_lookup(lookup_from(&[
            ("API_CREDENTIAL", "api-token"),
            ("NOTIFIER_CREDENTIAL", "bot-token"),
            ("NOTIFIER_DESTINATION", "12345"),
        ]))
        .unwrap();

        assert_eq!(config.api_credential, "api-token");
        assert_eq!(config.telegram.bot_token, "bot-token");
        assert_eq!(config.telegram.chat_id, "12345");
    }

    #[test]
    fn test_legacy_aliases_are_accepted() {
        let config = WatcherConfig::from_lookup(lookup_from(&[
            ("TOKEN_YANDEX", "api-token"),
            ("TOKEN_TELEGRAM", "bot-token"),
            ("TELEGRAM_CHAT_ID", "-100200300"),
        ]))
        .unwrap();

        assert_eq!(config.api_credential, "api-token");
        assert_eq!(config.telegram.bot_token, "bot-token");
        assert_eq!(config.telegram.chat_id, "-100200300");
    }

    #[test]
    fn test_primary_name_wins_over_alias() {
        let config = WatcherConfig::from_lookup(lookup_from(&[
            ("API_CREDENTIAL", "primary"),
            ("TOKEN_YANDEX", "legacy"),
            ("NOTIFIER_CREDENTIAL", "bot-token"),
            ("NOTIFIER_DESTINATION", "1"),
        ]))
        .unwrap();

        assert_eq!(config.api_credential, "primary");
    }

    #[test]
    fn test_missing_variable_is_reported_by_primary_name() {
        let err = WatcherConfig::from_lookup(lookup_from(&[
            ("API_CREDENTIAL", "api-token"),
            ("NOTIFIER_DESTINATION", "1"),
        ]))
        .unwrap_err();

        assert_eq!(err, ConfigError::Missing { name: "NOTIFIER_CREDENTIAL" });
        assert!(err.to_string().contains("NOTIFIER_CREDENTIAL"));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let err = WatcherConfig::from_lookup(lookup_from(&[
            ("API_CREDENTIAL", "   "),
            ("NOTIFIER_CREDENTIAL", "bot-token"),
            ("NOTIFIER_DESTINATION", "1"),
        ]))
        .unwrap_err();

        assert_eq!(err, ConfigError::Missing { name: "API_CREDENTIAL" });
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let config = WatcherConfig::from_lookup(lookup_from(&[
            ("API_CREDENTIAL", "super-secret-api"),
            ("NOTIFIER_CREDENTIAL", "super-secret-bot"),
            ("NOTIFIER_DESTINATION", "42"),
        ]))
        .unwrap();

        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("42"));
    }
}
