use std::env;
use std::time::Duration;

use chrono::Locale;
use thiserror::Error;

const BOT_TOKEN_ENV: &str = "BOT_TOKEN";
const BOT_LOCALE_ENV: &str = "BOT_LOCALE";
const SESSION_TTL_ENV: &str = "SESSION_TTL_SECS";
const SESSION_CLEANUP_ENV: &str = "SESSION_CLEANUP_INTERVAL_SECS";

const DEFAULT_LOCALE: &str = "pt_BR";
const DEFAULT_SESSION_TTL_SECS: u64 = 3600;
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 600;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub locale: Locale,
    pub session_ttl: Duration,
    pub cleanup_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup(BOT_TOKEN_ENV)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::Missing(BOT_TOKEN_ENV))?;

        let locale_name = lookup(BOT_LOCALE_ENV).unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let locale = Locale::try_from(locale_name.as_str()).map_err(|_| ConfigError::Invalid {
            name: BOT_LOCALE_ENV,
            value: locale_name.clone(),
        })?;

        Ok(Self {
            bot_token,
            locale,
            session_ttl: seconds(&lookup, SESSION_TTL_ENV, DEFAULT_SESSION_TTL_SECS)?,
            cleanup_interval: seconds(&lookup, SESSION_CLEANUP_ENV, DEFAULT_CLEANUP_INTERVAL_SECS)?,
        })
    }
}

fn seconds<F>(lookup: &F, name: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(Duration::from_secs(default)),
        Some(value) => match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(ConfigError::Invalid { name, value }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn token_is_required() {
        assert_eq!(config(&[]).unwrap_err(), ConfigError::Missing("BOT_TOKEN"));
        assert_eq!(config(&[("BOT_TOKEN", "  ")]).unwrap_err(), ConfigError::Missing("BOT_TOKEN"));
    }

    #[test]
    fn defaults_apply() {
        let config = config(&[("BOT_TOKEN", "123:abc")]).unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.locale, Locale::pt_BR);
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
        assert_eq!(config.cleanup_interval, Duration::from_secs(600));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config(&[
            ("BOT_TOKEN", "123:abc"),
            ("BOT_LOCALE", "en_US"),
            ("SESSION_TTL_SECS", "60"),
        ])
        .unwrap();
        assert_eq!(config.locale, Locale::en_US);
        assert_eq!(config.session_ttl, Duration::from_secs(60));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            config(&[("BOT_TOKEN", "t"), ("BOT_LOCALE", "xx_YY")]),
            Err(ConfigError::Invalid { name: "BOT_LOCALE", .. })
        ));
        assert!(matches!(
            config(&[("BOT_TOKEN", "t"), ("SESSION_TTL_SECS", "0")]),
            Err(ConfigError::Invalid { name: "SESSION_TTL_SECS", .. })
        ));
    }
}
