//! Runtime configuration for the session client.
//!
//! Priority resolution: explicit overrides (CLI) > environment variables > defaults.

use std::time::Duration;

use axiom_core::DEFAULT_TOP_K;
use axiom_engine::{ClientSettings, RevealSettings, DEFAULT_BASE_URL};
use thiserror::Error;

pub const ENV_API_URL: &str = "AXIOM_API_URL";
pub const ENV_TOP_K: &str = "AXIOM_TOP_K";
pub const ENV_REVEAL_DELAY_MS: &str = "AXIOM_REVEAL_DELAY_MS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "AXIOM_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid api url {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("top_k must be a positive integer")]
    ZeroTopK,
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Values given explicitly, typically from the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub top_k: Option<usize>,
    pub reveal_delay_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub top_k: usize,
    pub reveal_delay: Duration,
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            top_k: DEFAULT_TOP_K,
            reveal_delay: RevealSettings::default().tick,
            request_timeout: None,
        }
    }
}

impl AppConfig {
    /// Resolves against the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    pub fn resolve_with(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = overrides
            .api_url
            .or_else(|| env(ENV_API_URL))
            .unwrap_or(defaults.api_url);
        if let Err(err) = url::Url::parse(&api_url) {
            return Err(ConfigError::InvalidUrl {
                value: api_url,
                reason: err.to_string(),
            });
        }

        let top_k = match overrides.top_k {
            Some(value) => value,
            None => env_number(&env, ENV_TOP_K)?.map_or(defaults.top_k, |v| v as usize),
        };
        if top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }

        let reveal_delay = match overrides.reveal_delay_ms {
            Some(ms) => Duration::from_millis(ms),
            None => env_number(&env, ENV_REVEAL_DELAY_MS)?
                .map_or(defaults.reveal_delay, Duration::from_millis),
        };

        let request_timeout = match overrides.request_timeout_secs {
            Some(secs) => Some(secs),
            None => env_number(&env, ENV_REQUEST_TIMEOUT_SECS)?,
        }
        .map(Duration::from_secs);

        Ok(Self {
            api_url,
            top_k,
            reveal_delay,
            request_timeout,
        })
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            request_timeout: self.request_timeout,
            ..ClientSettings::with_base_url(self.api_url.clone())
        }
    }

    pub fn reveal_settings(&self) -> RevealSettings {
        RevealSettings {
            tick: self.reveal_delay,
        }
    }
}

fn env_number(
    env: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<u64>, ConfigError> {
    match env(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}
