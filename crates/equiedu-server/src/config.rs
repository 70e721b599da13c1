// ABOUTME: Configuration loading and validation for the equiedu server.
// ABOUTME: Reads environment variables once at startup; missing credentials refuse to start the process.

use std::net::SocketAddr;
use std::time::Duration;

use equiedu_agent::{GeneratorSettings, Provider};
use thiserror::Error;

const DEFAULT_BIND: &str = "127.0.0.1:8501";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HISTORY_LIMIT: usize = 3;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("EQUIEDU_BIND is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error("EQUIEDU_PROVIDER '{0}' is not supported (expected 'gemini' or 'openai')")]
    UnknownProvider(String),

    #[error("{0} is not set; refusing to start without text-generation credentials")]
    MissingApiKey(&'static str),

    #[error("EQUIEDU_GENERATION_TIMEOUT_SECS must be a positive integer, got '{0}'")]
    InvalidTimeout(String),

    #[error("EQUIEDU_HISTORY_LIMIT must be a non-negative integer, got '{0}'")]
    InvalidHistoryLimit(String),
}

/// Process-wide configuration, resolved once before serving requests.
#[derive(Debug, Clone)]
pub struct EquiConfig {
    pub bind: SocketAddr,
    pub generator: GeneratorSettings,
    pub generation_timeout: Duration,
    pub history_limit: usize,
}

/// Read an env var and return `Some(value)` only if it is non-empty after trimming.
fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|v| {
        let trimmed = v.trim().to_string();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    })
}

impl EquiConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - EQUIEDU_BIND: socket address to bind (default: 127.0.0.1:8501)
    /// - EQUIEDU_PROVIDER: text-generation provider, gemini | openai (default: gemini)
    /// - GEMINI_API_KEY / OPENAI_API_KEY: required for the selected provider
    /// - GEMINI_MODEL / OPENAI_MODEL: model override (optional)
    /// - GEMINI_BASE_URL / OPENAI_BASE_URL: endpoint override (optional)
    /// - EQUIEDU_GENERATION_TIMEOUT_SECS: bound on each generation call (default: 30)
    /// - EQUIEDU_HISTORY_LIMIT: requests kept in session history (default: 3)
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_str = non_empty_env("EQUIEDU_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        let provider_str =
            non_empty_env("EQUIEDU_PROVIDER").unwrap_or_else(|| "gemini".to_string());
        let provider: Provider = provider_str
            .parse()
            .map_err(|_| ConfigError::UnknownProvider(provider_str))?;

        let api_key = non_empty_env(provider.api_key_var())
            .ok_or(ConfigError::MissingApiKey(provider.api_key_var()))?;

        let mut generator = GeneratorSettings::new(provider, api_key);
        if let Some(model) = non_empty_env(provider.model_var()) {
            generator.model = model;
        }
        if let Some(base_url) = non_empty_env(provider.base_url_var()) {
            generator.base_url = base_url;
        }

        let generation_timeout = match non_empty_env("EQUIEDU_GENERATION_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        let history_limit = match non_empty_env("EQUIEDU_HISTORY_LIMIT") {
            None => DEFAULT_HISTORY_LIMIT,
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidHistoryLimit(raw))?,
        };

        Ok(Self {
            bind,
            generator,
            generation_timeout,
            history_limit,
        })
    }
}
