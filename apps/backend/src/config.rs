//! Environment-driven configuration.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// External generation service settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub url: String,
    pub timeout: Duration,
    pub max_attempts: u32,
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub extract_timeout: Duration,
    /// `None` means decks come from the deterministic fallback generator.
    pub generation: Option<GenerationConfig>,
    pub session_ttl: Duration,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Recognised variables:
    /// - HOST, PORT
    /// - EXTRACT_TIMEOUT_SECS
    /// - GENERATION_URL, GENERATION_TIMEOUT_SECS, GENERATION_MAX_ATTEMPTS
    /// - SESSION_TTL_SECS
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 3000u16)?;
        let extract_timeout = Duration::from_secs(parse_or(&lookup, "EXTRACT_TIMEOUT_SECS", 30u64)?);
        let session_ttl = Duration::from_secs(parse_or(&lookup, "SESSION_TTL_SECS", 3600u64)?);

        let generation = match lookup("GENERATION_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => Some(GenerationConfig {
                url,
                timeout: Duration::from_secs(parse_or(&lookup, "GENERATION_TIMEOUT_SECS", 20u64)?),
                max_attempts: parse_or(&lookup, "GENERATION_MAX_ATTEMPTS", 2u32)?,
            }),
            None => None,
        };

        Ok(Self {
            host,
            port,
            extract_timeout,
            generation,
            session_ttl,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
