//! Client configuration.
//!
//! Values come from the process environment so that binaries can pick them
//! up from a `.env` file as well.

use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/";
pub const DEFAULT_ENDPOINT: &str = "api.php";

pub const BASE_URL_VAR: &str = "EVENT_API_BASE_URL";
pub const ENDPOINT_VAR: &str = "EVENT_API_ENDPOINT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Where the event API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Read `EVENT_API_BASE_URL` and `EVENT_API_ENDPOINT`, falling back to
    /// the defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            base_url: lookup(BASE_URL_VAR).unwrap_or(defaults.base_url),
            endpoint: lookup(ENDPOINT_VAR).unwrap_or(defaults.endpoint),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Empty(BASE_URL_VAR));
        }
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Empty(ENDPOINT_VAR));
        }
        Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidUrl {
            var: BASE_URL_VAR,
            reason: e.to_string(),
        })?;
        Ok(())
    }
}
