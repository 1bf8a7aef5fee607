//! Search endpoint configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Route of the subscriber search endpoint on the video call backend
pub const DEFAULT_SEARCH_PATH: &str = "/p2pVideoCall/caller/searchSubscriber";

/// Prefix for environment overrides, e.g. `VIDEOCALL__BASE_URL`
const ENV_PREFIX: &str = "VIDEOCALL";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Location of the subscriber search endpoint.
///
/// Retries, timeouts and credentials are not configured here; the
/// transport's own defaults apply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Scheme and authority of the backend, e.g. `https://api.example.com`
    pub base_url: String,

    /// Path of the search route
    #[serde(default = "default_search_path")]
    pub search_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            search_path: default_search_path(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration pointing at `base_url` with the default search path
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Override the search path
    pub fn with_search_path(mut self, path: impl Into<String>) -> Self {
        self.search_path = path.into();
        self
    }

    /// Load layered configuration: defaults, then an optional file, then
    /// `VIDEOCALL__*` environment variables.
    pub fn load(file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults_builder()?;
        if let Some(path) = file {
            builder = builder.add_source(::config::File::with_name(path).required(false));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text on top of the defaults
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = Self::defaults_builder()?
            .add_source(::config::File::from_str(contents, ::config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the endpoint can be assembled into an absolute URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "base_url",
                message: format!("expected an http(s) URL, got '{}'", self.base_url),
            });
        }
        if !self.search_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                field: "search_path",
                message: format!("must start with '/', got '{}'", self.search_path),
            });
        }
        Ok(())
    }

    /// Full URL of the search endpoint
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.search_path)
    }

    fn defaults_builder(
    ) -> Result<::config::ConfigBuilder<::config::builder::DefaultState>, ConfigError> {
        Ok(::config::Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("search_path", DEFAULT_SEARCH_PATH)?)
    }
}

fn default_search_path() -> String {
    String::from(DEFAULT_SEARCH_PATH)
}
