//! Configuration module
//!
//! - `client` - Search endpoint location
//! - `environment` - Environment detection and logging configuration

pub mod client;
pub mod environment;

pub use client::{ClientConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_SEARCH_PATH};
pub use environment::{Environment, LogFormat, LoggingConfig};
