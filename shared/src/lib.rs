//! Shared utilities and common types for the subscriber search client
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration types (environment, logging, search endpoint)
//! - Response envelope returned by the video call backend
//! - Utility functions (phone masking for logs)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{ClientConfig, ConfigError, Environment, LogFormat, LoggingConfig};
pub use types::{ResponseEnvelope, CODE_OK, ERROR_CODE_UNKNOWN};
pub use utils::phone;
