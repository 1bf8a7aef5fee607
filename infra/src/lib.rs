//! # Infrastructure Layer
//!
//! Concrete implementations behind the subscriber search client:
//! - **HTTP**: reqwest transport for the core `HttpTransport` trait
//! - **Telemetry**: tracing subscriber setup from `LoggingConfig`
//! - **Wiring**: construction of a ready-to-use search client from configuration

use std::sync::Arc;

use vc_core::services::search::SubscriberSearchService;
use vc_shared::config::{ClientConfig, Environment};

/// HTTP transport module - reqwest implementation
pub mod http;

/// Telemetry module - tracing subscriber installation
pub mod telemetry;

pub use http::ReqwestTransport;
pub use telemetry::init_tracing;

/// Search client backed by reqwest
pub type SearchClient = SubscriberSearchService<ReqwestTransport>;

/// Create a search client for the configured endpoint
pub fn create_search_service(config: &ClientConfig) -> Result<SearchClient, InfrastructureError> {
    config.validate()?;
    let transport = ReqwestTransport::new()?;

    tracing::info!(
        endpoint = %config.endpoint_url(),
        "Subscriber search client initialized"
    );

    Ok(SubscriberSearchService::new(Arc::new(transport), config))
}

/// Load configuration for the current environment and build a search client
///
/// Sources, in increasing precedence:
/// - built-in defaults
/// - the environment's config file (e.g. `config.development.toml`), if present
/// - `VIDEOCALL__*` environment variables, including those from `.env`
pub fn initialize() -> Result<SearchClient, InfrastructureError> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();
    tracing::info!(environment = %environment, "Initializing subscriber search client...");

    let config = ClientConfig::load(Some(&environment.config_file()))?;
    create_search_service(&config)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<vc_shared::ConfigError> for InfrastructureError {
    fn from(error: vc_shared::ConfigError) -> Self {
        InfrastructureError::Config(error.to_string())
    }
}
