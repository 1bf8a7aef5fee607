//! reqwest-backed HTTP transport
//!
//! Posts JSON bodies with a shared `reqwest::Client` and hands back every
//! HTTP response, whatever its status. Connection pooling and timeouts are
//! the client's defaults; none are configured here.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use vc_core::errors::TransportError;
use vc_core::services::search::{HttpTransport, RequestBody, TransportResponse};

use crate::InfrastructureError;

/// Async HTTP transport built on reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default reqwest client
    pub fn new() -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }

    /// Create a transport from a preconfigured client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &str,
        body: RequestBody,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, body.content_type())
            .body(body.into_bytes())
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!(status = status, length = bytes.len(), "Received search response");
        Ok(TransportResponse::new(status, bytes.to_vec()))
    }
}

fn map_send_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Request(error.to_string())
    }
}
