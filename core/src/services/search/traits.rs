//! Traits for transport and callback integration

use async_trait::async_trait;

use crate::domain::entities::UserRecord;
use crate::errors::TransportError;

use super::request::RequestBody;
use super::types::TransportResponse;

/// Trait for the HTTP transport used to reach the backend
///
/// Implementations return every HTTP response they receive, whatever its
/// status; only failures to obtain a response are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST a JSON body to `url`
    async fn post_json(&self, url: &str, body: RequestBody) -> Result<TransportResponse, TransportError>;
}

/// Receiver of a search outcome
pub trait SearchCallback: Send + Sync {
    /// The backend answered with the OK code and a subscriber record
    fn on_success(&self, record: UserRecord);
    /// Any other outcome: the server's code, or `ERROR_CODE_UNKNOWN`
    fn on_fail(&self, code: i32);
}
