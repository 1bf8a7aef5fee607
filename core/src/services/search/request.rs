//! Search request body construction

use serde::Serialize;

use crate::errors::{SearchError, SearchResult};

/// Name of the JSON field carrying the phone number
pub const PHONE_FIELD: &str = "mobile";

/// Content type of every search request
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Payload of a search request
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SearchRequest<'a> {
    #[serde(rename = "mobile")]
    pub phone_number: &'a str,
}

/// Serialized request body tagged with its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    content_type: &'static str,
    bytes: Vec<u8>,
}

impl RequestBody {
    /// Serialize `value` as a JSON body
    pub fn json<T: Serialize + ?Sized>(value: &T) -> SearchResult<Self> {
        let bytes =
            serde_json::to_vec(value).map_err(|e| SearchError::Serialization(e.to_string()))?;
        Ok(Self {
            content_type: JSON_CONTENT_TYPE,
            bytes,
        })
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Build the body for a search by phone number.
///
/// The phone number is forwarded verbatim: no trimming, validation or
/// normalization happens here.
pub fn build_search_body(phone_number: &str) -> SearchResult<RequestBody> {
    RequestBody::json(&SearchRequest { phone_number })
}
