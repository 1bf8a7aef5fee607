//! Response envelope returned by the video call backend

use serde::{Deserialize, Serialize};

/// Envelope code the backend uses for a successful call
pub const CODE_OK: i32 = 200;

/// Code reported when no envelope could be obtained (transport failure,
/// undecodable body, request never sent)
pub const ERROR_CODE_UNKNOWN: i32 = -1;

/// Standard backend response wrapper: `{ "code": 200, "data": {...} }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    /// Application status code; only [`CODE_OK`] means success
    pub code: i32,

    /// Response payload; a success may still omit it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Optional server message
    #[serde(default, alias = "message", skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl<T> ResponseEnvelope<T> {
    /// Create a successful envelope
    pub fn ok(data: T) -> Self {
        Self {
            code: CODE_OK,
            data: Some(data),
            msg: None,
        }
    }

    /// Create an error envelope carrying only a code
    pub fn error(code: i32) -> Self {
        Self {
            code,
            data: None,
            msg: None,
        }
    }

    /// Attach a server message
    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }

    /// Check whether the envelope reports success
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }

    /// Extract the data, consuming the envelope
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
