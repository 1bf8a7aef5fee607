//! Subscriber search by phone number
//!
//! This module provides the client side of the video call backend's
//! subscriber lookup:
//! - Request body construction (`{"mobile": "<phone>"}`)
//! - Asynchronous submission through a pluggable HTTP transport
//! - Cancel-then-replace handling of the single in-flight search
//! - Outcome delivery as a future or through a callback

mod request;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use request::{build_search_body, RequestBody, SearchRequest, JSON_CONTENT_TYPE, PHONE_FIELD};
pub use service::SubscriberSearchService;
pub use traits::{HttpTransport, SearchCallback};
pub use types::{PendingSearch, TransportResponse};
