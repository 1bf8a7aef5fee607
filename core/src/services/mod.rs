//! Client-side services of the video call backend.

pub mod search;

// Re-export commonly used types
pub use search::{
    HttpTransport, PendingSearch, SearchCallback, SubscriberSearchService, TransportResponse,
};
