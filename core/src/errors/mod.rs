//! Error types for subscriber search.

mod types;


pub use types::{SearchError, TransportError};
pub use vc_shared::{CODE_OK, ERROR_CODE_UNKNOWN};

pub type SearchResult<T> = Result<T, SearchError>;
