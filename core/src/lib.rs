//! # VideoCall Core
//!
//! Core layer of the subscriber search client: the user record returned by
//! the backend, search error types, the HTTP transport and callback traits,
//! and the search service that owns the single in-flight request.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
