//! Type definitions shared across the workspace

pub mod response;

pub use response::{ResponseEnvelope, CODE_OK, ERROR_CODE_UNKNOWN};
