//! HTTP transport module
//!
//! Concrete implementations of the core `HttpTransport` trait.

pub mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;
