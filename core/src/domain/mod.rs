//! Domain layer containing the records exchanged with the backend.

pub mod entities;

pub use entities::*;
