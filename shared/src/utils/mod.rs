//! Common utility functions

pub mod phone;

pub use phone::{looks_like_phone_number, mask_phone_number};
