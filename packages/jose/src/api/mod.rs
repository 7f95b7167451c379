//! Host-facing API
//!
//! `operations` holds the four synchronous calls; `JoseBridge` adapts them to
//! an async result convention.

pub mod bridge;
pub mod operations;
pub mod rejection;

pub use bridge::JoseBridge;
pub use rejection::{Promise, Rejection};
