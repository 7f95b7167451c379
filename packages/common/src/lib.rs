//! Common infrastructure for the JOSE bridge workspace
//!
//! This crate provides shared functionality used by the bridge crates:
//! - Process-level logging setup with secure handling of key material
//! - Default result and error handlers

pub mod error;
pub mod handlers;

pub use error::LoggingTransformer;
pub use handlers::{on_error, on_result};
