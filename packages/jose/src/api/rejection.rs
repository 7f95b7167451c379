//! Rejection payloads and the promise convention of callback hosts

use crate::error::JoseError;
use thiserror::Error;

/// What a host receives when an operation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct Rejection {
    /// Failure kind, e.g. `"InvalidSignature"`
    pub code: &'static str,
    /// Human-readable description
    pub message: String,
}

impl From<JoseError> for Rejection {
    fn from(error: JoseError) -> Self {
        Self {
            code: error.kind(),
            message: error.to_string(),
        }
    }
}

/// One-shot completion handle of a callback-style host
///
/// Exactly one of the two methods is called per operation.
pub trait Promise: Send {
    /// Deliver the token or payload
    fn resolve(self, value: String);

    /// Deliver the failure
    fn reject(self, code: &str, message: &str);
}
