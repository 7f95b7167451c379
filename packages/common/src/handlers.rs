//! Default handler functions for result processing
//!
//! These provide the `on_result` and `on_error` symbols the bridge uses when a
//! host does not install its own handling.

/// Default result handler that logs successful operations and passes through results
pub fn on_result<T>(result: T) -> T {
    tracing::debug!("Operation completed successfully");
    result
}

/// Default error handler that logs errors before passing them through
pub fn on_error<T: std::fmt::Display>(error: T) -> T {
    tracing::warn!("Operation rejected: {error}");
    error
}
