//! Structured logging infrastructure
//!
//! Provides env_logger-based logging with secure handling of key material
//! and proper integration with the standard log crate.

use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at host startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Enable info and above
    /// - `RUST_LOG=jose_bridge=debug` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Use this in test modules to avoid initialization conflicts
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a rejected JOSE operation
    ///
    /// Only the operation, algorithm and failure kind are recorded, never the
    /// token, payload or key.
    pub fn log_jose_failure(operation: &str, algorithm: &str, kind: &str) {
        warn!("JOSE operation rejected: {operation} (alg: {algorithm}, kind: {kind})");
    }

    /// Log key usage, identifying the PEM input by fingerprint only
    pub fn log_key_operation(operation: &str, key_pem: &str, success: bool) {
        let fingerprint = Self::key_fingerprint(key_pem);
        if success {
            debug!("Key accepted for {operation} (key: {fingerprint})");
        } else {
            warn!("Key rejected for {operation} (key: {fingerprint})");
        }
    }

    /// Truncated SHA-256 fingerprint of key text, safe to log
    ///
    /// Returns `#` followed by the first 12 hex characters of the digest.
    #[must_use]
    pub fn key_fingerprint(key_pem: &str) -> String {
        let hash = Sha256::digest(key_pem.trim().as_bytes());
        let hex_hash = format!("{hash:x}");
        format!("#{}", &hex_hash[..12])
    }
}
