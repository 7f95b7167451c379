//! Error types for JOSE operations

use thiserror::Error;

/// JOSE operation result type
pub type JoseResult<T> = Result<T, JoseError>;

/// Every way a bridge operation can fail
///
/// All variants are terminal for the call that produced them. Nothing is
/// retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoseError {
    /// PEM text is not a PKCS#8 P-256 private key
    #[error("Invalid Private Key PEM: {0}")]
    InvalidPrivateKeyPem(String),

    /// PEM text is not a SubjectPublicKeyInfo P-256 public key
    #[error("Invalid Public Key PEM: {0}")]
    InvalidPublicKeyPem(String),

    /// Token structure or encoding is broken
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// JWS signature does not verify with the supplied key
    #[error("Invalid JWS Signature")]
    InvalidSignature,

    /// JWE could not be decrypted with the supplied key
    #[error("JWE decryption failed: {0}")]
    DecryptionFailed(String),

    /// Verifying-key descriptor JSON or its `jku` URI is invalid
    #[error("Invalid verifying key descriptor: {0}")]
    InvalidVerifyingKeyDescriptor(String),

    /// Bridge configuration could not be parsed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cryptographic backend failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Background task dropped before delivering a result
    #[error("Background task failed")]
    TaskFailed,
}

impl JoseError {
    /// Stable name of the failure kind, used as the rejection code
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            JoseError::InvalidPrivateKeyPem(_) => "InvalidPrivateKeyPem",
            JoseError::InvalidPublicKeyPem(_) => "InvalidPublicKeyPem",
            JoseError::MalformedToken(_) => "MalformedToken",
            JoseError::InvalidSignature => "InvalidSignature",
            JoseError::DecryptionFailed(_) => "DecryptionFailed",
            JoseError::InvalidVerifyingKeyDescriptor(_) => "InvalidVerifyingKeyDescriptor",
            JoseError::Configuration(_) => "Configuration",
            JoseError::Internal(_) => "Internal",
            JoseError::TaskFailed => "TaskFailed",
        }
    }

    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(msg: &str) -> Self {
        JoseError::MalformedToken(msg.to_string())
    }

    /// Create a decryption failure
    #[inline]
    #[must_use]
    pub fn decryption_failed(msg: &str) -> Self {
        JoseError::DecryptionFailed(msg.to_string())
    }

    /// Create an invalid descriptor error
    #[inline]
    #[must_use]
    pub fn invalid_descriptor(msg: &str) -> Self {
        JoseError::InvalidVerifyingKeyDescriptor(msg.to_string())
    }

    /// Create an internal error
    #[inline]
    #[must_use]
    pub fn internal(msg: &str) -> Self {
        JoseError::Internal(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_match_variants() {
        assert_eq!(JoseError::InvalidSignature.kind(), "InvalidSignature");
        assert_eq!(JoseError::malformed("x").kind(), "MalformedToken");
        assert_eq!(
            JoseError::InvalidPrivateKeyPem(String::new()).kind(),
            "InvalidPrivateKeyPem"
        );
    }

    #[test]
    fn display_carries_the_message() {
        let err = JoseError::decryption_failed("authentication tag mismatch");
        assert_eq!(
            err.to_string(),
            "JWE decryption failed: authentication tag mismatch"
        );
        assert_eq!(JoseError::InvalidSignature.to_string(), "Invalid JWS Signature");
    }
}
