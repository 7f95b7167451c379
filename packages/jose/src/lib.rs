//! PEM-keyed JOSE tokens for native hosts
//!
//! This crate provides:
//! - P-256 key loading from PKCS#8 and SubjectPublicKeyInfo PEM
//! - ES256 compact JWS signing and verification
//! - ECDH-ES / A256GCM compact JWE encryption and decryption
//! - An async bridge exposing encrypt, decrypt, sign and verify to a host

pub mod api;
pub(crate) mod compact;
pub mod config;
pub(crate) mod crypto;
mod error;
pub mod futures;
pub mod keys;
pub mod types;

/// Compact JWS (ES256)
pub mod jws {
    pub use crate::crypto::es256_signing::{sign, sign_with_header};
    pub use crate::crypto::es256_verification::{peek_header, verify, verify_with_header};
}

/// Compact JWE (ECDH-ES / A256GCM)
pub mod jwe {
    pub use crate::crypto::ecdh_es_decryption::{decrypt, decrypt_with_header};
    pub use crate::crypto::ecdh_es_encryption::{encrypt, encrypt_with_header};
}

pub use api::{JoseBridge, Promise, Rejection};
pub use config::JoseConfig;
pub use error::*;
pub use futures::JoseOperation;
pub use keys::{parse_private_key, parse_public_key, PrivateKey, PublicKey};
pub use types::{JweHeader, JwsHeader, VerifyingKeyDescriptor};
