//! PEM key loading for P-256
//!
//! Private keys must arrive as PKCS#8 `PRIVATE KEY` blocks and public keys as
//! SubjectPublicKeyInfo `PUBLIC KEY` blocks. Keys are parsed per request and
//! never cached.

use crate::error::{JoseError, JoseResult};
use p256::{
    ecdsa::{SigningKey, VerifyingKey},
    pkcs8::{der::pem, DecodePrivateKey, DecodePublicKey},
};
use std::fmt;

const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// P-256 private key, usable only for signing and decrypting
#[derive(Clone)]
pub struct PrivateKey {
    secret: p256::SecretKey,
}

impl PrivateKey {
    /// Parse a PKCS#8 PEM private key
    ///
    /// # Errors
    /// Returns `InvalidPrivateKeyPem` for anything but a P-256 PKCS#8 key.
    pub fn from_pem(pem: &str) -> JoseResult<Self> {
        let pem = pem.trim();
        check_label(pem, PRIVATE_KEY_LABEL).map_err(JoseError::InvalidPrivateKeyPem)?;
        let secret = p256::SecretKey::from_pkcs8_pem(pem)
            .map_err(|e| JoseError::InvalidPrivateKeyPem(e.to_string()))?;
        Ok(Self { secret })
    }

    /// The public key matching this private key
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.secret.public_key(),
        }
    }

    pub(crate) fn signing_key(&self) -> SigningKey {
        SigningKey::from(&self.secret)
    }

    pub(crate) fn secret(&self) -> &p256::SecretKey {
        &self.secret
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("curve", &"P-256")
            .finish_non_exhaustive()
    }
}

/// P-256 public key, usable only for verifying and encrypting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    inner: p256::PublicKey,
}

impl PublicKey {
    /// Parse a SubjectPublicKeyInfo PEM public key
    ///
    /// # Errors
    /// Returns `InvalidPublicKeyPem` for anything but a P-256 SPKI key.
    pub fn from_pem(pem: &str) -> JoseResult<Self> {
        let pem = pem.trim();
        check_label(pem, PUBLIC_KEY_LABEL).map_err(JoseError::InvalidPublicKeyPem)?;
        let inner = p256::PublicKey::from_public_key_pem(pem)
            .map_err(|e| JoseError::InvalidPublicKeyPem(e.to_string()))?;
        Ok(Self { inner })
    }

    pub(crate) fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey::from(&self.inner)
    }

    pub(crate) fn as_p256(&self) -> &p256::PublicKey {
        &self.inner
    }
}

/// Parse a PKCS#8 PEM private key
///
/// # Errors
/// Returns `InvalidPrivateKeyPem` if the text is not a P-256 PKCS#8 key.
pub fn parse_private_key(pem: &str) -> JoseResult<PrivateKey> {
    PrivateKey::from_pem(pem)
}

/// Parse a SubjectPublicKeyInfo PEM public key
///
/// # Errors
/// Returns `InvalidPublicKeyPem` if the text is not a P-256 SPKI key.
pub fn parse_public_key(pem: &str) -> JoseResult<PublicKey> {
    PublicKey::from_pem(pem)
}

// Reports the label actually found so a swapped key is easy to spot
fn check_label(pem: &str, expected: &str) -> Result<(), String> {
    match pem::decode_label(pem.as_bytes()) {
        Ok(label) if label == expected => Ok(()),
        Ok(label) => Err(format!("expected {expected} block, found {label}")),
        Err(e) => Err(format!("unreadable PEM: {e}")),
    }
}
