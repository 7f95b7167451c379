//! The four bridge operations over UTF-8 strings
//!
//! Each call parses its key, performs one transform and returns. Nothing is
//! cached between calls.

use crate::{
    config::JoseConfig,
    error::{JoseError, JoseResult},
    jwe, jws,
    keys::{parse_private_key, parse_public_key},
    types::{JweHeader, JwsHeader, VerifyingKeyDescriptor, A256GCM, ES256},
};
use jose_common::LoggingTransformer;

/// Encrypt `plaintext` to the recipient's public key
///
/// # Errors
/// `InvalidPublicKeyPem` if the key does not parse.
pub fn encrypt(config: &JoseConfig, public_key_pem: &str, plaintext: &str) -> JoseResult<String> {
    logged("encrypt", A256GCM, || {
        let public_key = with_key_log("encrypt", public_key_pem, parse_public_key)?;
        let template = JweHeader::ecdh_es_a256gcm()
            .with_type(config.token_type.clone())
            .with_deflate(config.compress_encrypted_payloads);
        jwe::encrypt_with_header(&public_key, plaintext.as_bytes(), &template)
    })
}

/// Decrypt a compact JWE with the recipient's private key
///
/// # Errors
/// `InvalidPrivateKeyPem`, `MalformedToken` or `DecryptionFailed`. A payload
/// that is not UTF-8 is reported as `MalformedToken`.
pub fn decrypt(private_key_pem: &str, token: &str) -> JoseResult<String> {
    logged("decrypt", A256GCM, || {
        let private_key = with_key_log("decrypt", private_key_pem, parse_private_key)?;
        let payload = jwe::decrypt(&private_key, token.trim())?;
        into_text(payload)
    })
}

/// Sign `payload`, optionally naming the verifying key
///
/// A blank `verifying_key_descriptor` means no `jku` / `kid` header.
///
/// # Errors
/// `InvalidPrivateKeyPem` or `InvalidVerifyingKeyDescriptor`.
pub fn sign(
    config: &JoseConfig,
    private_key_pem: &str,
    payload: &str,
    verifying_key_descriptor: &str,
) -> JoseResult<String> {
    logged("sign", ES256, || {
        let private_key = with_key_log("sign", private_key_pem, parse_private_key)?;
        let descriptor = VerifyingKeyDescriptor::parse(verifying_key_descriptor)?;
        let header = JwsHeader::es256()
            .with_type(config.token_type.clone())
            .with_content_type(config.signed_content_type.clone())
            .with_descriptor(descriptor.as_ref());
        jws::sign_with_header(&private_key, payload.as_bytes(), &header)
    })
}

/// Verify a compact JWS and return its payload
///
/// No payload is returned unless the signature verifies.
///
/// # Errors
/// `InvalidPublicKeyPem`, `MalformedToken` or `InvalidSignature`.
pub fn verify(public_key_pem: &str, token: &str) -> JoseResult<String> {
    logged("verify", ES256, || {
        let public_key = with_key_log("verify", public_key_pem, parse_public_key)?;
        let payload = jws::verify(&public_key, token.trim())?;
        into_text(payload)
    })
}

fn logged<T>(operation: &str, algorithm: &str, run: impl FnOnce() -> JoseResult<T>) -> JoseResult<T> {
    run().map_err(|e| {
        LoggingTransformer::log_jose_failure(operation, algorithm, e.kind());
        e
    })
}

fn with_key_log<K>(
    operation: &str,
    pem: &str,
    parse: impl FnOnce(&str) -> JoseResult<K>,
) -> JoseResult<K> {
    let parsed = parse(pem);
    LoggingTransformer::log_key_operation(operation, pem, parsed.is_ok());
    parsed
}

fn into_text(payload: Vec<u8>) -> JoseResult<String> {
    String::from_utf8(payload).map_err(|_| JoseError::malformed("payload is not valid UTF-8"))
}
