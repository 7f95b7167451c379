//! Shared fixtures and helpers for integration tests

#![allow(dead_code)]

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use p256::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};

pub const SIGNER_PRIVATE_PEM: &str = include_str!("../fixtures/signer_private.pem");
pub const SIGNER_PUBLIC_PEM: &str = include_str!("../fixtures/signer_public.pem");
pub const OTHER_PRIVATE_PEM: &str = include_str!("../fixtures/other_private.pem");
pub const OTHER_PUBLIC_PEM: &str = include_str!("../fixtures/other_public.pem");
pub const P384_PRIVATE_PEM: &str = include_str!("../fixtures/p384_private.pem");
pub const P384_PUBLIC_PEM: &str = include_str!("../fixtures/p384_public.pem");
pub const SEC1_PRIVATE_PEM: &str = include_str!("../fixtures/sec1_private.pem");
pub const CERTIFICATE_PEM: &str = include_str!("../fixtures/certificate.pem");

/// ES256 JWS over `{"greeting":"hello from python"}` with `kid: py-1`,
/// signed by an independent implementation with the signer key
pub const EXTERNAL_JWS: &str = include_str!("../fixtures/external_signed.jws");
/// JWE to the signer key from an independent implementation, payload `interop payload ✓`
pub const EXTERNAL_JWE: &str = include_str!("../fixtures/external_encrypted.jwe");
/// Same, with `apu: Alice` / `apv: Bob`, payload `party info`
pub const EXTERNAL_PARTY_INFO_JWE: &str = include_str!("../fixtures/external_party_info.jwe");
/// Same, with `zip: DEF`, payload `"compressed "` repeated 20 times
pub const EXTERNAL_DEFLATED_JWE: &str = include_str!("../fixtures/external_deflated.jwe");

/// Freshly generated P-256 pair as (private PKCS#8 PEM, public SPKI PEM)
pub fn fresh_key_pair() -> (String, String) {
    let secret = p256::SecretKey::random(&mut rand::rngs::OsRng);
    let private_pem = secret
        .to_pkcs8_pem(LineEnding::LF)
        .expect("PKCS#8 encoding")
        .to_string();
    let public_pem = secret
        .public_key()
        .to_public_key_pem(LineEnding::LF)
        .expect("SPKI encoding");
    (private_pem, public_pem)
}

pub fn segments(token: &str) -> Vec<String> {
    token.split('.').map(str::to_string).collect()
}

pub fn decode(segment: &str) -> Vec<u8> {
    URL_SAFE_NO_PAD.decode(segment).expect("base64url segment")
}

pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Flip one bit of the decoded bytes of segment `index`, keeping the encoding valid
pub fn tamper(token: &str, index: usize, byte: usize) -> String {
    let mut parts = segments(token);
    let mut bytes = decode(&parts[index]);
    let position = byte % bytes.len();
    bytes[position] ^= 0x01;
    parts[index] = encode(&bytes);
    parts.join(".")
}

pub fn header_json(token: &str) -> serde_json::Value {
    serde_json::from_slice(&decode(&segments(token)[0])).expect("header JSON")
}
