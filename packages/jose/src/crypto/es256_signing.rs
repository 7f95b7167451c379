//! ES256 compact JWS signing with ECDSA P-256

use crate::{
    compact::{encode_header, encode_segment},
    error::{JoseError, JoseResult},
    keys::PrivateKey,
    types::{JwsHeader, VerifyingKeyDescriptor, ES256},
};
use p256::ecdsa::{signature::Signer, Signature};

/// Sign opaque payload bytes into a compact JWS
///
/// When a descriptor is given its `jku` and `kid` are copied into the header.
///
/// # Errors
/// Returns `Internal` only if the ECDSA backend fails.
pub fn sign(
    private_key: &PrivateKey,
    payload: &[u8],
    descriptor: Option<&VerifyingKeyDescriptor>,
) -> JoseResult<String> {
    let header = JwsHeader::es256().with_descriptor(descriptor);
    sign_with_header(private_key, payload, &header)
}

/// Sign with a caller-built header; `alg` is always ES256 and `crit` is dropped
///
/// # Errors
/// Returns `Internal` only if the ECDSA backend fails.
pub fn sign_with_header(
    private_key: &PrivateKey,
    payload: &[u8],
    header: &JwsHeader,
) -> JoseResult<String> {
    let mut header = header.clone();
    header.alg = ES256.to_string();
    // No extensions are implemented, and verify refuses any `crit`
    header.crit = None;

    let header_b64 = encode_header(&header)?;
    let payload_b64 = encode_segment(payload);

    let mut signing_input = String::with_capacity(header_b64.len() + 1 + payload_b64.len());
    signing_input.push_str(&header_b64);
    signing_input.push('.');
    signing_input.push_str(&payload_b64);

    let signature: Signature = private_key
        .signing_key()
        .try_sign(signing_input.as_bytes())
        .map_err(|e| JoseError::Internal(format!("ES256 signing failed: {e}")))?;

    // JOSE wants fixed-length r || s, not DER
    let signature_b64 = encode_segment(&signature.to_bytes());

    let mut jws = String::with_capacity(signing_input.len() + 1 + signature_b64.len());
    jws.push_str(&signing_input);
    jws.push('.');
    jws.push_str(&signature_b64);

    tracing::debug!(
        kid = header.kid.as_deref().unwrap_or("-"),
        payload_len = payload.len(),
        "signed ES256 JWS"
    );
    Ok(jws)
}
