//! ES256 compact JWS verification with ECDSA P-256

use crate::{
    compact::{decode_header, decode_segment, reject_critical, split_segments},
    error::{JoseError, JoseResult},
    keys::PublicKey,
    types::{JwsHeader, ES256},
};
use p256::ecdsa::{signature::Verifier, Signature};

/// Verify a compact JWS and return its payload
///
/// # Errors
/// `MalformedToken` when the token cannot be decoded, `InvalidSignature` when
/// it decodes but does not verify with `public_key`.
pub fn verify(public_key: &PublicKey, token: &str) -> JoseResult<Vec<u8>> {
    verify_with_header(public_key, token).map(|(_, payload)| payload)
}

/// Verify a compact JWS and return the protected header with the payload
///
/// # Errors
/// Same as [`verify`].
pub fn verify_with_header(public_key: &PublicKey, token: &str) -> JoseResult<(JwsHeader, Vec<u8>)> {
    let [header_b64, payload_b64, signature_b64] = split_segments::<3>(token)?;

    let header: JwsHeader = decode_header(header_b64)?;
    reject_critical(header.crit.as_ref())?;
    let payload = decode_segment(payload_b64, "payload")?;
    let signature_bytes = decode_segment(signature_b64, "signature")?;

    if header.alg != ES256 {
        tracing::warn!(alg = %header.alg, "refusing JWS with unexpected algorithm");
        return Err(JoseError::InvalidSignature);
    }

    // Wrong length or out-of-range r / s cannot verify
    let signature =
        Signature::from_slice(&signature_bytes).map_err(|_| JoseError::InvalidSignature)?;

    // Signing input is the segments exactly as received
    let signing_input_len = header_b64.len() + 1 + payload_b64.len();
    public_key
        .verifying_key()
        .verify(token[..signing_input_len].as_bytes(), &signature)
        .map_err(|_| JoseError::InvalidSignature)?;

    tracing::debug!(payload_len = payload.len(), "verified ES256 JWS");
    Ok((header, payload))
}

/// Decode the protected header without verifying the signature
///
/// Meant for choosing a key by `kid` / `jku` before calling [`verify`].
///
/// # Errors
/// `MalformedToken` if the token or its header cannot be decoded.
pub fn peek_header(token: &str) -> JoseResult<JwsHeader> {
    let [header_b64, _, _] = split_segments::<3>(token)?;
    decode_header(header_b64)
}
