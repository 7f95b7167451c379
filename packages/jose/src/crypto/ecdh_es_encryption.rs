//! ECDH-ES + A256GCM compact JWE encryption

use super::concat_kdf;
use crate::{
    compact::{encode_header, encode_segment},
    error::{JoseError, JoseResult},
    keys::PublicKey,
    types::{JweHeader, A256GCM, DEFLATE, ECDH_ES},
};
use aes_gcm::{
    aead::{Aead, Payload},
    Aes256Gcm, KeyInit, Nonce,
};
use flate2::{write::DeflateEncoder, Compression};
use p256::ecdh::EphemeralSecret;
use rand::{rngs::OsRng, RngCore};
use std::io::Write;

pub(crate) const CEK_LEN: usize = 32;
pub(crate) const IV_LEN: usize = 12;
pub(crate) const TAG_LEN: usize = 16;

/// Encrypt payload bytes to `public_key` as a compact JWE
///
/// # Errors
/// Returns `Internal` only if the AEAD backend fails.
pub fn encrypt(public_key: &PublicKey, payload: &[u8]) -> JoseResult<String> {
    encrypt_with_header(public_key, payload, &JweHeader::ecdh_es_a256gcm())
}

/// Encrypt with a caller-built header template
///
/// `alg`, `enc` and `epk` are always overwritten and `crit` is dropped.
/// `typ`, `apu`, `apv` and `zip` are honoured.
///
/// # Errors
/// `MalformedToken` if the template's `apu` / `apv` are not base64url or its
/// `zip` is unsupported; `Internal` if the AEAD backend fails.
pub fn encrypt_with_header(
    public_key: &PublicKey,
    payload: &[u8],
    template: &JweHeader,
) -> JoseResult<String> {
    // Fresh ephemeral key for every token
    let ephemeral = EphemeralSecret::random(&mut OsRng);

    let mut header = template.clone();
    header.alg = ECDH_ES.to_string();
    header.enc = A256GCM.to_string();
    header.epk = Some(ephemeral.public_key().to_jwk());
    header.crit = None;

    let apu = party_info(header.apu.as_deref(), "apu")?;
    let apv = party_info(header.apv.as_deref(), "apv")?;

    let shared = ephemeral.diffie_hellman(public_key.as_p256());
    let cek = concat_kdf::derive_key(shared.raw_secret_bytes(), A256GCM, &apu, &apv, CEK_LEN);

    let plaintext = match header.zip.as_deref() {
        None => payload.to_vec(),
        Some(DEFLATE) => deflate(payload)?,
        Some(other) => {
            return Err(JoseError::MalformedToken(format!(
                "unsupported zip algorithm: {other}"
            )))
        }
    };

    let header_b64 = encode_header(&header)?;

    let mut iv = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut iv);

    let cipher = Aes256Gcm::new_from_slice(&cek)
        .map_err(|e| JoseError::Internal(format!("invalid content encryption key: {e}")))?;
    let mut sealed = cipher
        .encrypt(
            Nonce::from_slice(&iv),
            Payload {
                msg: &plaintext,
                aad: header_b64.as_bytes(),
            },
        )
        .map_err(|e| JoseError::Internal(format!("A256GCM encryption failed: {e}")))?;

    // aes-gcm appends the tag to the ciphertext
    let tag = sealed.split_off(sealed.len() - TAG_LEN);

    let iv_b64 = encode_segment(&iv);
    let ciphertext_b64 = encode_segment(&sealed);
    let tag_b64 = encode_segment(&tag);
    // Direct key agreement leaves the encrypted key segment empty
    let jwe = [
        header_b64.as_str(),
        "",
        iv_b64.as_str(),
        ciphertext_b64.as_str(),
        tag_b64.as_str(),
    ]
    .join(".");

    tracing::debug!(
        payload_len = payload.len(),
        compressed = header.zip.is_some(),
        "encrypted ECDH-ES/A256GCM JWE"
    );
    Ok(jwe)
}

/// Decode optional `apu` / `apv` header values
pub(crate) fn party_info(value: Option<&str>, name: &str) -> JoseResult<Vec<u8>> {
    match value {
        Some(encoded) => crate::compact::decode_segment(encoded, name),
        None => Ok(Vec::new()),
    }
}

fn deflate(payload: &[u8]) -> JoseResult<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(payload)
        .and_then(|()| encoder.finish())
        .map_err(|e| JoseError::Internal(format!("DEFLATE compression failed: {e}")))
}
