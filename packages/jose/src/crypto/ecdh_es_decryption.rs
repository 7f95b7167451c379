//! ECDH-ES + A256GCM compact JWE decryption

use super::{
    concat_kdf,
    ecdh_es_encryption::{party_info, CEK_LEN, IV_LEN, TAG_LEN},
};
use crate::{
    compact::{decode_header, decode_segment, reject_critical, split_segments},
    error::{JoseError, JoseResult},
    keys::PrivateKey,
    types::{JweHeader, A256GCM, DEFLATE, ECDH_ES},
};
use aes_gcm::{
    aead::{Aead, Payload},
    Aes256Gcm, KeyInit, Nonce,
};
use flate2::read::DeflateDecoder;
use std::io::Read;

/// Upper bound on an inflated `zip: DEF` payload
const MAX_INFLATED_LEN: u64 = 16 * 1024 * 1024;

/// Decrypt a compact JWE and return its payload
///
/// # Errors
/// `MalformedToken` for structural problems, `DecryptionFailed` when the tag
/// does not verify (tampered token or wrong key) or the algorithms are not
/// ECDH-ES / A256GCM.
pub fn decrypt(private_key: &PrivateKey, token: &str) -> JoseResult<Vec<u8>> {
    decrypt_with_header(private_key, token).map(|(_, payload)| payload)
}

/// Decrypt a compact JWE and return the protected header with the payload
///
/// # Errors
/// Same as [`decrypt`].
pub fn decrypt_with_header(
    private_key: &PrivateKey,
    token: &str,
) -> JoseResult<(JweHeader, Vec<u8>)> {
    let [header_b64, encrypted_key_b64, iv_b64, ciphertext_b64, tag_b64] =
        split_segments::<5>(token)?;

    let header: JweHeader = decode_header(header_b64)?;
    reject_critical(header.crit.as_ref())?;

    if !encrypted_key_b64.is_empty() {
        return Err(JoseError::malformed(
            "encrypted key must be empty for direct key agreement",
        ));
    }

    let iv = decode_segment(iv_b64, "initialization vector")?;
    if iv.len() != IV_LEN {
        return Err(JoseError::MalformedToken(format!(
            "initialization vector must be {IV_LEN} bytes, found {}",
            iv.len()
        )));
    }
    let ciphertext = decode_segment(ciphertext_b64, "ciphertext")?;
    let tag = decode_segment(tag_b64, "authentication tag")?;
    if tag.len() != TAG_LEN {
        return Err(JoseError::MalformedToken(format!(
            "authentication tag must be {TAG_LEN} bytes, found {}",
            tag.len()
        )));
    }

    let epk = header
        .epk
        .as_ref()
        .ok_or_else(|| JoseError::malformed("missing ephemeral public key (epk)"))?;
    let ephemeral_public = p256::PublicKey::from_jwk(epk).map_err(|_| {
        JoseError::malformed("ephemeral public key (epk) is not a P-256 point")
    })?;
    let apu = party_info(header.apu.as_deref(), "apu")?;
    let apv = party_info(header.apv.as_deref(), "apv")?;

    if header.alg != ECDH_ES || header.enc != A256GCM {
        tracing::warn!(alg = %header.alg, enc = %header.enc, "refusing JWE with unexpected algorithms");
        return Err(JoseError::DecryptionFailed(format!(
            "unsupported algorithms: alg={}, enc={}",
            header.alg, header.enc
        )));
    }

    let shared = p256::ecdh::diffie_hellman(
        private_key.secret().to_nonzero_scalar(),
        ephemeral_public.as_affine(),
    );
    let cek = concat_kdf::derive_key(shared.raw_secret_bytes(), A256GCM, &apu, &apv, CEK_LEN);

    let cipher = Aes256Gcm::new_from_slice(&cek)
        .map_err(|e| JoseError::Internal(format!("invalid content encryption key: {e}")))?;

    let mut sealed = ciphertext;
    sealed.extend_from_slice(&tag);

    // AAD is the header segment exactly as received
    let plaintext = cipher
        .decrypt(
            Nonce::from_slice(&iv),
            Payload {
                msg: &sealed,
                aad: header_b64.as_bytes(),
            },
        )
        .map_err(|_| JoseError::decryption_failed("authentication tag mismatch"))?;

    let payload = match header.zip.as_deref() {
        None => plaintext,
        Some(DEFLATE) => inflate(&plaintext)?,
        Some(other) => {
            return Err(JoseError::DecryptionFailed(format!(
                "unsupported zip algorithm: {other}"
            )))
        }
    };

    tracing::debug!(payload_len = payload.len(), "decrypted ECDH-ES/A256GCM JWE");
    Ok((header, payload))
}

fn inflate(compressed: &[u8]) -> JoseResult<Vec<u8>> {
    let mut inflated = Vec::new();
    DeflateDecoder::new(compressed)
        .take(MAX_INFLATED_LEN + 1)
        .read_to_end(&mut inflated)
        .map_err(|e| JoseError::DecryptionFailed(format!("DEFLATE payload is corrupt: {e}")))?;
    if inflated.len() as u64 > MAX_INFLATED_LEN {
        return Err(JoseError::decryption_failed(
            "inflated payload exceeds the size limit",
        ));
    }
    Ok(inflated)
}
