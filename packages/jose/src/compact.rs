//! Compact serialization helpers shared by the JWS and JWE codecs

use crate::error::{JoseError, JoseResult};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{de::DeserializeOwned, Serialize};

/// base64url without padding
pub(crate) fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode one segment, naming it in the error
pub(crate) fn decode_segment(segment: &str, name: &str) -> JoseResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| JoseError::MalformedToken(format!("{name} is not valid base64url: {e}")))
}

/// Split a compact token into exactly `N` segments
pub(crate) fn split_segments<const N: usize>(token: &str) -> JoseResult<[&str; N]> {
    let mut segments = [""; N];
    let mut parts = token.split('.');
    for slot in &mut segments {
        *slot = parts.next().ok_or_else(|| segment_count_error::<N>(token))?;
    }
    if parts.next().is_some() {
        return Err(segment_count_error::<N>(token));
    }
    Ok(segments)
}

fn segment_count_error<const N: usize>(token: &str) -> JoseError {
    let found = token.split('.').count();
    JoseError::MalformedToken(format!("expected {N} segments, found {found}"))
}

pub(crate) fn encode_header<H: Serialize>(header: &H) -> JoseResult<String> {
    let json = serde_json::to_vec(header)
        .map_err(|e| JoseError::Internal(format!("header serialization failed: {e}")))?;
    Ok(encode_segment(&json))
}

pub(crate) fn decode_header<H: DeserializeOwned>(segment: &str) -> JoseResult<H> {
    let json = decode_segment(segment, "header")?;
    serde_json::from_slice(&json)
        .map_err(|e| JoseError::MalformedToken(format!("header is not valid JSON: {e}")))
}

/// No critical header extensions are understood
pub(crate) fn reject_critical(crit: Option<&Vec<String>>) -> JoseResult<()> {
    match crit {
        Some(names) => Err(JoseError::MalformedToken(format!(
            "unsupported critical header parameters: {}",
            names.join(", ")
        ))),
        None => Ok(()),
    }
}
