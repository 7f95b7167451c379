//! JOSE header and descriptor types

use crate::error::{JoseError, JoseResult};
use p256::elliptic_curve::JwkEcKey;
use serde::{Deserialize, Serialize};

/// JWS algorithm identifier for ECDSA P-256 / SHA-256
pub const ES256: &str = "ES256";
/// JWE key management identifier for direct ephemeral-static agreement
pub const ECDH_ES: &str = "ECDH-ES";
/// JWE content encryption identifier for AES-256-GCM
pub const A256GCM: &str = "A256GCM";
/// JWE `zip` value for raw DEFLATE
pub const DEFLATE: &str = "DEF";

/// JWS protected header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwsHeader {
    /// Signature algorithm; always `ES256` on produced tokens
    pub alg: String,
    /// Media type of the whole token, e.g. `JWT`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    /// Media type of the payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cty: Option<String>,
    /// URL of the JWK set holding the verifying key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jku: Option<String>,
    /// Identifier of the verifying key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Critical extensions; never produced, refused on input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crit: Option<Vec<String>>,
}

impl JwsHeader {
    /// Bare ES256 header with no optional fields
    #[must_use]
    pub fn es256() -> Self {
        Self {
            alg: ES256.to_string(),
            typ: None,
            cty: None,
            jku: None,
            kid: None,
            crit: None,
        }
    }

    /// Set or clear `typ`
    #[must_use]
    pub fn with_type(mut self, typ: Option<String>) -> Self {
        self.typ = typ;
        self
    }

    /// Set or clear `cty`
    #[must_use]
    pub fn with_content_type(mut self, cty: Option<String>) -> Self {
        self.cty = cty;
        self
    }

    /// Copy `jku` and `kid` from a verifying-key descriptor
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: Option<&VerifyingKeyDescriptor>) -> Self {
        if let Some(descriptor) = descriptor {
            self.jku = Some(descriptor.jku.clone());
            self.kid = Some(descriptor.kid.clone());
        }
        self
    }
}

/// JWE protected header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JweHeader {
    /// Key management algorithm; always `ECDH-ES` on produced tokens
    pub alg: String,
    /// Content encryption algorithm; always `A256GCM` on produced tokens
    pub enc: String,
    /// Media type of the whole token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    /// Compression applied before encryption (`DEF` or absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Agreement PartyUInfo, base64url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apu: Option<String>,
    /// Agreement PartyVInfo, base64url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apv: Option<String>,
    /// Ephemeral public key of the sender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epk: Option<JwkEcKey>,
    /// Critical extensions; never produced, refused on input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crit: Option<Vec<String>>,
}

impl JweHeader {
    /// ECDH-ES / A256GCM header template; `epk` is filled in per token
    #[must_use]
    pub fn ecdh_es_a256gcm() -> Self {
        Self {
            alg: ECDH_ES.to_string(),
            enc: A256GCM.to_string(),
            typ: None,
            zip: None,
            apu: None,
            apv: None,
            epk: None,
            crit: None,
        }
    }

    /// Set or clear `typ`
    #[must_use]
    pub fn with_type(mut self, typ: Option<String>) -> Self {
        self.typ = typ;
        self
    }

    /// Request DEFLATE compression of the plaintext before encryption
    #[must_use]
    pub fn with_deflate(mut self, enabled: bool) -> Self {
        self.zip = enabled.then(|| DEFLATE.to_string());
        self
    }
}

/// Advisory pointer to the key that verifies a signed token
///
/// `jku` is kept verbatim and never dereferenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyingKeyDescriptor {
    /// Absolute URI of the JWK set
    pub jku: String,
    /// Key identifier within that set
    pub kid: String,
}

impl VerifyingKeyDescriptor {
    /// Build a descriptor, checking that `jku` is an absolute URI
    ///
    /// # Errors
    /// Returns `InvalidVerifyingKeyDescriptor` if `jku` does not parse.
    pub fn new(jku: impl Into<String>, kid: impl Into<String>) -> JoseResult<Self> {
        let descriptor = Self {
            jku: jku.into(),
            kid: kid.into(),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Parse the host's descriptor JSON; blank input means no descriptor
    ///
    /// # Errors
    /// Returns `InvalidVerifyingKeyDescriptor` for bad JSON, missing or
    /// non-string fields, unknown fields, or an invalid `jku`.
    pub fn parse(json: &str) -> JoseResult<Option<Self>> {
        if json.trim().is_empty() {
            return Ok(None);
        }
        let descriptor: Self = serde_json::from_str(json)
            .map_err(|e| JoseError::invalid_descriptor(&e.to_string()))?;
        descriptor.validate()?;
        Ok(Some(descriptor))
    }

    fn validate(&self) -> JoseResult<()> {
        // The URL parser repairs what it can, so reject text it would rewrite
        check_uri_text(&self.jku).map_err(|reason| {
            JoseError::InvalidVerifyingKeyDescriptor(format!("jku is not a valid URI: {reason}"))
        })?;
        url::Url::parse(&self.jku).map_err(|e| {
            JoseError::InvalidVerifyingKeyDescriptor(format!("jku is not a valid URI: {e}"))
        })?;
        Ok(())
    }
}

/// Characters RFC 3986 never allows, and `%` without two hex digits
fn check_uri_text(uri: &str) -> Result<(), String> {
    let bytes = uri.as_bytes();
    for (index, c) in uri.char_indices() {
        if c.is_whitespace() || c.is_control() {
            return Err(format!("whitespace or control character at {index}"));
        }
        if matches!(c, '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}') {
            return Err(format!("illegal character {c:?} at {index}"));
        }
        if c == '%' {
            let escape = bytes.get(index + 1..index + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return Err(format!("malformed percent escape at {index}"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_descriptor_is_absent() {
        assert_eq!(VerifyingKeyDescriptor::parse("").unwrap(), None);
        assert_eq!(VerifyingKeyDescriptor::parse("  \n").unwrap(), None);
    }

    #[test]
    fn descriptor_parses_both_fields() {
        let parsed =
            VerifyingKeyDescriptor::parse(r#"{"jku":"https://example.com/keys","kid":"k1"}"#)
                .unwrap()
                .unwrap();
        assert_eq!(parsed.jku, "https://example.com/keys");
        assert_eq!(parsed.kid, "k1");
    }

    #[test]
    fn descriptor_rejections() {
        let cases = [
            "not json",
            r#"{"kid":"k1"}"#,
            r#"{"jku":"https://example.com/keys"}"#,
            r#"{"jku":"https://example.com/keys","kid":7}"#,
            r#"{"jku":"not a uri","kid":"k1"}"#,
            r#"{"jku":"https://example.com/a b","kid":"k1"}"#,
            r#"{"jku":" https://example.com/keys","kid":"k1"}"#,
            r#"{"jku":"https://example.com/keys\n","kid":"k1"}"#,
            r#"{"jku":"https://exa mple.com/","kid":"k1"}"#,
            r#"{"jku":"https://example.com/{kid}","kid":"k1"}"#,
            r#"{"jku":"https://example.com/%zz","kid":"k1"}"#,
            r#"{"jku":"https://example.com/%4","kid":"k1"}"#,
            r#"{"jku":"https://example.com/keys","kid":"k1","extra":true}"#,
        ];
        for case in cases {
            let err = VerifyingKeyDescriptor::parse(case).unwrap_err();
            assert_eq!(err.kind(), "InvalidVerifyingKeyDescriptor", "{case}");
        }
    }

    #[test]
    fn well_formed_uris_are_kept_verbatim() {
        for jku in [
            "https://example.com",
            "HTTPS://Example.com/keys?set=a&v=%2F#frag",
            "urn:example:jwks",
        ] {
            let descriptor = VerifyingKeyDescriptor::new(jku, "k1").unwrap();
            assert_eq!(descriptor.jku, jku);
        }
    }

    #[test]
    fn header_carries_descriptor_fields() {
        let descriptor = VerifyingKeyDescriptor::new("https://example.com/keys", "k1").unwrap();
        let header = JwsHeader::es256().with_descriptor(Some(&descriptor));
        let json = serde_json::to_value(&header).unwrap();
        assert_eq!(json["alg"], "ES256");
        assert_eq!(json["jku"], "https://example.com/keys");
        assert_eq!(json["kid"], "k1");
        assert!(json.get("typ").is_none());
    }

    #[test]
    fn deflate_flag_sets_zip() {
        assert_eq!(
            JweHeader::ecdh_es_a256gcm().with_deflate(true).zip.as_deref(),
            Some(DEFLATE)
        );
        assert!(JweHeader::ecdh_es_a256gcm().with_deflate(false).zip.is_none());
    }
}
