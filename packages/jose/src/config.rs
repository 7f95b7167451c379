//! Bridge configuration

use crate::error::{JoseError, JoseResult};
use serde::{Deserialize, Serialize};

/// Header choices applied to every produced token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JoseConfig {
    /// `typ` header on produced JWS and JWE
    pub token_type: Option<String>,
    /// `cty` header on produced JWS
    pub signed_content_type: Option<String>,
    /// DEFLATE the plaintext before encryption and mark it with `zip: DEF`
    pub compress_encrypted_payloads: bool,
}

impl Default for JoseConfig {
    fn default() -> Self {
        Self {
            token_type: Some("JWT".to_string()),
            signed_content_type: None,
            compress_encrypted_payloads: false,
        }
    }
}

impl JoseConfig {
    /// Parse host-supplied JSON; blank input yields the defaults
    ///
    /// # Errors
    /// Returns `Configuration` if the JSON does not describe a config.
    pub fn from_json(json: &str) -> JoseResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| JoseError::Configuration(e.to_string()))
    }
}
