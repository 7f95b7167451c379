//! Async adapter over the four bridge operations

use super::operations;
use crate::{config::JoseConfig, error::JoseResult, futures::JoseOperation};
use std::sync::Arc;
use tokio::{runtime::Handle, sync::oneshot};

/// Entry point for hosts: encrypt, decrypt, sign and verify
///
/// Every call copies its inputs onto Tokio's blocking pool and returns a
/// [`JoseOperation`]. Calls share nothing but the immutable config, so any
/// number may run in parallel. Called outside a Tokio runtime, the operation
/// settles with `TaskFailed`.
#[derive(Debug, Clone, Default)]
pub struct JoseBridge {
    config: Arc<JoseConfig>,
}

impl JoseBridge {
    /// Bridge applying `config` to every produced token
    #[must_use]
    pub fn new(config: JoseConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The config this bridge was built with
    #[must_use]
    pub fn config(&self) -> &JoseConfig {
        &self.config
    }

    /// Encrypt `plaintext` to the recipient's public key; resolves with a compact JWE
    pub fn encrypt(
        &self,
        public_key_pem: impl Into<String>,
        plaintext: impl Into<String>,
    ) -> JoseOperation {
        let config = Arc::clone(&self.config);
        let public_key_pem = public_key_pem.into();
        let plaintext = plaintext.into();
        spawn(move || operations::encrypt(&config, &public_key_pem, &plaintext))
    }

    /// Decrypt a compact JWE; resolves with the plaintext
    pub fn decrypt(
        &self,
        private_key_pem: impl Into<String>,
        jwe: impl Into<String>,
    ) -> JoseOperation {
        let private_key_pem = private_key_pem.into();
        let jwe = jwe.into();
        spawn(move || operations::decrypt(&private_key_pem, &jwe))
    }

    /// Sign `payload`; resolves with a compact JWS
    ///
    /// `verifying_key_descriptor` is `{"jku": ..., "kid": ...}` JSON or blank.
    pub fn sign(
        &self,
        private_key_pem: impl Into<String>,
        payload: impl Into<String>,
        verifying_key_descriptor: impl Into<String>,
    ) -> JoseOperation {
        let config = Arc::clone(&self.config);
        let private_key_pem = private_key_pem.into();
        let payload = payload.into();
        let descriptor = verifying_key_descriptor.into();
        spawn(move || operations::sign(&config, &private_key_pem, &payload, &descriptor))
    }

    /// Verify a compact JWS; resolves with the payload, rejects on a bad signature
    pub fn verify(
        &self,
        public_key_pem: impl Into<String>,
        jws: impl Into<String>,
    ) -> JoseOperation {
        let public_key_pem = public_key_pem.into();
        let jws = jws.into();
        spawn(move || operations::verify(&public_key_pem, &jws))
    }
}

fn spawn<F>(job: F) -> JoseOperation
where
    F: FnOnce() -> JoseResult<String> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn_blocking(move || {
                let _ = tx.send(job());
            });
        }
        // Dropping the sender settles the operation with TaskFailed
        Err(e) => tracing::error!("no Tokio runtime for bridge operation: {e}"),
    }
    JoseOperation::new(rx)
}
