//! JOSE cryptographic operations

pub mod concat_kdf;
pub mod ecdh_es_decryption;
pub mod ecdh_es_encryption;
pub mod es256_signing;
pub mod es256_verification;
