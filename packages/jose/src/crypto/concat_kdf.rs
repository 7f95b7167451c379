//! Concat KDF (NIST SP 800-56A single-step, SHA-256) as profiled by JWA for ECDH-ES

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Derive `key_len` bytes from the ECDH shared secret `z`
///
/// OtherInfo is `AlgorithmID || PartyUInfo || PartyVInfo || SuppPubInfo`,
/// each of the first three prefixed with its 32-bit big-endian length and
/// SuppPubInfo being the key length in bits.
pub fn derive_key(
    z: &[u8],
    algorithm_id: &str,
    apu: &[u8],
    apv: &[u8],
    key_len: usize,
) -> Zeroizing<Vec<u8>> {
    let key_bits = u32::try_from(key_len * 8).unwrap_or(u32::MAX);
    let mut derived = Zeroizing::new(Vec::with_capacity(key_len + 32));
    let mut counter: u32 = 1;

    while derived.len() < key_len {
        let mut hasher = Sha256::new();
        hasher.update(counter.to_be_bytes());
        hasher.update(z);
        update_prefixed(&mut hasher, algorithm_id.as_bytes());
        update_prefixed(&mut hasher, apu);
        update_prefixed(&mut hasher, apv);
        hasher.update(key_bits.to_be_bytes());
        derived.extend_from_slice(&hasher.finalize());
        counter += 1;
    }

    derived.truncate(key_len);
    derived
}

fn update_prefixed(hasher: &mut Sha256, data: &[u8]) {
    let len = u32::try_from(data.len()).unwrap_or(u32::MAX);
    hasher.update(len.to_be_bytes());
    hasher.update(data);
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 7518 Appendix C
    #[test]
    fn rfc7518_appendix_c_vector() {
        let z = [
            158, 86, 217, 29, 129, 113, 53, 211, 114, 131, 66, 131, 191, 132, 38, 156, 251, 49,
            110, 163, 218, 128, 106, 72, 246, 218, 167, 121, 140, 254, 144, 196,
        ];
        let derived = derive_key(&z, "A128GCM", b"Alice", b"Bob", 16);
        assert_eq!(
            derived.as_slice(),
            &[86, 170, 141, 234, 248, 35, 109, 32, 92, 34, 40, 205, 113, 167, 16, 26]
        );
    }

    #[test]
    fn output_length_follows_request() {
        let z = [7u8; 32];
        assert_eq!(derive_key(&z, "A256GCM", b"", b"", 32).len(), 32);
        let long = derive_key(&z, "A256GCM", b"", b"", 48);
        assert_eq!(long.len(), 48);
        // Different SuppPubInfo, so the 32-byte key is not a prefix of the 48-byte one
        assert_ne!(&long[..32], derive_key(&z, "A256GCM", b"", b"", 32).as_slice());
    }

    #[test]
    fn algorithm_id_separates_keys() {
        let z = [1u8; 32];
        assert_ne!(
            derive_key(&z, "A256GCM", b"", b"", 32).as_slice(),
            derive_key(&z, "A128GCM", b"", b"", 32).as_slice()
        );
    }
}
