// ============================================
// File: crates/mcauth-core/src/crypto/server_id.rs
// ============================================
//! # Server Id Hash
//!
//! ## Creation Reason
//! Both the client and the server report a hash of the login parameters to
//! the session service; matching values prove they negotiated the same
//! secret with the same server key.
//!
//! ## Algorithm
//! ```text
//! digest = SHA-1( latin1(server_id) || shared_secret || DER(server_public_key) )
//! hash   = signed_big_endian(digest).to_hex()     e.g. "-7c9d5b00..."
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - The hex form is a SIGNED two's-complement integer: it may start with
//!   `-` and has no zero padding. Do not "fix" it, the session service
//!   compares the exact string.
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

use num_bigint::BigInt;
use rsa::pkcs8::EncodePublicKey;
use rsa::RsaPublicKey;
use sha1::{Digest, Sha1};
use tracing::trace;

use super::SharedSecret;
use crate::error::{CoreError, Result};

/// Computes the server id hash for session verification.
///
/// # Errors
/// Returns `Encoding` if `public_key` cannot be rendered as DER.
pub fn server_id_hash(
    server_id: &str,
    shared_secret: &SharedSecret,
    public_key: &RsaPublicKey,
) -> Result<String> {
    let public_der = public_key
        .to_public_key_der()
        .map_err(|e| CoreError::encoding(format!("server public key: {e}")))?;
    Ok(server_id_hash_bytes(
        server_id,
        shared_secret.as_bytes(),
        public_der.as_bytes(),
    ))
}

/// Computes the server id hash from raw secret and DER key bytes.
#[must_use]
pub fn server_id_hash_bytes(server_id: &str, shared_secret: &[u8], public_key_der: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(latin1(server_id));
    hasher.update(shared_secret);
    hasher.update(public_key_der);

    let hash = signed_hex(&hasher.finalize());
    trace!("[SERVER-ID] Computed server id hash {}", hash);
    hash
}

/// Renders `bytes` as a signed big-endian integer in lowercase hex.
pub(crate) fn signed_hex(bytes: &[u8]) -> String {
    BigInt::from_signed_bytes_be(bytes).to_str_radix(16)
}

/// One byte per character; anything above U+00FF becomes `?`.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::ServerKeyPair;

    fn sha1_signed_hex(input: &str) -> String {
        signed_hex(&Sha1::digest(input.as_bytes()))
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            sha1_signed_hex("Notch"),
            "4ed1f46bbe04bc756bcb17c0c7ce3e4632f06a48"
        );
        assert_eq!(
            sha1_signed_hex("jeb_"),
            "-7c9d5b0044c130109a5d7b5fb5c317c02b4e28c1"
        );
        assert_eq!(
            sha1_signed_hex("simon"),
            "88e16a1019277b15d58faf0541e11910eb756f6"
        );
    }

    #[test]
    fn test_signed_hex_edge_cases() {
        assert_eq!(signed_hex(&[0x00, 0x00, 0x01]), "1");
        assert_eq!(signed_hex(&[0xff, 0xff]), "-1");
        assert_eq!(signed_hex(&[0x80, 0x00]), "-8000");
        assert_eq!(signed_hex(&[0x00]), "0");
    }

    #[test]
    fn test_latin1_encoding() {
        assert_eq!(latin1("abc"), b"abc".to_vec());
        assert_eq!(latin1("\u{e9}"), vec![0xe9]);
        assert_eq!(latin1("\u{263a}x"), b"?x".to_vec());
    }

    #[test]
    fn test_concatenation_order() {
        let expected = sha1_signed_hex("idsecretkey");
        assert_eq!(server_id_hash_bytes("id", b"secret", b"key"), expected);
        assert_eq!(server_id_hash_bytes("", b"idsecret", b"key"), expected);
    }

    #[test]
    fn test_deterministic_and_input_sensitive() {
        let kp = ServerKeyPair::generate().unwrap();
        let other = ServerKeyPair::generate().unwrap();
        let secret = SharedSecret::from_bytes(vec![0x5a; 16]);

        let base = server_id_hash("", &secret, kp.public_key()).unwrap();
        assert_eq!(base, server_id_hash("", &secret, kp.public_key()).unwrap());
        assert_eq!(
            base,
            server_id_hash_bytes("", secret.as_bytes(), kp.public_key_der())
        );

        assert_ne!(base, server_id_hash("x", &secret, kp.public_key()).unwrap());
        assert_ne!(
            base,
            server_id_hash("", &SharedSecret::from_bytes(vec![0x5b; 16]), kp.public_key()).unwrap()
        );
        assert_ne!(base, server_id_hash("", &secret, other.public_key()).unwrap());
    }
}
