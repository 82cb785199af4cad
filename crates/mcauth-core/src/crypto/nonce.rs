// ============================================
// File: crates/mcauth-core/src/crypto/nonce.rs
// ============================================
//! # Signed Nonce
//!
//! Clients holding an authority-vouched key may prove possession of its
//! private half by signing the server's nonce together with a random salt
//! instead of encrypting the verify token.
//!
//! ```text
//! signature = SHA256withRSA( nonce || salt as 8 big-endian bytes )
//! ```
//!
//! The key passed in must already be trusted (see [`super::trust`]); no
//! anchor lookup happens here.
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::signature::Verifier;
use rsa::RsaPublicKey;
use sha2::Sha256;
use tracing::debug;

/// Verifies `signature` over `nonce || salt` under the client's key.
#[must_use]
pub fn verify_signed_nonce(
    nonce: &[u8],
    client_key: &RsaPublicKey,
    signature_salt: i64,
    signature: &[u8],
) -> bool {
    let Ok(signature) = Signature::try_from(signature) else {
        debug!("[NONCE] Malformed nonce signature");
        return false;
    };

    let mut signed = Vec::with_capacity(nonce.len() + 8);
    signed.extend_from_slice(nonce);
    signed.extend_from_slice(&signature_salt.to_be_bytes());

    let verifier = VerifyingKey::<Sha256>::new(client_key.clone());
    let valid = verifier.verify(&signed, &signature).is_ok();
    if !valid {
        debug!("[NONCE] Nonce signature rejected");
    }
    valid
}
