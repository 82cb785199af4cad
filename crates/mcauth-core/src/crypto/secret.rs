// ============================================
// File: crates/mcauth-core/src/crypto/secret.rs
// ============================================
//! # Shared Secret
//!
//! ## Creation Reason
//! The client picks the symmetric key of the encrypted session and sends it
//! RSA-encrypted under the server's public key. This module recovers it.
//!
//! ## Main Functionality
//! - `SharedSecret`: symmetric key material tagged for AES
//! - `decrypt_shared_key`: RSAES-PKCS1-v1_5 decryption with the server key
//! - `encrypt_shared_key`: the client-side counterpart
//!
//! ## ⚠️ Important Note for Next Developer
//! - Ciphertext is attacker-controlled: failures are final, never retried
//! - Decryption is all or nothing, no partial plaintext is returned
//! - `SharedSecret` is zeroed on drop and never printed
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

use std::fmt;

use rand::{CryptoRng, RngCore};
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use mcauth_common::error::CommonError;

use super::{AES_KEY_SIZE, SHARED_SECRET_ALGORITHM};
use crate::error::{CoreError, Result};

// ============================================
// SharedSecret
// ============================================

/// Symmetric key material agreed during login.
///
/// The vanilla client sends 16 bytes used as both AES-128 key and CFB8 IV.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    /// Wraps raw key material.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the raw key bytes.
    ///
    /// # Security Warning
    /// Do not log or persist the returned bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the key material in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no key material was recovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Algorithm the key material is meant for.
    #[must_use]
    pub const fn algorithm(&self) -> &'static str {
        SHARED_SECRET_ALGORITHM
    }

    /// Returns the material as an AES-128 key.
    ///
    /// # Errors
    /// Returns `InvalidLength` if the secret is not exactly 16 bytes.
    pub fn aes128_key(&self) -> Result<[u8; AES_KEY_SIZE]> {
        <[u8; AES_KEY_SIZE]>::try_from(self.0.as_slice())
            .map_err(|_| CommonError::invalid_length(AES_KEY_SIZE, self.0.len()).into())
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material
        write!(f, "SharedSecret({}, [REDACTED])", self.algorithm())
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SharedSecret {}

// ============================================
// Decryption / Encryption
// ============================================

/// Decrypts the client's encrypted shared secret with the server key.
///
/// # Errors
/// Returns `Decryption` on malformed ciphertext, a wrong key or a padding
/// mismatch.
pub fn decrypt_shared_key(private_key: &RsaPrivateKey, encrypted: &[u8]) -> Result<SharedSecret> {
    let plaintext = private_key.decrypt(Pkcs1v15Encrypt, encrypted).map_err(|e| {
        debug!(
            "[SECRET] Shared secret decryption failed ({} byte ciphertext): {}",
            encrypted.len(),
            e
        );
        CoreError::Decryption
    })?;

    debug!("[SECRET] Recovered {} byte shared secret", plaintext.len());
    Ok(SharedSecret::from_bytes(plaintext))
}

/// Encrypts `secret` for the holder of `public_key`, as a client does.
///
/// # Errors
/// Returns `Encryption` if `secret` is too long for the key size.
pub fn encrypt_shared_key<R: RngCore + CryptoRng>(
    rng: &mut R,
    public_key: &RsaPublicKey,
    secret: &[u8],
) -> Result<Vec<u8>> {
    public_key
        .encrypt(rng, Pkcs1v15Encrypt, secret)
        .map_err(|e| CoreError::encryption(format!("shared secret: {e}")))
}

// ============================================
// Tests
// ============================================
