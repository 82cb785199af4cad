// ============================================
// File: crates/mcauth-core/src/crypto/keys.rs
// ============================================
//! # Key Types
//!
//! ## Creation Reason
//! Defines the two asymmetric keys of the login handshake: the server's own
//! RSA key pair and the public key a client presents together with the
//! authority's signature.
//!
//! ## Main Functionality
//! - `ServerKeyPair`: RSA key pair generated once per server instance
//! - `ClientPublicKey`: client key, expiry and authority signature
//!
//! ## Key Lifecycle
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  ServerKeyPair (process lifetime)                          │
//! │  ├─ Generated once at startup                              │
//! │  ├─ Public half sent to every connecting client (DER)      │
//! │  └─ Private half decrypts shared secrets, never leaves     │
//! │                                                            │
//! │  ClientPublicKey (one connection)                          │
//! │  ├─ Received during login                                  │
//! │  ├─ Checked against the trust anchor and its expiry        │
//! │  └─ Discarded once the handshake completes                 │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Private keys should NEVER be logged or serialized
//! - `RSA_KEY_BITS` is fixed at compile time
//!
//! ## Last Modified
//! v0.1.0 - Initial key type definitions

use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use mcauth_common::time::Timestamp;

use super::{fingerprint, RSA_KEY_BITS};
use crate::error::{CoreError, Result};

// ============================================
// ServerKeyPair
// ============================================

/// RSA key pair owned by a server instance.
///
/// # Example
/// ```no_run
/// use mcauth_core::crypto::ServerKeyPair;
///
/// let key_pair = ServerKeyPair::generate().expect("RSA is always available");
/// let der = key_pair.public_key_der();
/// assert!(!der.is_empty());
/// ```
pub struct ServerKeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
    /// X.509 SubjectPublicKeyInfo encoding of `public`, sent to clients
    public_der: Vec<u8>,
}

impl ServerKeyPair {
    /// Generates a new key pair using the operating system's RNG.
    ///
    /// # Errors
    /// Returns `KeyGeneration` if the RSA primitive fails. Callers treat
    /// this as an unrecoverable startup error.
    pub fn generate() -> Result<Self> {
        Self::generate_with_rng(&mut OsRng)
    }

    /// Generates a new key pair from the supplied random source.
    ///
    /// # Errors
    /// Returns `KeyGeneration` if the RSA primitive fails.
    pub fn generate_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let private = RsaPrivateKey::new(rng, RSA_KEY_BITS)
            .map_err(|e| CoreError::key_generation(format!("RSA-{RSA_KEY_BITS}: {e}")))?;
        let public = private.to_public_key();
        let public_der = public
            .to_public_key_der()
            .map_err(|e| CoreError::key_generation(format!("DER encoding: {e}")))?
            .as_bytes()
            .to_vec();

        info!(
            "[KEYS] Generated RSA-{} server key pair, fingerprint {}",
            RSA_KEY_BITS,
            fingerprint(&public_der)
        );

        Ok(Self {
            private,
            public,
            public_der,
        })
    }

    /// Generates a new key pair on a blocking worker thread.
    ///
    /// Key generation is CPU-bound; this keeps it off the async executor.
    ///
    /// # Errors
    /// Returns `KeyGeneration` if generation fails or the worker panics.
    pub async fn generate_offloaded() -> Result<Self> {
        debug!("[KEYS] Offloading key pair generation to blocking pool");
        tokio::task::spawn_blocking(Self::generate)
            .await
            .map_err(|e| CoreError::key_generation(format!("worker failed: {e}")))?
    }

    /// Returns the public key.
    #[must_use]
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Returns the private key.
    #[must_use]
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    /// Returns the X.509 DER encoding of the public key.
    #[must_use]
    pub fn public_key_der(&self) -> &[u8] {
        &self.public_der
    }
}

impl fmt::Debug for ServerKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print private key material
        f.debug_struct("ServerKeyPair")
            .field("public", &fingerprint(&self.public_der))
            .finish_non_exhaustive()
    }
}

// ============================================
// ClientPublicKey
// ============================================

/// Public key presented by a client, vouched for by the signing authority
/// until `expiry`.
///
/// Serializes `key` and `signature` as base64 strings in human-readable
/// formats and as raw bytes otherwise.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPublicKey {
    /// X.509 SubjectPublicKeyInfo DER encoding of the client's RSA key.
    #[serde(with = "bytes_serde")]
    pub key: Vec<u8>,
    /// Instant after which the authority no longer vouches for `key`.
    pub expiry: Timestamp,
    /// Authority signature over the canonical form of `(expiry, key)`.
    #[serde(with = "bytes_serde")]
    pub signature: Vec<u8>,
}

impl ClientPublicKey {
    /// Creates a client key record from its wire components.
    #[must_use]
    pub fn new(key: Vec<u8>, expiry: Timestamp, signature: Vec<u8>) -> Self {
        Self {
            key,
            expiry,
            signature,
        }
    }

    /// Returns `true` if the key is no longer valid at `at`.
    ///
    /// The expiry instant itself already counts as expired.
    #[must_use]
    pub const fn is_expired_at(&self, at: Timestamp) -> bool {
        !at.is_before(self.expiry)
    }

    /// Parses `key` into an RSA public key, e.g. for nonce verification.
    ///
    /// # Errors
    /// Returns `InvalidPublicKey` if `key` is not an RSA X.509 DER key.
    pub fn public_key(&self) -> Result<RsaPublicKey> {
        RsaPublicKey::from_public_key_der(&self.key)
            .map_err(|e| CoreError::invalid_public_key(e.to_string()))
    }
}

impl fmt::Debug for ClientPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientPublicKey")
            .field("key", &fingerprint(&self.key))
            .field("expiry", &self.expiry)
            .field("signature_len", &self.signature.len())
            .finish()
    }
}

mod bytes_serde {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
    use mcauth_common::error::CommonError;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&BASE64.encode(bytes))
        } else {
            serializer.serialize_bytes(bytes)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            BASE64
                .decode(&s)
                .map_err(|e| serde::de::Error::custom(CommonError::from(e)))
        } else {
            <Vec<u8>>::deserialize(deserializer)
        }
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rsa::traits::PublicKeyParts;

    #[test]
    fn test_server_keypair_modulus_size() {
        let kp = ServerKeyPair::generate().unwrap();
        assert_eq!(kp.public_key().n().bits(), RSA_KEY_BITS);
        assert_eq!(kp.public_key().size(), RSA_KEY_BITS / 8);
        assert_eq!(&kp.private_key().to_public_key(), kp.public_key());
    }

    #[test]
    fn test_server_keypair_public_der_decodes() {
        let kp = ServerKeyPair::generate().unwrap();
        let decoded = RsaPublicKey::from_public_key_der(kp.public_key_der()).unwrap();
        assert_eq!(&decoded, kp.public_key());
    }

    #[test]
    fn test_distinct_keypairs() {
        let a = ServerKeyPair::generate().unwrap();
        let b = ServerKeyPair::generate().unwrap();
        assert_ne!(a.public_key_der(), b.public_key_der());
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = ServerKeyPair::generate_with_rng(&mut StdRng::seed_from_u64(7)).unwrap();
        let b = ServerKeyPair::generate_with_rng(&mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a.public_key_der(), b.public_key_der());
    }

    #[test]
    fn test_debug_hides_private_key() {
        let kp = ServerKeyPair::generate().unwrap();
        let debug = format!("{kp:?}");
        assert!(debug.starts_with("ServerKeyPair"));
        assert!(!debug.contains("private"));
    }

    #[test]
    fn test_client_key_expiry_boundary() {
        let key = ClientPublicKey::new(vec![1, 2, 3], Timestamp::from_millis(5_000), vec![]);
        assert!(!key.is_expired_at(Timestamp::from_millis(4_999)));
        assert!(key.is_expired_at(Timestamp::from_millis(5_000)));
        assert!(key.is_expired_at(Timestamp::from_millis(5_001)));
    }

    #[test]
    fn test_client_key_parse() {
        let kp = ServerKeyPair::generate().unwrap();
        let client = ClientPublicKey::new(
            kp.public_key_der().to_vec(),
            Timestamp::from_millis(0),
            vec![],
        );
        assert_eq!(&client.public_key().unwrap(), kp.public_key());

        let garbage = ClientPublicKey::new(vec![0x30, 0x00], Timestamp::from_millis(0), vec![]);
        assert!(matches!(
            garbage.public_key(),
            Err(CoreError::InvalidPublicKey { .. })
        ));
    }

    #[test]
    fn test_client_key_json_serialization() {
        let key = ClientPublicKey::new(
            vec![0xde, 0xad, 0xbe, 0xef],
            Timestamp::from_millis(1_655_000_000_000),
            vec![0x01, 0x02],
        );

        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(
            json,
            r#"{"key":"3q2+7w==","expiry":1655000000000,"signature":"AQI="}"#
        );

        let restored: ClientPublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, restored);
    }

    #[test]
    fn test_client_key_json_rejects_bad_base64() {
        let json = r#"{"key":"3q2+7w=","expiry":1655000000000,"signature":"AQI="}"#;
        let err = serde_json::from_str::<ClientPublicKey>(json).unwrap_err();
        assert!(err.to_string().contains("Malformed base64"));
    }
}
