// ============================================
// File: crates/mcauth-core/src/crypto/mod.rs
// ============================================
//! # Cryptography Module
//!
//! ## Creation Reason
//! Centralizes every cryptographic operation of the login handshake,
//! using audited RustCrypto implementations (`rsa`, `sha1`, `sha2`).
//!
//! ## Main Functionality
//!
//! ### Submodules
//! - [`keys`]: Server RSA key pair and the client-presented public key
//! - [`token`]: Verify token challenge generation
//! - [`signable`]: Canonical byte form of a client key for signing
//! - [`trust`]: Embedded trust anchor and client key verification
//! - [`secret`]: Shared secret decryption
//! - [`server_id`]: Server id hash for session verification
//! - [`nonce`]: Signed nonce verification
//!
//! ## Login Flow
//! ```text
//! Client                                          Server
//!   │                                               │
//!   │ ◄──────────── server public key (DER) ─────── │
//!   │ ◄──────────── verify token (4 bytes) ──────── │ token::generate_verify_token
//!   │                                               │
//!   │  client key + expiry + authority signature ►  │ trust::verify_client_key
//!   │  RSA(shared secret) ────────────────────────► │ secret::decrypt_shared_key
//!   │  RSA(verify token) or signed nonce ─────────► │ nonce::verify_signed_nonce
//!   │                                               │
//!   │             server_id_hash(id, secret, key)   │ server_id::server_id_hash
//!   │                    │                          │
//!   │                    ▼                          │
//!   │            session service lookup (external)  │
//!   │                                               │
//!   │ ═══════════ AES/CFB8 with shared secret ═════ │
//! ```
//!
//! ## Security Properties
//! - **Authenticity**: client keys are vouched for by the authority (SHA1withRSA)
//! - **Possession**: nonce signatures prove the client holds its private key
//! - **Confidentiality**: the shared secret only travels RSA-encrypted
//!
//! ## ⚠️ Important Note for Next Developer
//! - Algorithms and sizes are fixed: the vanilla client dictates them
//! - Build a fresh verifier/cipher per call, never share one across threads
//! - NEVER log shared secrets or private keys
//!
//! ## Last Modified
//! v0.1.0 - Initial crypto implementation

pub mod keys;
pub mod nonce;
pub mod secret;
pub mod server_id;
pub mod signable;
pub mod token;
pub mod trust;

// Re-export primary types at module level
pub use keys::{ClientPublicKey, ServerKeyPair};
pub use nonce::verify_signed_nonce;
pub use secret::{decrypt_shared_key, encrypt_shared_key, SharedSecret};
pub use server_id::{server_id_hash, server_id_hash_bytes};
pub use signable::to_signable;
pub use token::generate_verify_token;
pub use trust::{verify_client_key, TrustAnchor};

use sha2::{Digest, Sha256};

// ============================================
// Constants
// ============================================

/// Modulus length of the server RSA key pair, in bits.
pub const RSA_KEY_BITS: usize = 1024;

/// Length of the verify token challenge in bytes.
pub const VERIFY_TOKEN_LENGTH: usize = 4;

/// Line length of the base64 block in the signable key form.
pub const SIGNABLE_LINE_LENGTH: usize = 76;

/// Opening marker of the signable key form.
pub const SIGNABLE_BEGIN_MARKER: &str = "-----BEGIN RSA PUBLIC KEY-----";

/// Closing marker of the signable key form.
pub const SIGNABLE_END_MARKER: &str = "-----END RSA PUBLIC KEY-----";

/// Algorithm name the shared secret is tagged with.
pub const SHARED_SECRET_ALGORITHM: &str = "AES";

/// Size of the AES-128 key the vanilla client sends as shared secret.
pub const AES_KEY_SIZE: usize = 16;

// ============================================
// Logging helpers
// ============================================

/// Short SHA-256 fingerprint of public material for log lines.
pub(crate) fn fingerprint(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    hex::encode(&digest[..8])
}
