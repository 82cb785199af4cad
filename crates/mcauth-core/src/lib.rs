// ============================================
// File: crates/mcauth-core/src/lib.rs
// ============================================
//! # mcauth Core - Login Encryption Library
//!
//! ## Creation Reason
//! Implements the cryptography of the Minecraft Java Edition login
//! handshake: authenticating a client against the session-signing
//! authority and agreeing on the shared AES secret with a server.
//!
//! ## Main Functionality
//!
//! ### Crypto Module ([`crypto`])
//! - Server RSA key pair generation (`ServerKeyPair`)
//! - Verify token challenge generation
//! - Client public key verification against the embedded `TrustAnchor`
//! - Shared secret decryption (`SharedSecret`)
//! - Server id hash for session verification
//! - Signed nonce verification
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │        protocol layer (login listener, external)    │
//! │                    │                                │
//! │                    ▼                                │
//! │               mcauth-core  ◄── You are here         │
//! │                    │                                │
//! │                    ▼                                │
//! │              mcauth-common                          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup
//! Call [`crypto::trust::init`] once before serving connections. Every other
//! operation is stateless and may run concurrently.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Byte layouts here are fixed by the vanilla client and the authority
//! - The SHA-1 based schemes are legacy but required for interoperability
//! - Test vectors should match the vanilla implementation
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod crypto;
pub mod error;

// Re-export commonly used items
pub use crypto::{
    decrypt_shared_key, generate_verify_token, server_id_hash, to_signable,
    verify_client_key, verify_signed_nonce, ClientPublicKey, ServerKeyPair,
    SharedSecret, TrustAnchor,
};
pub use error::{CoreError, Result};
pub use mcauth_common::Timestamp;
