// ============================================
// File: crates/mcauth-core/src/error.rs
// ============================================
//! # Core Error Types
//!
//! ## Creation Reason
//! Defines error types for the login-encryption operations of the
//! mcauth core crate.
//!
//! ## Error Categories
//! 1. **Initialization Errors**: key pair generation, trust anchor loading.
//!    These abort startup and are never recoverable at runtime.
//! 2. **Handshake Errors**: shared secret decryption/encryption, malformed
//!    client keys. The input is attacker-controlled, so the connection is
//!    dropped without retry.
//! 3. **Configuration Errors**: verification attempted before the trust
//!    anchor was installed.
//!
//! An untrusted, expired or badly signed client key is NOT an error: the
//! verifiers report it as `false`.
//!
//! ## ⚠️ Important Note for Next Developer
//! - NEVER include key material in error messages
//! - All errors should be loggable without leaking secrets
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

use mcauth_common::error::CommonError;

// ============================================
// Result Type Alias
// ============================================

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

// ============================================
// CoreError
// ============================================

/// Core error types for the login-encryption handshake.
#[derive(Error, Debug)]
pub enum CoreError {
    // ========================================
    // Initialization Errors
    // ========================================

    /// Failed to generate the server key pair.
    #[error("Key generation failed: {context}")]
    KeyGeneration {
        /// What went wrong
        context: String,
    },

    /// The trust anchor could not be parsed.
    #[error("Failed to load trust anchor: {reason}")]
    TrustAnchor {
        /// Why loading failed
        reason: String,
    },

    /// A process-wide trust anchor is already installed.
    #[error("Trust anchor already initialized")]
    TrustAnchorAlreadyInitialized,

    // ========================================
    // Configuration Errors
    // ========================================

    /// Verification was requested before the trust anchor was installed.
    #[error("Trust anchor not initialized")]
    TrustAnchorUnavailable,

    // ========================================
    // Handshake Errors
    // ========================================

    /// Client supplied a public key that is not valid X.509 RSA DER.
    #[error("Invalid public key: {reason}")]
    InvalidPublicKey {
        /// What's wrong with the key
        reason: String,
    },

    /// Encrypting the shared secret failed.
    #[error("Encryption failed: {context}")]
    Encryption {
        /// What was being encrypted
        context: String,
    },

    /// Decrypting the shared secret failed (malformed ciphertext, wrong key
    /// or bad padding).
    #[error("Decryption failed")]
    Decryption,

    /// A key could not be rendered to its DER form.
    #[error("Encoding failed: {context}")]
    Encoding {
        /// What was being encoded
        context: String,
    },

    // ========================================
    // Wrapped Errors
    // ========================================

    /// Error from common crate.
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl CoreError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `KeyGeneration` error.
    pub fn key_generation(context: impl Into<String>) -> Self {
        Self::KeyGeneration {
            context: context.into(),
        }
    }

    /// Creates a `TrustAnchor` error.
    pub fn trust_anchor(reason: impl Into<String>) -> Self {
        Self::TrustAnchor {
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidPublicKey` error.
    pub fn invalid_public_key(reason: impl Into<String>) -> Self {
        Self::InvalidPublicKey {
            reason: reason.into(),
        }
    }

    /// Creates an `Encryption` error.
    pub fn encryption(context: impl Into<String>) -> Self {
        Self::Encryption {
            context: context.into(),
        }
    }

    /// Creates an `Encoding` error.
    pub fn encoding(context: impl Into<String>) -> Self {
        Self::Encoding {
            context: context.into(),
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if this error must abort process startup.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::KeyGeneration { .. } | Self::TrustAnchor { .. }
        )
    }

    /// Returns `true` if this error is a deployment/configuration mistake
    /// rather than a property of the client's input.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::TrustAnchorUnavailable | Self::TrustAnchorAlreadyInitialized
        )
    }

    /// Returns `true` if this error was triggered by client-controlled input.
    ///
    /// These errors warrant dropping the connection, never retrying.
    #[must_use]
    pub const fn is_suspicious(&self) -> bool {
        matches!(
            self,
            Self::Decryption | Self::InvalidPublicKey { .. } | Self::Common(_)
        )
    }
}

// ============================================
// Tests
// ============================================
