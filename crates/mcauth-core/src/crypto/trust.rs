// ============================================
// File: crates/mcauth-core/src/crypto/trust.rs
// ============================================
//! # Trust Anchor
//!
//! ## Creation Reason
//! Client keys are only accepted if the session-signing authority vouched
//! for them. The authority's RSA public key ships with the binary and is
//! the single trust anchor of the process.
//!
//! ## Main Functionality
//! - `TrustAnchor`: the authority key plus client key verification
//! - `init` / `init_with` / `get`: process-wide anchor state
//! - `verify_client_key`: verification against the installed anchor
//!
//! ## Main Logical Flow
//! 1. Startup calls [`init`]; a malformed embedded key aborts startup
//! 2. Per connection, [`verify_client_key`] rejects expired keys without
//!    touching the RSA engine
//! 3. Otherwise the canonical form of `(expiry, key)` is checked with
//!    SHA1withRSA under the anchor key
//!
//! ## ⚠️ Important Note for Next Developer
//! - The anchor is installed once and never replaced; there is no teardown
//! - Expiry equal to the verification instant counts as expired
//! - A bad signature is `false`, not an error
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

use std::sync::OnceLock;

use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier;
use rsa::RsaPublicKey;
use sha1::Sha1;
use tracing::{debug, info, trace};

use mcauth_common::time::Timestamp;

use super::keys::ClientPublicKey;
use super::{fingerprint, to_signable};
use crate::error::{CoreError, Result};

/// DER encoding of the authority key compiled into the binary.
// TODO: swap in the session service's published yggdrasil_session_pubkey.der;
// this RSA-4096 key only lets the embedded path load and parse.
static EMBEDDED_ANCHOR_DER: &[u8] = include_bytes!("../../assets/placeholder_session_pubkey.der");

/// Process-wide anchor, set once by [`init`] or [`init_with`].
static TRUST_ANCHOR: OnceLock<TrustAnchor> = OnceLock::new();

// ============================================
// TrustAnchor
// ============================================

/// Public key of the authority that signs client keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustAnchor {
    key: RsaPublicKey,
}

impl TrustAnchor {
    /// Parses an anchor from X.509 SubjectPublicKeyInfo DER.
    ///
    /// # Errors
    /// Returns `TrustAnchor` if the bytes are not an RSA public key.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let key = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| CoreError::trust_anchor(e.to_string()))?;
        Ok(Self { key })
    }

    /// Parses the anchor embedded in the binary.
    ///
    /// # Errors
    /// Returns `TrustAnchor` if the embedded asset is malformed.
    pub fn embedded() -> Result<Self> {
        Self::from_der(EMBEDDED_ANCHOR_DER)
    }

    /// Returns the authority's public key.
    #[must_use]
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.key
    }

    /// Checks that `client_key` is unexpired at `verify_timestamp` and that
    /// its signature was made by this anchor.
    ///
    /// Returns `false` for expired keys, malformed signatures and signature
    /// mismatches alike.
    #[must_use]
    pub fn verify_client_key(&self, client_key: &ClientPublicKey, verify_timestamp: Timestamp) -> bool {
        if client_key.is_expired_at(verify_timestamp) {
            debug!(
                "[TRUST] Client key expired: expiry={}, now={}",
                client_key.expiry, verify_timestamp
            );
            return false;
        }

        let signable = to_signable(&client_key.key, client_key.expiry);
        trace!(
            "[TRUST] Verifying key {} against anchor",
            fingerprint(&client_key.key)
        );

        let Ok(signature) = Signature::try_from(client_key.signature.as_slice()) else {
            debug!("[TRUST] Malformed client key signature");
            return false;
        };

        let verifier = VerifyingKey::<Sha1>::new(self.key.clone());
        match verifier.verify(&signable, &signature) {
            Ok(()) => true,
            Err(_) => {
                debug!(
                    "[TRUST] Signature rejected for key {}",
                    fingerprint(&client_key.key)
                );
                false
            }
        }
    }
}

// ============================================
// Process-wide state
// ============================================

/// Loads the embedded anchor into process-wide state.
///
/// Must run before the first connection is served. Later calls return the
/// already installed anchor.
///
/// # Errors
/// Returns `TrustAnchor` if the embedded key is malformed; startup must
/// abort in that case.
pub fn init() -> Result<&'static TrustAnchor> {
    if let Some(anchor) = TRUST_ANCHOR.get() {
        return Ok(anchor);
    }

    let (anchor, installed) = install_once(&TRUST_ANCHOR, TrustAnchor::embedded()?);
    if installed {
        info!(
            "[TRUST] Trust anchor initialized, {} bytes",
            EMBEDDED_ANCHOR_DER.len()
        );
    } else {
        debug!("[TRUST] Trust anchor already installed by a concurrent init");
    }
    Ok(anchor)
}

/// Stores `anchor` unless `cell` is already set. The flag is `true` only for
/// the caller whose value ended up in the cell.
fn install_once(cell: &OnceLock<TrustAnchor>, anchor: TrustAnchor) -> (&TrustAnchor, bool) {
    let mut installed = false;
    let stored = cell.get_or_init(|| {
        installed = true;
        anchor
    });
    (stored, installed)
}

/// Installs `anchor` as the process-wide trust anchor.
///
/// # Errors
/// Returns `TrustAnchorAlreadyInitialized` if an anchor is installed.
pub fn init_with(anchor: TrustAnchor) -> Result<&'static TrustAnchor> {
    TRUST_ANCHOR
        .set(anchor)
        .map_err(|_| CoreError::TrustAnchorAlreadyInitialized)?;
    info!("[TRUST] Trust anchor installed");
    get()
}

/// Returns the process-wide trust anchor.
///
/// # Errors
/// Returns `TrustAnchorUnavailable` if neither [`init`] nor [`init_with`]
/// has run.
pub fn get() -> Result<&'static TrustAnchor> {
    TRUST_ANCHOR.get().ok_or(CoreError::TrustAnchorUnavailable)
}

/// Verifies `client_key` against the process-wide trust anchor.
///
/// # Errors
/// Returns `TrustAnchorUnavailable` if the anchor was never initialized.
/// Untrusted or expired keys are `Ok(false)`.
pub fn verify_client_key(client_key: &ClientPublicKey, verify_timestamp: Timestamp) -> Result<bool> {
    Ok(get()?.verify_client_key(client_key, verify_timestamp))
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::ServerKeyPair;
    use rsa::pkcs1v15::SigningKey;
    use rsa::signature::{SignatureEncoding, Signer};

    fn anchor_and_signer() -> (TrustAnchor, SigningKey<Sha1>) {
        let authority = ServerKeyPair::generate().unwrap();
        let anchor = TrustAnchor::from_der(authority.public_key_der()).unwrap();
        let signer = SigningKey::<Sha1>::new(authority.private_key().clone());
        (anchor, signer)
    }

    fn signed_client_key(signer: &SigningKey<Sha1>, expiry: Timestamp) -> ClientPublicKey {
        let client = ServerKeyPair::generate().unwrap();
        let key = client.public_key_der().to_vec();
        let signature = signer.sign(&to_signable(&key, expiry)).to_vec();
        ClientPublicKey::new(key, expiry, signature)
    }

    #[test]
    fn test_embedded_anchor_parses() {
        let anchor = TrustAnchor::embedded().unwrap();
        assert_eq!(anchor, TrustAnchor::from_der(EMBEDDED_ANCHOR_DER).unwrap());
    }

    #[test]
    fn test_malformed_anchor_is_fatal() {
        let err = TrustAnchor::from_der(&[0x30, 0x03, 0x02, 0x01, 0x00]).unwrap_err();
        assert!(matches!(err, CoreError::TrustAnchor { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_init_is_idempotent_and_not_replaceable() {
        let first = init().unwrap();
        let second = init().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(first, get().unwrap()));

        let (other, _) = anchor_and_signer();
        assert!(matches!(
            init_with(other),
            Err(CoreError::TrustAnchorAlreadyInitialized)
        ));
    }

    #[test]
    fn test_install_once_reports_single_winner() {
        let cell = OnceLock::new();
        let (first, _) = anchor_and_signer();
        let (second, _) = anchor_and_signer();

        let (stored, installed) = install_once(&cell, first.clone());
        assert!(installed);
        assert_eq!(stored, &first);

        let (stored, installed) = install_once(&cell, second);
        assert!(!installed);
        assert_eq!(stored, &first);
    }

    #[test]
    fn test_concurrent_install_has_one_winner() {
        let cell = OnceLock::new();
        let embedded = TrustAnchor::embedded().unwrap();

        let winners = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| install_once(&cell, embedded.clone()).1))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .filter(|installed| *installed)
                .count()
        });
        assert_eq!(winners, 1);
        assert_eq!(cell.get(), Some(&embedded));
    }

    #[test]
    fn test_valid_signature_accepted() {
        let (anchor, signer) = anchor_and_signer();
        let expiry = Timestamp::from_millis(1_700_000_000_000);
        let key = signed_client_key(&signer, expiry);

        assert!(anchor.verify_client_key(&key, expiry.saturating_sub_millis(1)));
    }

    #[test]
    fn test_expiry_boundary_rejected() {
        let (anchor, signer) = anchor_and_signer();
        let expiry = Timestamp::from_millis(1_700_000_000_000);
        let key = signed_client_key(&signer, expiry);

        assert!(!anchor.verify_client_key(&key, expiry));
        assert!(!anchor.verify_client_key(&key, expiry.saturating_add_millis(1)));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let (anchor, signer) = anchor_and_signer();
        let expiry = Timestamp::from_millis(1_700_000_000_000);
        let mut key = signed_client_key(&signer, expiry);
        key.signature[10] ^= 0x01;

        assert!(!anchor.verify_client_key(&key, expiry.saturating_sub_millis(1)));
    }

    #[test]
    fn test_tampered_key_rejected() {
        let (anchor, signer) = anchor_and_signer();
        let expiry = Timestamp::from_millis(1_700_000_000_000);
        let mut key = signed_client_key(&signer, expiry);
        let last = key.key.len() - 1;
        key.key[last] ^= 0x80;

        assert!(!anchor.verify_client_key(&key, expiry.saturating_sub_millis(1)));
    }

    #[test]
    fn test_tampered_expiry_rejected() {
        let (anchor, signer) = anchor_and_signer();
        let expiry = Timestamp::from_millis(1_700_000_000_000);
        let mut key = signed_client_key(&signer, expiry);
        key.expiry = expiry.saturating_add_millis(60_000);

        assert!(!anchor.verify_client_key(&key, expiry.saturating_sub_millis(1)));
    }

    #[test]
    fn test_other_authority_rejected() {
        let (_, signer) = anchor_and_signer();
        let (other_anchor, _) = anchor_and_signer();
        let expiry = Timestamp::from_millis(1_700_000_000_000);
        let key = signed_client_key(&signer, expiry);

        assert!(!other_anchor.verify_client_key(&key, expiry.saturating_sub_millis(1)));
    }

    #[test]
    fn test_truncated_signature_rejected() {
        let (anchor, signer) = anchor_and_signer();
        let expiry = Timestamp::from_millis(1_700_000_000_000);
        let mut key = signed_client_key(&signer, expiry);
        key.signature.truncate(3);
        assert!(!anchor.verify_client_key(&key, expiry.saturating_sub_millis(1)));

        key.signature.clear();
        assert!(!anchor.verify_client_key(&key, expiry.saturating_sub_millis(1)));
    }
}
