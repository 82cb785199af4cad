// ============================================
// File: crates/mcauth-core/src/crypto/token.rs
// ============================================
//! # Verify Token
//!
//! The server sends a short random token with its public key; the client
//! echoes it back RSA-encrypted, which ties the encryption response to this
//! login attempt.
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

use rand::{CryptoRng, RngCore};

use super::VERIFY_TOKEN_LENGTH;

/// Generates a fresh verify token from the supplied random source.
///
/// The source is injected so tests can use a seeded generator; production
/// callers must pass a cryptographically secure one (`OsRng`, `thread_rng`).
///
/// # Example
/// ```
/// use mcauth_core::crypto::generate_verify_token;
/// use rand::rngs::OsRng;
///
/// let token = generate_verify_token(&mut OsRng);
/// assert_eq!(token.len(), 4);
/// ```
#[must_use]
pub fn generate_verify_token<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
) -> [u8; VERIFY_TOKEN_LENGTH] {
    let mut token = [0u8; VERIFY_TOKEN_LENGTH];
    rng.fill_bytes(&mut token);
    token
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::{OsRng, StdRng};
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_token_length() {
        assert_eq!(generate_verify_token(&mut OsRng).len(), VERIFY_TOKEN_LENGTH);
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let a = generate_verify_token(&mut StdRng::seed_from_u64(42));
        let b = generate_verify_token(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_tokens_do_not_repeat() {
        let mut rng = StdRng::seed_from_u64(0x6d63_6175_7468);
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            seen.insert(generate_verify_token(&mut rng));
        }
        assert_eq!(seen.len(), 10_000);
    }
}
