// ============================================
// File: crates/mcauth-core/src/crypto/signable.rs
// ============================================
//! # Signable Key Form
//!
//! ## Creation Reason
//! The signing authority does not sign a client key's DER bytes directly.
//! It signs a textual rendering: the expiry in epoch milliseconds followed
//! by a PEM-like block of the key. Verification must rebuild that text
//! byte for byte.
//!
//! ## Wire Format
//! ```text
//! <expiry millis, decimal>-----BEGIN RSA PUBLIC KEY-----\n
//! <base64(DER), 76 chars per line, lines joined with \n>\n
//! -----END RSA PUBLIC KEY-----\n
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Line length 76, LF only, no trailing LF after the last base64 line
//! - Any deviation silently breaks every signature check
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::trace;

use mcauth_common::time::Timestamp;

use super::{SIGNABLE_BEGIN_MARKER, SIGNABLE_END_MARKER, SIGNABLE_LINE_LENGTH};

/// Renders `(public_key_der, expiry)` into the exact bytes the authority
/// signed.
#[must_use]
pub fn to_signable(public_key_der: &[u8], expiry: Timestamp) -> Vec<u8> {
    let encoded = wrap_lines(&BASE64.encode(public_key_der));
    let text = format!(
        "{}{SIGNABLE_BEGIN_MARKER}\n{encoded}\n{SIGNABLE_END_MARKER}\n",
        expiry.as_millis()
    );

    trace!("[SIGNABLE] Canonical form: {} bytes", text.len());
    text.into_bytes()
}

/// Splits base64 text into `SIGNABLE_LINE_LENGTH` character lines.
fn wrap_lines(encoded: &str) -> String {
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / SIGNABLE_LINE_LENGTH);
    for (i, c) in encoded.chars().enumerate() {
        if i > 0 && i % SIGNABLE_LINE_LENGTH == 0 {
            wrapped.push('\n');
        }
        wrapped.push(c);
    }
    wrapped
}
