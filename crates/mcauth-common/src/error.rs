// ============================================
// File: crates/mcauth-common/src/error.rs
// ============================================
//! # Common Error Types
//!
//! Failures that stem from the shape of client-supplied bytes rather than
//! from cryptography: a secret of the wrong size, or a textual key record
//! whose base64 does not decode.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Messages carry sizes and decoder diagnostics only, never the bytes
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

/// Result alias for [`CommonError`].
pub type Result<T> = std::result::Result<T, CommonError>;

/// Malformed client-supplied data.
///
/// # Example
/// ```
/// use mcauth_common::error::{CommonError, Result};
///
/// fn check_secret(secret: &[u8]) -> Result<()> {
///     if secret.len() != 16 {
///         return Err(CommonError::invalid_length(16, secret.len()));
///     }
///     Ok(())
/// }
///
/// assert!(check_secret(&[0u8; 8]).is_err());
/// ```
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommonError {
    /// Byte string of the wrong size.
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required length in bytes
        expected: usize,
        /// Length actually received
        actual: usize,
    },

    /// Base64 text of a key record could not be decoded.
    #[error("Malformed base64: {details}")]
    Base64 {
        /// Decoder diagnostic (offset or length problem)
        details: String,
    },
}

impl CommonError {
    /// Creates an `InvalidLength` error.
    #[must_use]
    pub const fn invalid_length(expected: usize, actual: usize) -> Self {
        Self::InvalidLength { expected, actual }
    }
}

impl From<base64::DecodeError> for CommonError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64 {
            details: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    #[test]
    fn test_invalid_length_display() {
        let err = CommonError::invalid_length(16, 5);
        assert_eq!(err.to_string(), "Invalid length: expected 16, got 5");
    }

    #[test]
    fn test_base64_error_conversion() {
        let decode_err = base64::engine::general_purpose::STANDARD
            .decode("not base64!")
            .unwrap_err();
        let err = CommonError::from(decode_err);
        assert!(matches!(err, CommonError::Base64 { .. }));
        assert!(err.to_string().starts_with("Malformed base64"));
    }
}
