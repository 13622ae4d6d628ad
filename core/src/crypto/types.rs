// ## 📂 File: `src/crypto/types.rs`

use std::fmt;

/// Errors reported by a crypto provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Key bytes rejected by the provider (bad length, not on curve, zero scalar).
    InvalidKey,

    /// Signing failed (RNG or arithmetic failure).
    Signing,

    /// AEAD seal failed.
    Seal,

    /// AEAD tag mismatch (authentication failure).
    TagMismatch,

    /// Requested HKDF output length is zero or above 255 * HashLen.
    InvalidOutputLen { requested: usize, max: usize },
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ProviderError::*;
        match self {
            InvalidKey =>
                write!(f, "invalid key material"),
            Signing =>
                write!(f, "ECDSA signing failed"),
            Seal =>
                write!(f, "AEAD seal failed"),
            TagMismatch =>
                write!(f, "AEAD tag mismatch"),
            InvalidOutputLen { requested, max } =>
                write!(f, "invalid HKDF output length: requested={}, max={}", requested, max),
        }
    }
}

impl std::error::Error for ProviderError {}
