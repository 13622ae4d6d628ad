// ## 📂 File: `src/types.rs`

//! types.rs
//! Message types and the unified error returned by every COSE operation.

use std::fmt;
use num_enum::TryFromPrimitive;

use crate::constants::{alg_ids, SIGNATURE_LEN};
use crate::crypto::types::ProviderError;

/// COSE algorithms understood by this layer.
#[repr(i64)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum CoseAlgorithm {
    Es256          = alg_ids::ES256,
    AesCcm64_64_128 = alg_ids::AES_CCM_64_64_128,
}

/// Borrowed view of a Sign1 message before signing.
///
/// `external_aad` is bound into the signature but never transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sign1Message<'a> {
    pub protected: &'a [u8],
    pub unprotected: &'a [u8],
    pub external_aad: &'a [u8],
    pub payload: &'a [u8],
}

/// Byte strings duplicated out of a Sign1 wire message. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSign1 {
    pub protected: Vec<u8>,
    pub unprotected: Vec<u8>,
    pub payload: Vec<u8>,
    pub signature: [u8; SIGNATURE_LEN],
}

/// Byte strings duplicated out of an Encrypt0 wire message. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEncrypt0 {
    pub protected: Vec<u8>,
    pub unprotected: Vec<u8>,
    /// Ciphertext followed by the 8-byte tag.
    pub ciphertext: Vec<u8>,
}

/// Unified COSE error.
/// - `SignatureInvalid` and `AuthenticationFailed` are ordinary outcomes;
///   retry/abort policy belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoseError {
    /// Destination buffer smaller than the required encoding.
    EncodingOverflow { capacity: usize },

    /// Tag, arity, type or length mismatch in a wire message or DER signature.
    DecodingMalformed(String),

    /// Signature verification returned false.
    SignatureInvalid,

    /// AEAD tag mismatch.
    AuthenticationFailed,

    /// Duplicating a byte string while decoding could not allocate.
    AllocationFailure { requested: usize },

    /// Crypto provider failure that is none of the above.
    Provider(ProviderError),

    /// Invalid configuration limits.
    Config(String),
}

impl fmt::Display for CoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CoseError::*;
        match self {
            EncodingOverflow { capacity } =>
                write!(f, "encoding overflow: destination holds {} bytes", capacity),
            DecodingMalformed(msg) =>
                write!(f, "malformed encoding: {}", msg),
            SignatureInvalid =>
                write!(f, "signature verification failed"),
            AuthenticationFailed =>
                write!(f, "AEAD authentication failed"),
            AllocationFailure { requested } =>
                write!(f, "allocation of {} bytes failed", requested),
            Provider(e) =>
                write!(f, "crypto provider error: {}", e),
            Config(msg) =>
                write!(f, "config error: {}", msg),
        }
    }
}

impl std::error::Error for CoseError {}

impl From<ProviderError> for CoseError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::TagMismatch => CoseError::AuthenticationFailed,
            other => CoseError::Provider(other),
        }
    }
}

impl CoseError {
    #[inline]
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        CoseError::DecodingMalformed(msg.into())
    }
}
