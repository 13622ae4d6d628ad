// ## 📂 File: `src/constants.rs`

//! constants.rs
//! Protocol constants for the COSE message layer.
//!
//! Every buffer bound used by the crate is named here and derived from the
//! handshake message budget, so an undersized buffer surfaces as
//! `CoseError::EncodingOverflow` instead of silent truncation.

/// CBOR tag for COSE_Sign1 (RFC 9052).
pub const TAG_SIGN1: u64 = 18;

/// CBOR tag for COSE_Encrypt0 (RFC 9052).
pub const TAG_ENCRYPT0: u64 = 16;

/// Array arity of a COSE_Sign1 message.
pub const SIGN1_ARITY: usize = 4;

/// Array arity of a COSE_Encrypt0 message.
pub const ENCRYPT0_ARITY: usize = 3;

/// Context labels of the canonical structures.
pub mod context {
    pub const SIGNATURE1: &str = "Signature1";
    pub const ENCRYPT0: &str = "Encrypt0";
}

/// COSE algorithm identifiers (IANA "COSE Algorithms" registry).
pub mod alg_ids {
    /// ECDSA w/ SHA-256 on P-256.
    pub const ES256: i64 = -7;
    /// AES-CCM, 64-bit tag, 128-bit key, 7-byte nonce (L = 8).
    pub const AES_CCM_64_64_128: i64 = 12;
}

/// Protected-header label carrying the algorithm identifier.
pub const HEADER_LABEL_ALG: i64 = 1;

/// Encoded `{1: 12}`: the fixed protected header of every Encrypt0 message.
pub const PROTECTED_AES_CCM_64_64_128: [u8; 3] = [0xa1, 0x01, 0x0c];

/// Encoded `{1: -7}`: the usual protected header of a Sign1 message.
pub const PROTECTED_ES256: [u8; 3] = [0xa1, 0x01, 0x26];

/// SHA-256 digest size.
pub const DIGEST_LEN: usize = 32;

/// Size of one P-256 signature scalar (r or s).
pub const SCALAR_LEN: usize = 32;

/// Raw `r || s` signature size.
pub const SIGNATURE_LEN: usize = 2 * SCALAR_LEN;

/// Largest DER encoding of a P-256 ECDSA signature.
pub const MAX_DER_SIGNATURE_LEN: usize = 72;

/// AES-CCM-64-64-128 key size.
pub const AEAD_KEY_LEN: usize = 16;

/// AES-CCM-64-64-128 nonce size.
pub const AEAD_NONCE_LEN: usize = 7;

/// AES-CCM-64-64-128 tag size.
pub const AEAD_TAG_LEN: usize = 8;

/// HKDF-SHA-256 upper bound on output length (255 * HashLen).
pub const MAX_HKDF_OUTPUT_LEN: usize = 255 * DIGEST_LEN;

/// Upper bound of one encoded handshake message.
pub const MAX_MESSAGE_LEN: usize = 512;

/// Upper bound of caller-supplied external AAD (transcript hashes and
/// credential identifiers).
pub const MAX_EXTERNAL_AAD_LEN: usize = 256;

/// Headroom for CBOR array heads, the context label, and byte-string heads
/// inside one canonical structure.
pub const STRUCTURE_OVERHEAD: usize = 32;

/// Upper bound of a Sig-structure or Enc-structure.
pub const MAX_STRUCTURE_LEN: usize =
    MAX_MESSAGE_LEN + MAX_EXTERNAL_AAD_LEN + STRUCTURE_OVERHEAD;

/// Upper bound of a KDF-context.
pub const MAX_KDF_CONTEXT_LEN: usize = MAX_EXTERNAL_AAD_LEN + STRUCTURE_OVERHEAD;
