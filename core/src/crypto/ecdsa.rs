// ## 📂 File: `src/crypto/ecdsa.rs`

//! crypto/ecdsa.rs
//! ECDSA P-256 over precomputed SHA-256 digests.
//!
//! Notes:
//! - Signing mixes OS randomness into the RFC 6979 nonce (hedged signatures).
//! - Output is the DER form; `crypto::signature` turns it into `r || s`.
//! - A scalar pair outside `[1, n)` is an invalid signature, not an error.

use p256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::FieldBytes;
use rand::rngs::OsRng;

use crate::constants::{DIGEST_LEN, SCALAR_LEN};
use crate::crypto::types::ProviderError;

/// Generate a fresh P-256 signing key from the OS RNG.
pub fn generate_signing_key() -> SigningKey {
    SigningKey::random(&mut OsRng)
}

/// Load a signing key from its 32-byte big-endian scalar.
pub fn signing_key_from_bytes(bytes: &[u8; SCALAR_LEN]) -> Result<SigningKey, ProviderError> {
    SigningKey::from_bytes(FieldBytes::from_slice(bytes)).map_err(|_| ProviderError::InvalidKey)
}

/// Load a peer key from SEC1 bytes (compressed or uncompressed point).
pub fn verifying_key_from_sec1(bytes: &[u8]) -> Result<VerifyingKey, ProviderError> {
    VerifyingKey::from_sec1_bytes(bytes).map_err(|_| ProviderError::InvalidKey)
}

/// Sign `digest` and return the DER signature.
pub fn sign_prehash_der(key: &SigningKey, digest: &[u8; DIGEST_LEN]) -> Result<Vec<u8>, ProviderError> {
    let sig: Signature = key
        .sign_prehash_with_rng(&mut OsRng, digest)
        .map_err(|_| ProviderError::Signing)?;
    Ok(sig.to_der().as_bytes().to_vec())
}

/// Verify raw scalars against `digest`.
pub fn verify_prehash_scalars(
    key: &VerifyingKey,
    r: &[u8; SCALAR_LEN],
    s: &[u8; SCALAR_LEN],
    digest: &[u8; DIGEST_LEN],
) -> bool {
    let sig = match Signature::from_scalars(
        FieldBytes::clone_from_slice(r),
        FieldBytes::clone_from_slice(s),
    ) {
        Ok(sig) => sig,
        Err(_) => return false,
    };
    key.verify_prehash(digest, &sig).is_ok()
}
