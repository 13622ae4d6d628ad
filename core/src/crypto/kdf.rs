// ## src/crypto/kdf.rs

//! crypto/kdf.rs
//! HKDF-SHA-256 primitive used by the default provider.
//!
//! Design:
//! - HKDF-Extract(salt, ikm) -> PRK; an empty salt means HashLen zeros.
//! - HKDF-Expand(PRK, info) -> out.len() bytes.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::constants::MAX_HKDF_OUTPUT_LEN;
use crate::crypto::types::ProviderError;

#[inline]
pub fn hkdf_sha256(
    salt: &[u8],
    ikm: &[u8],
    info: &[u8],
    out: &mut [u8],
) -> Result<(), ProviderError> {
    let invalid_len = ProviderError::InvalidOutputLen {
        requested: out.len(),
        max: MAX_HKDF_OUTPUT_LEN,
    };
    if out.is_empty() || out.len() > MAX_HKDF_OUTPUT_LEN {
        return Err(invalid_len);
    }

    let salt = if salt.is_empty() { None } else { Some(salt) };
    let hk = Hkdf::<Sha256>::new(salt, ikm);
    hk.expand(info, out).map_err(|_| invalid_len)
}
