// ## src/kdf.rs

//! kdf.rs
//! Key derivation over a KDF-context.
//!
//! Design:
//! - HKDF-Extract with an empty salt, then HKDF-Expand over SHA-256 with the
//!   KDF-context bytes as `info`.
//! - Pure: identical (ikm, context, length) always yields identical output.
//! - Output length is the caller's choice (16 for an AEAD key, 32 for a
//!   secret), bounded by 255 * HashLen.

use log::debug;

use crate::constants::MAX_KDF_CONTEXT_LEN;
use crate::crypto::CryptoProvider;
use crate::structures::build_kdf_context;
use crate::types::CoseError;

/// Derive `out.len()` bytes from `input_key_material` bound to `info_context`.
///
/// # Errors
/// - `Provider(InvalidOutputLen)` for a zero-length or oversized `out`.
#[inline]
pub fn derive_key<P: CryptoProvider>(
    provider: &P,
    input_key_material: &[u8],
    info_context: &[u8],
    out: &mut [u8],
) -> Result<(), CoseError> {
    provider.hkdf_sha256(&[], input_key_material, info_context, out)?;
    debug!("kdf: derived {} bytes from {}-byte context", out.len(), info_context.len());
    Ok(())
}

/// `derive_key` into a fresh buffer of `output_length` bytes.
pub fn derive_key_vec<P: CryptoProvider>(
    provider: &P,
    input_key_material: &[u8],
    info_context: &[u8],
    output_length: usize,
) -> Result<Vec<u8>, CoseError> {
    let mut out = vec![0u8; output_length];
    derive_key(provider, input_key_material, info_context, &mut out)?;
    Ok(out)
}

/// Build the KDF-context for (`algorithm_id`, `key_length_bits`, `other_info`)
/// and derive `key_length_bits / 8` bytes from it.
///
/// # Errors
/// - `Config` if `key_length_bits` is not a positive multiple of 8.
/// - The errors of `build_kdf_context` and `derive_key`.
pub fn derive_from_context<P: CryptoProvider>(
    provider: &P,
    input_key_material: &[u8],
    algorithm_id: &str,
    key_length_bits: u32,
    other_info: &[u8],
) -> Result<Vec<u8>, CoseError> {
    if key_length_bits == 0 || key_length_bits % 8 != 0 {
        return Err(CoseError::Config(format!(
            "key length must be a positive multiple of 8 bits, got {}",
            key_length_bits
        )));
    }

    let mut context = [0u8; MAX_KDF_CONTEXT_LEN];
    let n = build_kdf_context(algorithm_id, key_length_bits, other_info, &mut context)?;

    let len = usize::try_from(key_length_bits / 8)
        .map_err(|_| CoseError::Config("key length out of range".into()))?;
    derive_key_vec(provider, input_key_material, &context[..n], len)
}
