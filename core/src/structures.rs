// ## 📂 File: `src/structures.rs`

//! structures.rs
//! Canonical structures that feed a signature, an AEAD, or HKDF.
//!
//! Design notes:
//! - Field order and item types are part of the security contract:
//!   Sig-structure  = [tstr context, bstr protected, bstr external_aad, bstr payload]
//!   Enc-structure  = ["Encrypt0", bstr protected, bstr external_aad]
//!   KDF-context    = [tstr alg, [null,null,null], [null,null,null],
//!                     [uint key_length, h'', bstr other]]
//! - Party-identity entries of the KDF-context are always null.
//! - Structures are transient: built per operation, never transmitted.
//! - Every builder writes into a caller buffer and fails with
//!   `EncodingOverflow` instead of truncating.

use ciborium::value::Value;

use crate::cbor::{self, bstr, int, tstr, uint};
use crate::constants::{
    context, HEADER_LABEL_ALG, MAX_KDF_CONTEXT_LEN, MAX_STRUCTURE_LEN,
};
use crate::types::{CoseAlgorithm, CoseError};

/// Build a Sig-structure for `context` (normally "Signature1") into `out`.
///
/// # Returns
/// - Number of bytes written.
///
/// # Errors
/// - `EncodingOverflow` if `out` is too small.
pub fn build_sig_structure(
    context: &str,
    protected: &[u8],
    external_aad: &[u8],
    payload: &[u8],
    out: &mut [u8],
) -> Result<usize, CoseError> {
    let value = Value::Array(vec![
        tstr(context),
        bstr(protected),
        bstr(external_aad),
        bstr(payload),
    ]);
    cbor::encode_into(&value, out)
}

/// Build the Enc-structure for a single-recipient message into `out`.
pub fn build_enc_structure(
    protected: &[u8],
    external_aad: &[u8],
    out: &mut [u8],
) -> Result<usize, CoseError> {
    let value = Value::Array(vec![
        tstr(context::ENCRYPT0),
        bstr(protected),
        bstr(external_aad),
    ]);
    cbor::encode_into(&value, out)
}

/// Build a KDF-context into `out`. `key_length` is in bits.
pub fn build_kdf_context(
    algorithm_id: &str,
    key_length: u32,
    other_info: &[u8],
    out: &mut [u8],
) -> Result<usize, CoseError> {
    let nulls = || Value::Array(vec![Value::Null, Value::Null, Value::Null]);
    let value = Value::Array(vec![
        tstr(algorithm_id),
        nulls(), // PartyUInfo
        nulls(), // PartyVInfo
        Value::Array(vec![
            uint(u64::from(key_length)),
            bstr(&[]),
            bstr(other_info),
        ]),
    ]);
    cbor::encode_into(&value, out)
}

/// `build_sig_structure` into a fresh buffer of `MAX_STRUCTURE_LEN`.
pub fn build_sig_structure_vec(
    context: &str,
    protected: &[u8],
    external_aad: &[u8],
    payload: &[u8],
) -> Result<Vec<u8>, CoseError> {
    let mut buf = vec![0u8; MAX_STRUCTURE_LEN];
    let n = build_sig_structure(context, protected, external_aad, payload, &mut buf)?;
    buf.truncate(n);
    Ok(buf)
}

/// `build_enc_structure` into a fresh buffer of `MAX_STRUCTURE_LEN`.
pub fn build_enc_structure_vec(protected: &[u8], external_aad: &[u8]) -> Result<Vec<u8>, CoseError> {
    let mut buf = vec![0u8; MAX_STRUCTURE_LEN];
    let n = build_enc_structure(protected, external_aad, &mut buf)?;
    buf.truncate(n);
    Ok(buf)
}

/// `build_kdf_context` into a fresh buffer of `MAX_KDF_CONTEXT_LEN`.
pub fn build_kdf_context_vec(
    algorithm_id: &str,
    key_length: u32,
    other_info: &[u8],
) -> Result<Vec<u8>, CoseError> {
    let mut buf = vec![0u8; MAX_KDF_CONTEXT_LEN];
    let n = build_kdf_context(algorithm_id, key_length, other_info, &mut buf)?;
    buf.truncate(n);
    Ok(buf)
}

/// Encode the protected header `{1: alg}`.
pub fn protected_header(alg: CoseAlgorithm) -> Result<Vec<u8>, CoseError> {
    let value = Value::Map(vec![(int(HEADER_LABEL_ALG), int(alg as i64))]);
    cbor::encode_bounded(&value, 16)
}

/// Read the algorithm label back out of protected header bytes.
///
/// # Errors
/// - `DecodingMalformed` if the bytes are not a map, the label is missing, or
///   the identifier is not a known algorithm.
pub fn header_algorithm(protected: &[u8]) -> Result<CoseAlgorithm, CoseError> {
    let value = cbor::decode_value(protected)?;
    let entries = match &value {
        Value::Map(entries) => entries,
        _ => return Err(CoseError::malformed("protected header: expected map")),
    };

    for (k, v) in entries {
        if matches!(k, Value::Integer(i) if i128::from(*i) == i128::from(HEADER_LABEL_ALG)) {
            let raw = cbor::as_int(v, "alg")?;
            let raw = i64::try_from(raw)
                .map_err(|_| CoseError::malformed("alg: out of range"))?;
            return CoseAlgorithm::try_from(raw)
                .map_err(|_| CoseError::malformed(format!("alg: unknown identifier {}", raw)));
        }
    }
    Err(CoseError::malformed("protected header: missing alg"))
}
