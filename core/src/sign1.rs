// ## 📂 File: `src/sign1.rs`

//! sign1.rs
//! COSE_Sign1: single-signer ECDSA P-256 / SHA-256 messages.
//!
//! Wire form: `18([bstr protected, bstr unprotected, bstr payload, bstr signature])`
//!
//! Design notes:
//! - The Sig-structure uses the context "Signature1" and is rebuilt on verify
//!   from the decoded protected header and payload plus the external AAD the
//!   caller supplies. External AAD is conveyed out of band, never on the wire.
//! - The provider's DER signature is normalized through a bounds-checked
//!   decoder into the fixed 64-byte `r || s` form.
//! - A false verification is an ordinary `Ok(false)` result.
//! - Logging carries sizes and outcomes only.

use log::{debug, trace};

use crate::cbor::{self, bstr, tagged_array};
use crate::constants::{context, DIGEST_LEN, MAX_STRUCTURE_LEN, SIGN1_ARITY, SIGNATURE_LEN, TAG_SIGN1};
use crate::crypto::{der_to_raw, split_scalars, CryptoProvider};
use crate::structures::build_sig_structure;
use crate::types::{CoseError, DecodedSign1, Sign1Message};

/// Hash the Sig-structure for the given fields.
fn sig_digest<P: CryptoProvider>(
    provider: &P,
    protected: &[u8],
    external_aad: &[u8],
    payload: &[u8],
) -> Result<[u8; DIGEST_LEN], CoseError> {
    let mut to_be_signed = [0u8; MAX_STRUCTURE_LEN];
    let n = build_sig_structure(
        context::SIGNATURE1,
        protected,
        external_aad,
        payload,
        &mut to_be_signed,
    )?;
    trace!("sign1: Sig-structure is {} bytes", n);
    Ok(provider.sha256(&to_be_signed[..n]))
}

/// Sign `message` and write the tagged wire form into `out`.
///
/// # Returns
/// - Number of bytes written to `out`.
///
/// # Errors
/// - `EncodingOverflow` if the Sig-structure bound or `out` is too small.
/// - `DecodingMalformed` if the provider's DER signature is out of envelope.
/// - `Provider` if signing fails.
pub fn encode_signed<P: CryptoProvider>(
    provider: &P,
    message: &Sign1Message<'_>,
    signing_key: &P::SigningKey,
    out: &mut [u8],
) -> Result<usize, CoseError> {
    let digest = sig_digest(provider, message.protected, message.external_aad, message.payload)?;

    let der = provider.ecdsa_sign(&digest, signing_key)?;
    let signature = der_to_raw(&der)?;

    let wire = tagged_array(
        TAG_SIGN1,
        vec![
            bstr(message.protected),
            bstr(message.unprotected),
            bstr(message.payload),
            bstr(&signature),
        ],
    );
    let n = cbor::encode_into(&wire, out)?;

    debug!("sign1: encoded {} bytes, payload {} bytes", n, message.payload.len());
    Ok(n)
}

/// `encode_signed` into a fresh buffer bounded by `max_len`.
pub fn encode_signed_vec<P: CryptoProvider>(
    provider: &P,
    message: &Sign1Message<'_>,
    signing_key: &P::SigningKey,
    max_len: usize,
) -> Result<Vec<u8>, CoseError> {
    let mut buf = vec![0u8; max_len];
    let n = encode_signed(provider, message, signing_key, &mut buf)?;
    buf.truncate(n);
    Ok(buf)
}

/// Decode a Sign1 wire message into caller-owned byte strings.
///
/// # Errors
/// - `DecodingMalformed` on tag/arity/type mismatch or a signature that is
///   not exactly 64 bytes.
/// - `AllocationFailure` if a byte-string buffer cannot be reserved.
pub fn decode_sign1(wire: &[u8]) -> Result<DecodedSign1, CoseError> {
    let mut reader = cbor::WireReader::new(wire);
    reader.expect_tag(TAG_SIGN1)?;
    reader.expect_array(SIGN1_ARITY)?;

    let protected = reader.take_bstr("protected")?;
    let unprotected = reader.take_bstr("unprotected")?;
    let payload = reader.take_bstr("payload")?;
    let sig_bytes = reader.take_bstr("signature")?;
    reader.finish()?;

    let signature: [u8; SIGNATURE_LEN] = sig_bytes.as_slice().try_into().map_err(|_| {
        CoseError::malformed(format!(
            "signature: expected {} bytes, found {}",
            SIGNATURE_LEN,
            sig_bytes.len()
        ))
    })?;

    Ok(DecodedSign1 { protected, unprotected, payload, signature })
}

/// Verify an already decoded message against `peer_key`.
pub fn verify_decoded<P: CryptoProvider>(
    provider: &P,
    decoded: &DecodedSign1,
    peer_key: &P::VerifyingKey,
    external_aad: &[u8],
) -> Result<bool, CoseError> {
    let digest = sig_digest(provider, &decoded.protected, external_aad, &decoded.payload)?;
    let (r, s) = split_scalars(&decoded.signature);
    let ok = provider.ecdsa_verify(&r, &s, &digest, peer_key)?;
    debug!("sign1: verification {}", if ok { "passed" } else { "failed" });
    Ok(ok)
}

/// Decode `wire` and verify its signature with the caller-supplied external AAD.
///
/// # Returns
/// - `Ok(true)` / `Ok(false)` for a well-formed message.
///
/// # Errors
/// - `DecodingMalformed`, `AllocationFailure`, `EncodingOverflow`, `Provider`.
pub fn verify_signed<P: CryptoProvider>(
    provider: &P,
    wire: &[u8],
    peer_key: &P::VerifyingKey,
    external_aad: &[u8],
) -> Result<bool, CoseError> {
    let decoded = decode_sign1(wire)?;
    verify_decoded(provider, &decoded, peer_key, external_aad)
}

/// Verify and hand back the payload.
///
/// # Errors
/// - `SignatureInvalid` when verification returns false, plus the errors of
///   `verify_signed`.
pub fn open_signed<P: CryptoProvider>(
    provider: &P,
    wire: &[u8],
    peer_key: &P::VerifyingKey,
    external_aad: &[u8],
) -> Result<Vec<u8>, CoseError> {
    let decoded = decode_sign1(wire)?;
    if verify_decoded(provider, &decoded, peer_key, external_aad)? {
        Ok(decoded.payload)
    } else {
        Err(CoseError::SignatureInvalid)
    }
}
