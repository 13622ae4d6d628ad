// ## 📂 File: `src/encrypt0.rs`

//! encrypt0.rs
//! COSE_Encrypt0: single-recipient AES-CCM-64-64-128 messages.
//!
//! Wire form: `16([bstr h'a1010c', bstr h'', bstr ciphertext || tag(8)])`
//!
//! Design notes:
//! - The protected header is the fixed `{1: 12}` constant.
//! - AAD is the Enc-structure ["Encrypt0", protected, external_aad]; on decrypt
//!   it is rebuilt from the decoded protected header and the caller's AAD.
//! - Key and IV are caller-supplied; nothing here generates nonces, so
//!   identical inputs give identical wire bytes.
//! - Working buffers that held plaintext are zeroized on failure.
//! - No plaintext, key, or ciphertext bytes are logged.

use ciborium::value::Value;
use log::{debug, warn};
use zeroize::Zeroize;

use crate::cbor::{self, bstr, tagged_array};
use crate::constants::{
    AEAD_KEY_LEN, AEAD_NONCE_LEN, AEAD_TAG_LEN, ENCRYPT0_ARITY, MAX_STRUCTURE_LEN,
    PROTECTED_AES_CCM_64_64_128, TAG_ENCRYPT0,
};
use crate::crypto::CryptoProvider;
use crate::structures::build_enc_structure;
use crate::types::{CoseError, DecodedEncrypt0};

/// Encrypt `plaintext` and write the tagged wire form into `out`.
///
/// # Returns
/// - Number of bytes written to `out`.
///
/// # Errors
/// - `EncodingOverflow` if the AAD bound or `out` is too small.
/// - `AllocationFailure` if the ciphertext buffer cannot be allocated.
/// - `Provider` if the AEAD seal fails.
pub fn encode_encrypted<P: CryptoProvider>(
    provider: &P,
    plaintext: &[u8],
    key: &[u8; AEAD_KEY_LEN],
    iv: &[u8; AEAD_NONCE_LEN],
    external_aad: &[u8],
    out: &mut [u8],
) -> Result<usize, CoseError> {
    let protected = PROTECTED_AES_CCM_64_64_128;

    let mut aad = [0u8; MAX_STRUCTURE_LEN];
    let aad_len = build_enc_structure(&protected, external_aad, &mut aad)?;

    let ct_len = plaintext.len() + AEAD_TAG_LEN;
    let mut ciphertext = Vec::new();
    ciphertext
        .try_reserve_exact(ct_len)
        .map_err(|_| CoseError::AllocationFailure { requested: ct_len })?;
    ciphertext.extend_from_slice(plaintext);

    let tag = match provider.aead_seal(key, iv, &aad[..aad_len], &mut ciphertext) {
        Ok(tag) => tag,
        Err(e) => {
            ciphertext.zeroize();
            return Err(e.into());
        }
    };
    ciphertext.extend_from_slice(&tag);

    let wire = tagged_array(
        TAG_ENCRYPT0,
        vec![bstr(&protected), bstr(&[]), Value::Bytes(ciphertext)],
    );
    let n = cbor::encode_into(&wire, out)?;

    debug!("encrypt0: encoded {} bytes, plaintext {} bytes", n, plaintext.len());
    Ok(n)
}

/// `encode_encrypted` into a fresh buffer bounded by `max_len`.
pub fn encode_encrypted_vec<P: CryptoProvider>(
    provider: &P,
    plaintext: &[u8],
    key: &[u8; AEAD_KEY_LEN],
    iv: &[u8; AEAD_NONCE_LEN],
    external_aad: &[u8],
    max_len: usize,
) -> Result<Vec<u8>, CoseError> {
    let mut buf = vec![0u8; max_len];
    let n = encode_encrypted(provider, plaintext, key, iv, external_aad, &mut buf)?;
    buf.truncate(n);
    Ok(buf)
}

/// Decode an Encrypt0 wire message into caller-owned byte strings.
///
/// # Errors
/// - `DecodingMalformed` on tag/arity/type mismatch or a ciphertext shorter
///   than the tag.
/// - `AllocationFailure` if a byte-string buffer cannot be reserved.
pub fn decode_encrypt0(wire: &[u8]) -> Result<DecodedEncrypt0, CoseError> {
    let mut reader = cbor::WireReader::new(wire);
    reader.expect_tag(TAG_ENCRYPT0)?;
    reader.expect_array(ENCRYPT0_ARITY)?;

    let protected = reader.take_bstr("protected")?;
    let unprotected = reader.take_bstr("unprotected")?;
    let ciphertext = reader.take_bstr("ciphertext")?;
    reader.finish()?;

    if ciphertext.len() < AEAD_TAG_LEN {
        return Err(CoseError::malformed(format!(
            "ciphertext: {} bytes is shorter than the {}-byte tag",
            ciphertext.len(),
            AEAD_TAG_LEN
        )));
    }

    Ok(DecodedEncrypt0 { protected, unprotected, ciphertext })
}

/// Decrypt an already decoded message. Consumes it; the ciphertext buffer
/// becomes the plaintext on success.
pub fn decrypt_decoded<P: CryptoProvider>(
    provider: &P,
    decoded: DecodedEncrypt0,
    key: &[u8; AEAD_KEY_LEN],
    iv: &[u8; AEAD_NONCE_LEN],
    external_aad: &[u8],
) -> Result<Vec<u8>, CoseError> {
    let mut aad = [0u8; MAX_STRUCTURE_LEN];
    let aad_len = build_enc_structure(&decoded.protected, external_aad, &mut aad)?;

    let DecodedEncrypt0 { mut ciphertext, .. } = decoded;
    let split = ciphertext
        .len()
        .checked_sub(AEAD_TAG_LEN)
        .ok_or_else(|| CoseError::malformed("ciphertext shorter than tag"))?;

    let mut tag = [0u8; AEAD_TAG_LEN];
    tag.copy_from_slice(&ciphertext[split..]);
    ciphertext.truncate(split);

    match provider.aead_open(key, iv, &aad[..aad_len], &mut ciphertext, &tag) {
        Ok(()) => {
            debug!("encrypt0: decrypted {} bytes", ciphertext.len());
            Ok(ciphertext)
        }
        Err(e) => {
            ciphertext.zeroize();
            warn!("encrypt0: open failed: {}", e);
            Err(e.into())
        }
    }
}

/// Decode `wire` and decrypt it with the caller-supplied key, IV and AAD.
///
/// # Errors
/// - `AuthenticationFailed` on tag mismatch (wrong key, IV, AAD, or tampering).
/// - `DecodingMalformed`, `AllocationFailure`, `EncodingOverflow`.
pub fn decrypt_encrypted<P: CryptoProvider>(
    provider: &P,
    wire: &[u8],
    key: &[u8; AEAD_KEY_LEN],
    iv: &[u8; AEAD_NONCE_LEN],
    external_aad: &[u8],
) -> Result<Vec<u8>, CoseError> {
    let decoded = decode_encrypt0(wire)?;
    decrypt_decoded(provider, decoded, key, iv, external_aad)
}
