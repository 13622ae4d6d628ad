// ## 📂 File: `src/crypto/provider.rs`

//! crypto/provider.rs
//! The crypto-provider seam and its default RustCrypto implementation.
//!
//! Design notes:
//! - The COSE layer never implements primitives; it calls a provider.
//! - `ecdsa_sign` returns the provider's variable-length DER signature.
//!   Normalization to fixed `r || s` happens in `crypto::signature`.
//! - Nonces are caller-supplied; the only randomness is inside `ecdsa_sign`.
//! - Implementations must be reentrant if callers share them across threads.

use crate::constants::{AEAD_KEY_LEN, AEAD_NONCE_LEN, AEAD_TAG_LEN, DIGEST_LEN, SCALAR_LEN};
use crate::crypto::types::ProviderError;
use crate::crypto::{aead, digest, ecdsa, kdf};

pub trait CryptoProvider {
    /// Private key used by `ecdsa_sign`.
    type SigningKey;

    /// Peer public key used by `ecdsa_verify`.
    type VerifyingKey;

    /// SHA-256 over `data`.
    fn sha256(&self, data: &[u8]) -> [u8; DIGEST_LEN];

    /// ECDSA over a precomputed digest. Returns a DER `ECDSA-Sig-Value`.
    fn ecdsa_sign(
        &self,
        digest: &[u8; DIGEST_LEN],
        key: &Self::SigningKey,
    ) -> Result<Vec<u8>, ProviderError>;

    /// ECDSA verification from raw scalars. `Ok(false)` for a bad signature.
    fn ecdsa_verify(
        &self,
        r: &[u8; SCALAR_LEN],
        s: &[u8; SCALAR_LEN],
        digest: &[u8; DIGEST_LEN],
        key: &Self::VerifyingKey,
    ) -> Result<bool, ProviderError>;

    /// Encrypt `buf` in place and return the detached tag.
    fn aead_seal(
        &self,
        key: &[u8; AEAD_KEY_LEN],
        nonce: &[u8; AEAD_NONCE_LEN],
        aad: &[u8],
        buf: &mut [u8],
    ) -> Result<[u8; AEAD_TAG_LEN], ProviderError>;

    /// Decrypt `buf` in place after checking `tag` in constant time.
    /// On `Err`, `buf` contents are unspecified and must not be used.
    fn aead_open(
        &self,
        key: &[u8; AEAD_KEY_LEN],
        nonce: &[u8; AEAD_NONCE_LEN],
        aad: &[u8],
        buf: &mut [u8],
        tag: &[u8; AEAD_TAG_LEN],
    ) -> Result<(), ProviderError>;

    /// HKDF-SHA-256: extract with `salt` (empty = HashLen zeros), expand `info`
    /// into `out`.
    fn hkdf_sha256(
        &self,
        salt: &[u8],
        ikm: &[u8],
        info: &[u8],
        out: &mut [u8],
    ) -> Result<(), ProviderError>;
}

/// Default provider: `sha2`, `p256`, `ccm` + `aes`, `hkdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoProvider;

impl CryptoProvider for RustCryptoProvider {
    type SigningKey = p256::ecdsa::SigningKey;
    type VerifyingKey = p256::ecdsa::VerifyingKey;

    fn sha256(&self, data: &[u8]) -> [u8; DIGEST_LEN] {
        digest::sha256(data)
    }

    fn ecdsa_sign(
        &self,
        digest: &[u8; DIGEST_LEN],
        key: &Self::SigningKey,
    ) -> Result<Vec<u8>, ProviderError> {
        ecdsa::sign_prehash_der(key, digest)
    }

    fn ecdsa_verify(
        &self,
        r: &[u8; SCALAR_LEN],
        s: &[u8; SCALAR_LEN],
        digest: &[u8; DIGEST_LEN],
        key: &Self::VerifyingKey,
    ) -> Result<bool, ProviderError> {
        Ok(ecdsa::verify_prehash_scalars(key, r, s, digest))
    }

    fn aead_seal(
        &self,
        key: &[u8; AEAD_KEY_LEN],
        nonce: &[u8; AEAD_NONCE_LEN],
        aad: &[u8],
        buf: &mut [u8],
    ) -> Result<[u8; AEAD_TAG_LEN], ProviderError> {
        aead::AesCcm::new(key).seal_detached(nonce, aad, buf)
    }

    fn aead_open(
        &self,
        key: &[u8; AEAD_KEY_LEN],
        nonce: &[u8; AEAD_NONCE_LEN],
        aad: &[u8],
        buf: &mut [u8],
        tag: &[u8; AEAD_TAG_LEN],
    ) -> Result<(), ProviderError> {
        aead::AesCcm::new(key).open_detached(nonce, aad, buf, tag)
    }

    fn hkdf_sha256(
        &self,
        salt: &[u8],
        ikm: &[u8],
        info: &[u8],
        out: &mut [u8],
    ) -> Result<(), ProviderError> {
        kdf::hkdf_sha256(salt, ikm, info, out)
    }
}
