// ## 📂 File: `src/crypto/aead.rs`

//! crypto/aead.rs
//! AES-CCM-64-64-128 (COSE alg 12).
//!
//! Design notes:
//! - 16-byte key, 7-byte nonce (L = 8), 8-byte tag.
//! - Tag comparison is constant-time inside `ccm` and fails closed.
//! - Caller provides nonce and AAD (the Enc-structure) per message.

use aes::Aes128;
use ccm::aead::consts::{U7, U8};
use ccm::aead::generic_array::GenericArray;
use ccm::aead::{AeadInPlace, KeyInit};
use ccm::Ccm;

use crate::constants::{AEAD_KEY_LEN, AEAD_NONCE_LEN, AEAD_TAG_LEN};
use crate::crypto::types::ProviderError;

type AesCcm64_64_128 = Ccm<Aes128, U8, U7>;

#[derive(Clone)]
pub struct AesCcm {
    cipher: AesCcm64_64_128,
}

impl AesCcm {
    pub fn new(key: &[u8; AEAD_KEY_LEN]) -> Self {
        Self {
            cipher: AesCcm64_64_128::new(GenericArray::from_slice(key)),
        }
    }

    /// Encrypt `buf` in place and return the detached 8-byte tag.
    pub fn seal_detached(
        &self,
        nonce: &[u8; AEAD_NONCE_LEN],
        aad: &[u8],
        buf: &mut [u8],
    ) -> Result<[u8; AEAD_TAG_LEN], ProviderError> {
        let tag = self
            .cipher
            .encrypt_in_place_detached(GenericArray::from_slice(nonce), aad, buf)
            .map_err(|_| ProviderError::Seal)?;

        let mut out = [0u8; AEAD_TAG_LEN];
        out.copy_from_slice(&tag);
        Ok(out)
    }

    /// Decrypt `buf` in place, checking `tag` first.
    pub fn open_detached(
        &self,
        nonce: &[u8; AEAD_NONCE_LEN],
        aad: &[u8],
        buf: &mut [u8],
        tag: &[u8; AEAD_TAG_LEN],
    ) -> Result<(), ProviderError> {
        self.cipher
            .decrypt_in_place_detached(
                GenericArray::from_slice(nonce),
                aad,
                buf,
                GenericArray::from_slice(tag),
            )
            .map_err(|_| ProviderError::TagMismatch)
    }
}
