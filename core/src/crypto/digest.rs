// ## 📂 File: `src/crypto/digest.rs`

use sha2::{Digest as _, Sha256};

use crate::constants::DIGEST_LEN;

/// SHA-256 over `data`.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&Sha256::digest(data));
    out
}
