// ## 📂 File: `src/config.rs`

//! config.rs
//! Size limits applied by `CoseEngine`.
//!
//! Defaults come from `constants.rs`. A config may tighten the protocol
//! bounds for a constrained deployment but never widen them, because the
//! internal structure buffers are sized from the constants.

use crate::constants::{MAX_EXTERNAL_AAD_LEN, MAX_HKDF_OUTPUT_LEN, MAX_MESSAGE_LEN};
use crate::types::CoseError;

/// Smallest message bound that still fits an empty Sign1 (tag, heads, signature).
pub const MIN_MESSAGE_LEN: usize = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoseConfig {
    /// Bound of one encoded wire message (output buffer size).
    pub max_message_len: usize,
    /// Bound of caller-supplied external AAD.
    pub max_external_aad_len: usize,
    /// Bound of one derived output.
    pub max_derived_len: usize,
}

impl Default for CoseConfig {
    /// Protocol bounds:
    /// - 512-byte messages
    /// - 256-byte external AAD
    /// - HKDF-SHA-256 maximum output
    fn default() -> Self {
        Self {
            max_message_len: MAX_MESSAGE_LEN,
            max_external_aad_len: MAX_EXTERNAL_AAD_LEN,
            max_derived_len: MAX_HKDF_OUTPUT_LEN,
        }
    }
}

impl CoseConfig {
    pub fn with_max_message_len(mut self, len: usize) -> Self {
        self.max_message_len = len;
        self
    }

    pub fn with_max_external_aad_len(mut self, len: usize) -> Self {
        self.max_external_aad_len = len;
        self
    }

    pub fn with_max_derived_len(mut self, len: usize) -> Self {
        self.max_derived_len = len;
        self
    }

    /// Check every limit against the protocol bounds.
    pub fn validate(&self) -> Result<(), CoseError> {
        if !(MIN_MESSAGE_LEN..=MAX_MESSAGE_LEN).contains(&self.max_message_len) {
            return Err(CoseError::Config(format!(
                "max_message_len {} outside {}..={}",
                self.max_message_len, MIN_MESSAGE_LEN, MAX_MESSAGE_LEN
            )));
        }
        if self.max_external_aad_len > MAX_EXTERNAL_AAD_LEN {
            return Err(CoseError::Config(format!(
                "max_external_aad_len {} exceeds {}",
                self.max_external_aad_len, MAX_EXTERNAL_AAD_LEN
            )));
        }
        if self.max_derived_len == 0 || self.max_derived_len > MAX_HKDF_OUTPUT_LEN {
            return Err(CoseError::Config(format!(
                "max_derived_len {} outside 1..={}",
                self.max_derived_len, MAX_HKDF_OUTPUT_LEN
            )));
        }
        Ok(())
    }
}
