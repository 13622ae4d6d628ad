// ## 📂 File: `src/engine.rs`

//! engine.rs
//! The surface the handshake orchestrator consumes.
//!
//! `CoseEngine` bundles a crypto provider, the size limits, and telemetry
//! counters. Every call records a non-secret outcome; failures are returned
//! unchanged so the orchestrator keeps the retry/abort decision.

use log::warn;

use crate::config::CoseConfig;
use crate::constants::{AEAD_KEY_LEN, AEAD_NONCE_LEN};
use crate::crypto::{CryptoProvider, RustCryptoProvider};
use crate::telemetry::{TelemetryCounters, TelemetrySnapshot};
use crate::types::{CoseError, Sign1Message};
use crate::{encrypt0, kdf, sign1, structures};

pub struct CoseEngine<P: CryptoProvider = RustCryptoProvider> {
    provider: P,
    config: CoseConfig,
    counters: TelemetryCounters,
}

impl Default for CoseEngine<RustCryptoProvider> {
    fn default() -> Self {
        Self {
            provider: RustCryptoProvider,
            config: CoseConfig::default(),
            counters: TelemetryCounters::default(),
        }
    }
}

impl CoseEngine<RustCryptoProvider> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: CryptoProvider> CoseEngine<P> {
    /// Build an engine over `provider` after validating `config`.
    pub fn with_provider(provider: P, config: CoseConfig) -> Result<Self, CoseError> {
        config.validate()?;
        Ok(Self {
            provider,
            config,
            counters: TelemetryCounters::default(),
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &CoseConfig {
        &self.config
    }

    pub fn telemetry(&self) -> &TelemetryCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters)
    }

    pub fn reset_telemetry(&mut self) {
        self.counters = TelemetryCounters::default();
    }

    fn check_aad(&self, external_aad: &[u8]) -> Result<(), CoseError> {
        if external_aad.len() > self.config.max_external_aad_len {
            return Err(CoseError::EncodingOverflow {
                capacity: self.config.max_external_aad_len,
            });
        }
        Ok(())
    }

    fn fail<T>(&mut self, op: &str, err: CoseError) -> Result<T, CoseError> {
        self.counters.add_failure(&err);
        warn!("{} failed: {}", op, err);
        Err(err)
    }

    /// Sign `message` into a Sign1 wire message.
    pub fn sign(
        &mut self,
        message: &Sign1Message<'_>,
        signing_key: &P::SigningKey,
    ) -> Result<Vec<u8>, CoseError> {
        let result = self.check_aad(message.external_aad).and_then(|_| {
            sign1::encode_signed_vec(&self.provider, message, signing_key, self.config.max_message_len)
        });
        match result {
            Ok(wire) => {
                self.counters.add_sign(wire.len(), message.payload.len());
                Ok(wire)
            }
            Err(e) => self.fail("sign", e),
        }
    }

    /// Verify a Sign1 wire message. `Ok(false)` is counted as a rejection.
    pub fn verify(
        &mut self,
        wire: &[u8],
        peer_key: &P::VerifyingKey,
        external_aad: &[u8],
    ) -> Result<bool, CoseError> {
        let result = self
            .check_aad(external_aad)
            .and_then(|_| sign1::verify_signed(&self.provider, wire, peer_key, external_aad));
        match result {
            Ok(valid) => {
                self.counters.add_verify(wire.len(), valid);
                Ok(valid)
            }
            Err(e) => self.fail("verify", e),
        }
    }

    /// Verify a Sign1 wire message and return its payload.
    pub fn open_signed(
        &mut self,
        wire: &[u8],
        peer_key: &P::VerifyingKey,
        external_aad: &[u8],
    ) -> Result<Vec<u8>, CoseError> {
        let result = self
            .check_aad(external_aad)
            .and_then(|_| sign1::open_signed(&self.provider, wire, peer_key, external_aad));
        match result {
            Ok(payload) => {
                self.counters.add_verify(wire.len(), true);
                Ok(payload)
            }
            Err(e) => self.fail("open_signed", e),
        }
    }

    /// Encrypt `plaintext` into an Encrypt0 wire message.
    pub fn encrypt(
        &mut self,
        plaintext: &[u8],
        key: &[u8; AEAD_KEY_LEN],
        iv: &[u8; AEAD_NONCE_LEN],
        external_aad: &[u8],
    ) -> Result<Vec<u8>, CoseError> {
        let result = self.check_aad(external_aad).and_then(|_| {
            encrypt0::encode_encrypted_vec(
                &self.provider,
                plaintext,
                key,
                iv,
                external_aad,
                self.config.max_message_len,
            )
        });
        match result {
            Ok(wire) => {
                self.counters.add_encrypt(wire.len(), plaintext.len());
                Ok(wire)
            }
            Err(e) => self.fail("encrypt", e),
        }
    }

    /// Decrypt an Encrypt0 wire message.
    pub fn decrypt(
        &mut self,
        wire: &[u8],
        key: &[u8; AEAD_KEY_LEN],
        iv: &[u8; AEAD_NONCE_LEN],
        external_aad: &[u8],
    ) -> Result<Vec<u8>, CoseError> {
        let result = self
            .check_aad(external_aad)
            .and_then(|_| encrypt0::decrypt_encrypted(&self.provider, wire, key, iv, external_aad));
        match result {
            Ok(plaintext) => {
                self.counters.add_decrypt(wire.len(), plaintext.len());
                Ok(plaintext)
            }
            Err(e) => self.fail("decrypt", e),
        }
    }

    /// Derive `output_length` bytes from `ikm` bound to `info_context`.
    pub fn derive(
        &mut self,
        ikm: &[u8],
        info_context: &[u8],
        output_length: usize,
    ) -> Result<Vec<u8>, CoseError> {
        if output_length > self.config.max_derived_len {
            let err = CoseError::Config(format!(
                "derived length {} exceeds configured {}",
                output_length, self.config.max_derived_len
            ));
            return self.fail("derive", err);
        }
        match kdf::derive_key_vec(&self.provider, ikm, info_context, output_length) {
            Ok(out) => {
                self.counters.add_derive(out.len());
                Ok(out)
            }
            Err(e) => self.fail("derive", e),
        }
    }

    /// Build a KDF-context (`key_length` in bits).
    pub fn kdf_context(
        &self,
        algorithm_id: &str,
        key_length: u32,
        other_info: &[u8],
    ) -> Result<Vec<u8>, CoseError> {
        structures::build_kdf_context_vec(algorithm_id, key_length, other_info)
    }
}
