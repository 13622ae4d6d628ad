// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Mutable counters updated by `CoseEngine`.
//!
//! Summary: Collects operation counts, outcome kinds, and byte counts.
//! Converted into an immutable `TelemetrySnapshot` on demand.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use crate::types::CoseError;

/// Deterministic counters collected while protecting and opening messages.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub messages_signed: u64,
    pub signatures_verified: u64,
    pub signatures_rejected: u64,
    pub messages_encrypted: u64,
    pub messages_decrypted: u64,
    pub keys_derived: u64,
    pub auth_failures: u64,
    pub decode_failures: u64,
    pub other_failures: u64,
    pub bytes_wire_out: u64,
    pub bytes_wire_in: u64,
    pub bytes_payload: u64,
    pub bytes_derived: u64,
}

impl TelemetryCounters {
    /// Record one signed message.
    ///
    /// - `wire_len`: encoded Sign1 length
    /// - `payload_len`: payload length
    pub fn add_sign(&mut self, wire_len: usize, payload_len: usize) {
        self.messages_signed += 1;
        self.bytes_wire_out += wire_len as u64;
        self.bytes_payload += payload_len as u64;
    }

    /// Record one completed verification. `valid` is the verification result.
    pub fn add_verify(&mut self, wire_len: usize, valid: bool) {
        if valid {
            self.signatures_verified += 1;
        } else {
            self.signatures_rejected += 1;
        }
        self.bytes_wire_in += wire_len as u64;
    }

    /// Record one encrypted message.
    pub fn add_encrypt(&mut self, wire_len: usize, plaintext_len: usize) {
        self.messages_encrypted += 1;
        self.bytes_wire_out += wire_len as u64;
        self.bytes_payload += plaintext_len as u64;
    }

    /// Record one decrypted message.
    pub fn add_decrypt(&mut self, wire_len: usize, plaintext_len: usize) {
        self.messages_decrypted += 1;
        self.bytes_wire_in += wire_len as u64;
        self.bytes_payload += plaintext_len as u64;
    }

    /// Record one derivation of `len` bytes.
    pub fn add_derive(&mut self, len: usize) {
        self.keys_derived += 1;
        self.bytes_derived += len as u64;
    }

    /// Classify a failed operation by error kind.
    pub fn add_failure(&mut self, err: &CoseError) {
        match err {
            CoseError::SignatureInvalid => self.signatures_rejected += 1,
            CoseError::AuthenticationFailed => self.auth_failures += 1,
            CoseError::DecodingMalformed(_) => self.decode_failures += 1,
            _ => self.other_failures += 1,
        }
    }

    /// Total operations attempted, successful or not.
    pub fn total_operations(&self) -> u64 {
        self.messages_signed
            + self.signatures_verified
            + self.signatures_rejected
            + self.messages_encrypted
            + self.messages_decrypted
            + self.keys_derived
            + self.auth_failures
            + self.decode_failures
            + self.other_failures
    }

    // Counters from independent engines are merged, never shared.
    pub fn merge(&mut self, other: &TelemetryCounters) {
        *self += other.clone();
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.messages_signed     += rhs.messages_signed;
        self.signatures_verified += rhs.signatures_verified;
        self.signatures_rejected += rhs.signatures_rejected;
        self.messages_encrypted  += rhs.messages_encrypted;
        self.messages_decrypted  += rhs.messages_decrypted;
        self.keys_derived        += rhs.keys_derived;

        self.auth_failures       += rhs.auth_failures;
        self.decode_failures     += rhs.decode_failures;
        self.other_failures      += rhs.other_failures;

        self.bytes_wire_out      += rhs.bytes_wire_out;
        self.bytes_wire_in       += rhs.bytes_wire_in;
        self.bytes_payload       += rhs.bytes_payload;
        self.bytes_derived       += rhs.bytes_derived;
    }
}
