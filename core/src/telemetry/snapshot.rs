// ## src/telemetry/snapshot.rs

//! telemetry/snapshot.rs
//!
//! Immutable view of the counters plus derived ratios, serializable for
//! whoever drives the handshake (logs, diagnostics endpoints).

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub counters: TelemetryCounters,
    pub total_operations: u64,
    /// Rejected signatures over all completed verifications.
    pub signature_rejection_ratio: f64,
    /// AEAD failures over all decrypt attempts that reached the AEAD.
    pub auth_failure_ratio: f64,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters) -> Self {
        let verifications = counters.signatures_verified + counters.signatures_rejected;
        let signature_rejection_ratio = if verifications > 0 {
            counters.signatures_rejected as f64 / verifications as f64
        } else {
            0.0
        };

        let opens = counters.messages_decrypted + counters.auth_failures;
        let auth_failure_ratio = if opens > 0 {
            counters.auth_failures as f64 / opens as f64
        } else {
            0.0
        };

        Self {
            counters: counters.clone(),
            total_operations: counters.total_operations(),
            signature_rejection_ratio,
            auth_failure_ratio,
        }
    }

    /// Internal invariants:
    /// - ratios within [0, 1]
    /// - total equals the per-kind sum
    pub fn sanity_check(&self) -> bool {
        (0.0..=1.0).contains(&self.signature_rejection_ratio)
            && (0.0..=1.0).contains(&self.auth_failure_ratio)
            && self.total_operations == self.counters.total_operations()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
