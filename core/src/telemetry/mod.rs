// ## src/telemetry/mod.rs

//! telemetry/mod.rs
//! Non-secret observability for the COSE layer: counters and immutable snapshots.
//!
//! Notes:
//! - Only structural facts are recorded (operation counts, outcome kinds,
//!   byte lengths). Never key, plaintext, ciphertext, or signature bytes.
//! - Counters are plain values owned by one engine; independent engines merge
//!   them instead of sharing, so no locks or atomics are needed.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
