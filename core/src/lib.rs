//! cose-core
//!
//! COSE message layer for a lightweight three-message key exchange:
//! Sign1 (ES256), Encrypt0 (AES-CCM-64-64-128) and HKDF-SHA-256 key derivation.
//! No Python, no PyO3, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;

// Encoding
pub mod cbor;
pub mod structures;

// Crypto backend
pub mod crypto;

// Message layers
pub mod sign1;
pub mod encrypt0;
pub mod kdf;

// Orchestrator surface
pub mod engine;
pub mod session;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::CoseConfig;
    pub use crate::crypto::{CryptoProvider, ProviderError, RustCryptoProvider};
    pub use crate::engine::CoseEngine;
    pub use crate::session::{
        AbortReason, HandshakeSession, HandshakeState, MessageKind, Role, SessionError,
    };
    pub use crate::telemetry::{TelemetryCounters, TelemetrySnapshot};
    pub use crate::types::{CoseAlgorithm, CoseError, DecodedEncrypt0, DecodedSign1, Sign1Message};
}
