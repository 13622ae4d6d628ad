// ## src/cbor/mod.rs

//! cbor/mod.rs
//! Bounded CBOR encoding and strict CBOR decoding on top of `ciborium`.
//!
//! Notes:
//! - Encoding writes into a caller-owned slice. Running out of room is an
//!   `EncodingOverflow`, never a truncated item.
//! - `ciborium` emits definite lengths and minimal heads, so the bytes are the
//!   deterministic form required by the canonical structures.
//! - Decoding rejects trailing bytes after the top-level item.
//! - Wire messages are read header by header (`WireReader`) so that each
//!   byte string lands in one fallibly reserved buffer owned by the caller.

pub mod encode;
pub mod decode;
pub mod wire;

pub use encode::*;
pub use decode::*;
pub use wire::WireReader;

pub use ciborium::value::Value;
