// ## 📂 File: `src/cbor/decode.rs`
//! src/cbor/decode.rs
//!
//! Strict `Value` decoding for small inputs (protected headers, structures)
//! and the structural validation helpers that go with it.
//!
//! Design notes:
//! - Length fields inside the input are untrusted; `ciborium` bounds every
//!   read by the input slice, so a short buffer is a decode error.
//! - Structural checks (tag, arity, item type) map to
//!   `CoseError::DecodingMalformed`.
//! - Wire messages do not go through `Value`; see `cbor::wire`.

use std::io::Cursor;
use ciborium::value::Value;

use crate::types::CoseError;

/// Decode exactly one CBOR item from `bytes`.
///
/// # Errors
/// - `DecodingMalformed` on syntax errors, truncation, or trailing bytes.
pub fn decode_value(bytes: &[u8]) -> Result<Value, CoseError> {
    let mut cursor = Cursor::new(bytes);
    let value: Value = ciborium::de::from_reader(&mut cursor)
        .map_err(|e| CoseError::malformed(format!("CBOR decode failed: {}", e)))?;

    let pos = usize::try_from(cursor.position())
        .map_err(|_| CoseError::malformed("cursor position overflow"))?;
    if pos != bytes.len() {
        return Err(CoseError::malformed(format!(
            "trailing bytes after CBOR item: {} of {} consumed",
            pos,
            bytes.len()
        )));
    }
    Ok(value)
}

/// Check that `value` is an array with exactly `arity` items.
pub fn expect_array(value: &Value, arity: usize) -> Result<&[Value], CoseError> {
    match value {
        Value::Array(items) if items.len() == arity => Ok(items.as_slice()),
        Value::Array(items) => Err(CoseError::malformed(format!(
            "expected array of {} items, found {}",
            arity,
            items.len()
        ))),
        _ => Err(CoseError::malformed("expected array")),
    }
}

/// Borrow the contents of a byte string item.
pub fn as_bstr<'v>(value: &'v Value, field: &str) -> Result<&'v [u8], CoseError> {
    match value {
        Value::Bytes(b) => Ok(b.as_slice()),
        _ => Err(CoseError::malformed(format!("{}: expected byte string", field))),
    }
}

/// Read an item as a signed integer.
pub fn as_int(value: &Value, field: &str) -> Result<i128, CoseError> {
    match value {
        Value::Integer(i) => Ok(i128::from(*i)),
        _ => Err(CoseError::malformed(format!("{}: expected integer", field))),
    }
}

/// Read an item as a text string.
pub fn as_tstr<'v>(value: &'v Value, field: &str) -> Result<&'v str, CoseError> {
    match value {
        Value::Text(s) => Ok(s.as_str()),
        _ => Err(CoseError::malformed(format!("{}: expected text string", field))),
    }
}
