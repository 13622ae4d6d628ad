// ## 📂 File: `src/cbor/encode.rs`
//! src/cbor/encode.rs
//!
//! Encoding helpers.

use std::io::Cursor;
use ciborium::value::{Integer, Value};

use crate::types::CoseError;

/// Serialize `value` into `out`, returning the number of bytes written.
///
/// # Errors
/// - `CoseError::EncodingOverflow` if `out` cannot hold the whole encoding.
pub fn encode_into(value: &Value, out: &mut [u8]) -> Result<usize, CoseError> {
    let capacity = out.len();
    let mut cursor = Cursor::new(out);

    // A full in-memory slice is the only way the writer can fail here.
    ciborium::ser::into_writer(value, &mut cursor)
        .map_err(|_| CoseError::EncodingOverflow { capacity })?;

    let written = usize::try_from(cursor.position())
        .map_err(|_| CoseError::EncodingOverflow { capacity })?;
    debug_assert!(written <= capacity);
    Ok(written)
}

/// Serialize `value` into a fresh buffer bounded by `max_len`.
pub fn encode_bounded(value: &Value, max_len: usize) -> Result<Vec<u8>, CoseError> {
    let mut buf = vec![0u8; max_len];
    let n = encode_into(value, &mut buf)?;
    buf.truncate(n);
    Ok(buf)
}

#[inline]
pub fn bstr(b: &[u8]) -> Value {
    Value::Bytes(b.to_vec())
}

#[inline]
pub fn tstr(s: &str) -> Value {
    Value::Text(s.to_owned())
}

#[inline]
pub fn uint(v: u64) -> Value {
    Value::Integer(Integer::from(v))
}

#[inline]
pub fn int(v: i64) -> Value {
    Value::Integer(Integer::from(v))
}

/// `tag(array)`, the outer shape of both COSE wire messages.
#[inline]
pub fn tagged_array(tag: u64, items: Vec<Value>) -> Value {
    Value::Tag(tag, Box::new(Value::Array(items)))
}
