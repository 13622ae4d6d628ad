// ## 📂 File: `src/cbor/wire.rs`
//! src/cbor/wire.rs
//!
//! Header-by-header reader for the tagged COSE wire messages.
//!
//! Design notes:
//! - Built on `ciborium-ll`, the low-level layer under `ciborium`.
//! - Each byte-string length is checked against the bytes actually left in
//!   the input before anything is allocated. A lying length is
//!   `DecodingMalformed`, never an allocation attempt.
//! - The destination buffer is reserved with `try_reserve_exact`; that is the
//!   only allocation per byte string. Failure is `AllocationFailure`.
//! - Only definite-length items are accepted (deterministic encoding).

use ciborium_ll::{Decoder, Header};

use crate::types::CoseError;

/// Chunk size used when streaming a byte string out of the decoder.
const SCRATCH_LEN: usize = 64;

pub struct WireReader<'a> {
    decoder: Decoder<&'a [u8]>,
    len: usize,
}

fn ll_error<E: std::fmt::Debug>(what: &str, e: ciborium_ll::Error<E>) -> CoseError {
    match e {
        ciborium_ll::Error::Io(_) => CoseError::malformed(format!("{}: truncated input", what)),
        ciborium_ll::Error::Syntax(at) => {
            CoseError::malformed(format!("{}: invalid CBOR at offset {}", what, at))
        }
    }
}

impl<'a> WireReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            decoder: Decoder::from(bytes),
            len: bytes.len(),
        }
    }

    fn remaining(&mut self) -> usize {
        self.len.saturating_sub(self.decoder.offset())
    }

    fn pull(&mut self, what: &str) -> Result<Header, CoseError> {
        self.decoder.pull().map_err(|e| ll_error(what, e))
    }

    /// Consume a tag header and check its number.
    pub fn expect_tag(&mut self, tag: u64) -> Result<(), CoseError> {
        match self.pull("tag")? {
            Header::Tag(t) if t == tag => Ok(()),
            Header::Tag(t) => {
                Err(CoseError::malformed(format!("expected tag {}, found tag {}", tag, t)))
            }
            _ => Err(CoseError::malformed(format!("expected tag {}", tag))),
        }
    }

    /// Consume a definite-length array header with exactly `arity` items.
    pub fn expect_array(&mut self, arity: usize) -> Result<(), CoseError> {
        match self.pull("array")? {
            Header::Array(Some(n)) if n == arity => Ok(()),
            Header::Array(Some(n)) => Err(CoseError::malformed(format!(
                "expected array of {} items, found {}",
                arity, n
            ))),
            Header::Array(None) => Err(CoseError::malformed("indefinite-length array")),
            _ => Err(CoseError::malformed("expected array")),
        }
    }

    /// Read a definite-length byte string into a new caller-owned buffer.
    ///
    /// # Errors
    /// - `DecodingMalformed` if the item is not a byte string or claims more
    ///   bytes than the input holds.
    /// - `AllocationFailure` if the buffer cannot be reserved.
    pub fn take_bstr(&mut self, field: &str) -> Result<Vec<u8>, CoseError> {
        let len = match self.pull(field)? {
            Header::Bytes(Some(len)) => len,
            Header::Bytes(None) => {
                return Err(CoseError::malformed(format!("{}: indefinite-length byte string", field)))
            }
            _ => return Err(CoseError::malformed(format!("{}: expected byte string", field))),
        };

        let left = self.remaining();
        if len > left {
            return Err(CoseError::malformed(format!(
                "{}: claims {} bytes, {} left",
                field, len, left
            )));
        }

        let mut dst = Vec::new();
        dst.try_reserve_exact(len)
            .map_err(|_| CoseError::AllocationFailure { requested: len })?;

        let mut scratch = [0u8; SCRATCH_LEN];
        let mut segments = self.decoder.bytes(Some(len));
        while let Some(mut segment) = segments.pull().map_err(|e| ll_error(field, e))? {
            while let Some(chunk) = segment.pull(&mut scratch).map_err(|e| ll_error(field, e))? {
                dst.extend_from_slice(chunk);
            }
        }
        Ok(dst)
    }

    /// Require that the whole input was consumed.
    pub fn finish(mut self) -> Result<(), CoseError> {
        let left = self.remaining();
        if left != 0 {
            return Err(CoseError::malformed(format!(
                "trailing bytes after CBOR item: {} of {} consumed",
                self.len - left,
                self.len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_tagged_byte_strings() {
        // 18([h'01', h''])
        let wire = [0xd2, 0x82, 0x41, 0x01, 0x40];
        let mut r = WireReader::new(&wire);
        r.expect_tag(18).unwrap();
        r.expect_array(2).unwrap();
        assert_eq!(r.take_bstr("a").unwrap(), vec![0x01]);
        assert!(r.take_bstr("b").unwrap().is_empty());
        r.finish().unwrap();
    }

    #[test]
    fn lying_length_is_malformed_before_allocation() {
        // bstr header claiming 2^40 bytes, followed by 2 bytes
        let wire = [0x5b, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0xaa, 0xbb];
        let mut r = WireReader::new(&wire);
        assert!(matches!(r.take_bstr("payload"), Err(CoseError::DecodingMalformed(_))));

        // one byte short
        let wire = [0x43, 0x01, 0x02];
        let mut r = WireReader::new(&wire);
        assert!(matches!(r.take_bstr("payload"), Err(CoseError::DecodingMalformed(_))));
    }

    #[test]
    fn indefinite_and_trailing_rejected() {
        let mut r = WireReader::new(&[0x5f, 0x41, 0x01, 0xff]);
        assert!(matches!(r.take_bstr("x"), Err(CoseError::DecodingMalformed(_))));

        let mut r = WireReader::new(&[0x9f, 0xff]);
        assert!(r.expect_array(0).is_err());

        let mut r = WireReader::new(&[0x40, 0x00]);
        r.take_bstr("x").unwrap();
        assert!(matches!(r.finish(), Err(CoseError::DecodingMalformed(_))));
    }

    #[test]
    fn long_byte_string_spans_many_chunks() {
        let mut wire = vec![0x59, 0x01, 0x2c]; // bstr(300)
        wire.extend((0..300u16).map(|i| i as u8));
        let mut r = WireReader::new(&wire);
        let out = r.take_bstr("x").unwrap();
        assert_eq!(out.len(), 300);
        assert_eq!(out[299], (299u16 & 0xff) as u8);
        r.finish().unwrap();
    }
}
