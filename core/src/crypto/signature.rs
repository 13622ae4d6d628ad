// ## 📂 File: `src/crypto/signature.rs`

//! crypto/signature.rs
//! DER `ECDSA-Sig-Value` → fixed `r || s`.
//!
//! ```text
//! 30 L  02 Lr <r bytes>  02 Ls <s bytes>
//! ```
//!
//! Design notes:
//! - All length fields are untrusted; every read is bounds-checked.
//! - P-256 signatures never need long-form lengths, so they are rejected.
//! - Component envelope: 1..=32 bytes (left-padded to 32), or 33 bytes with a
//!   leading 0x00 sign byte (stripped). Anything else is rejected.
//! - The sequence must be consumed exactly.

use crate::constants::{MAX_DER_SIGNATURE_LEN, SCALAR_LEN, SIGNATURE_LEN};
use crate::types::CoseError;

const DER_SEQUENCE: u8 = 0x30;
const DER_INTEGER: u8 = 0x02;

struct DerReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> DerReader<'a> {
    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn byte(&mut self, what: &str) -> Result<u8, CoseError> {
        let b = *self
            .buf
            .get(self.pos)
            .ok_or_else(|| CoseError::malformed(format!("DER signature truncated at {}", what)))?;
        self.pos += 1;
        Ok(b)
    }

    fn expect(&mut self, tag: u8, what: &str) -> Result<(), CoseError> {
        let b = self.byte(what)?;
        if b != tag {
            return Err(CoseError::malformed(format!(
                "DER signature: expected {} (0x{:02x}), found 0x{:02x}",
                what, tag, b
            )));
        }
        Ok(())
    }

    fn length(&mut self, what: &str) -> Result<usize, CoseError> {
        let b = self.byte(what)?;
        if b & 0x80 != 0 {
            return Err(CoseError::malformed(format!("DER signature: long-form length for {}", what)));
        }
        Ok(usize::from(b))
    }

    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8], CoseError> {
        if n > self.remaining() {
            return Err(CoseError::malformed(format!(
                "DER signature: {} claims {} bytes, {} left",
                what,
                n,
                self.remaining()
            )));
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn integer(&mut self, what: &str) -> Result<&'a [u8], CoseError> {
        self.expect(DER_INTEGER, what)?;
        let len = self.length(what)?;
        self.take(len, what)
    }
}

/// Place one DER integer into a 32-byte big-endian slot.
fn place_scalar(component: &[u8], dst: &mut [u8], what: &str) -> Result<(), CoseError> {
    debug_assert_eq!(dst.len(), SCALAR_LEN);
    match component.len() {
        n @ 1..=SCALAR_LEN => {
            dst[..SCALAR_LEN - n].fill(0);
            dst[SCALAR_LEN - n..].copy_from_slice(component);
            Ok(())
        }
        n if n == SCALAR_LEN + 1 && component[0] == 0x00 => {
            dst.copy_from_slice(&component[1..]);
            Ok(())
        }
        n => Err(CoseError::malformed(format!(
            "DER signature: {} component of {} bytes outside envelope",
            what, n
        ))),
    }
}

/// Normalize a DER signature into the 64-byte `r || s` form.
///
/// # Errors
/// - `DecodingMalformed` on any structural or envelope violation.
pub fn der_to_raw(der: &[u8]) -> Result<[u8; SIGNATURE_LEN], CoseError> {
    if der.len() > MAX_DER_SIGNATURE_LEN {
        return Err(CoseError::malformed(format!(
            "DER signature of {} bytes exceeds {}",
            der.len(),
            MAX_DER_SIGNATURE_LEN
        )));
    }

    let mut reader = DerReader { buf: der, pos: 0 };
    reader.expect(DER_SEQUENCE, "sequence")?;
    let seq_len = reader.length("sequence")?;
    if seq_len != reader.remaining() {
        return Err(CoseError::malformed(format!(
            "DER signature: sequence length {} but {} bytes follow",
            seq_len,
            reader.remaining()
        )));
    }

    let r = reader.integer("r")?;
    let s = reader.integer("s")?;
    if reader.remaining() != 0 {
        return Err(CoseError::malformed("DER signature: trailing bytes"));
    }

    let mut raw = [0u8; SIGNATURE_LEN];
    let (r_dst, s_dst) = raw.split_at_mut(SCALAR_LEN);
    place_scalar(r, r_dst, "r")?;
    place_scalar(s, s_dst, "s")?;
    Ok(raw)
}

/// Split a raw signature into its scalars.
pub fn split_scalars(raw: &[u8; SIGNATURE_LEN]) -> ([u8; SCALAR_LEN], [u8; SCALAR_LEN]) {
    let mut r = [0u8; SCALAR_LEN];
    let mut s = [0u8; SCALAR_LEN];
    r.copy_from_slice(&raw[..SCALAR_LEN]);
    s.copy_from_slice(&raw[SCALAR_LEN..]);
    (r, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn der(r: &[u8], s: &[u8]) -> Vec<u8> {
        let mut out = vec![DER_SEQUENCE, (4 + r.len() + s.len()) as u8];
        out.extend_from_slice(&[DER_INTEGER, r.len() as u8]);
        out.extend_from_slice(r);
        out.extend_from_slice(&[DER_INTEGER, s.len() as u8]);
        out.extend_from_slice(s);
        out
    }

    #[test]
    fn plain_32_byte_components() {
        let raw = der_to_raw(&der(&[0x11; 32], &[0x22; 32])).unwrap();
        assert_eq!(&raw[..32], &[0x11; 32]);
        assert_eq!(&raw[32..], &[0x22; 32]);
    }

    #[test]
    fn sign_byte_is_stripped() {
        let mut r = vec![0x00];
        r.extend_from_slice(&[0x90; 32]);
        let raw = der_to_raw(&der(&r, &[0x01; 32])).unwrap();
        assert_eq!(&raw[..32], &[0x90; 32]);
    }

    #[test]
    fn short_component_is_left_padded() {
        let raw = der_to_raw(&der(&[0x7f; 31], &[0x33; 32])).unwrap();
        assert_eq!(raw[0], 0x00);
        assert_eq!(&raw[1..32], &[0x7f; 31]);
    }

    #[test]
    fn oversized_or_unsigned_prefix_rejected() {
        assert!(der_to_raw(&der(&[0x01; 33], &[0x01; 32])).is_err());
        assert!(der_to_raw(&der(&[0x01; 32], &[0x00; 34])).is_err());
        assert!(der_to_raw(&der(&[], &[0x01; 32])).is_err());
    }

    #[test]
    fn lying_lengths_rejected() {
        let mut bad = der(&[0x11; 32], &[0x22; 32]);
        bad[3] = 0x50; // r claims more bytes than exist
        assert!(matches!(der_to_raw(&bad), Err(CoseError::DecodingMalformed(_))));

        let mut bad = der(&[0x11; 32], &[0x22; 32]);
        bad[1] += 1;
        assert!(der_to_raw(&bad).is_err());

        assert!(der_to_raw(&[0x30]).is_err());
        assert!(der_to_raw(&[]).is_err());
    }
}
