//! BER length fields as used by KLV (SMPTE ST 336).
//!
//! Short form: one byte `0..=0x7F` holding the value.
//! Long form: `0x80 | n` followed by `n` big-endian value bytes.

use std::io::{self, Read};

use crate::error::{MxfDigestError, Result};

/// Decodes one BER length from `reader`.
///
/// Returns the decoded value and the number of bytes consumed. A missing
/// first byte is `StreamTruncated`. A short long-form tail, the indefinite
/// form `0x80` and values wider than 64 bits are `MalformedLength`.
pub fn decode_ber_length<R: Read>(reader: &mut R) -> Result<(u64, usize)> {
    let mut first = [0u8; 1];
    reader
        .read_exact(&mut first)
        .map_err(|e| MxfDigestError::from_read(e, "missing length field"))?;

    let first = first[0];
    if first < 0x80 {
        return Ok((u64::from(first), 1));
    }

    let n = usize::from(first & 0x7F);
    if n == 0 {
        return Err(MxfDigestError::MalformedLength("indefinite form is not allowed"));
    }

    let mut buf = [0u8; 127];
    let buf = &mut buf[..n];
    reader.read_exact(buf).map_err(truncated)?;

    let mut value: u64 = 0;
    for &b in buf.iter() {
        if value >> 56 != 0 {
            return Err(MxfDigestError::MalformedLength("value exceeds 64 bits"));
        }
        value = (value << 8) | u64::from(b);
    }

    Ok((value, 1 + n))
}

fn truncated(err: io::Error) -> MxfDigestError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        MxfDigestError::MalformedLength("length field truncated")
    } else {
        MxfDigestError::Io(err)
    }
}

/// Minimal BER encoding of `value`.
pub fn encode_ber_length(value: u64) -> Vec<u8> {
    if value < 0x80 {
        return vec![value as u8];
    }

    let bytes = value.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let significant = &bytes[skip..];

    let mut out = Vec::with_capacity(1 + significant.len());
    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
    out
}
