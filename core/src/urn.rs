//! `urn:smpte:mxf-digest:` rendering of a sequence digest.
//!
//! The digest is read as one big-endian integer, written in base 58 and
//! left-padded with `'1'` (digit zero) to a fixed width of 88, enough for
//! any 512-bit value.

use num_bigint::BigUint;

use crate::digest::{Sha512Digest, DIGEST_LENGTH};
use crate::error::{MxfDigestError, Result};

pub const URN_PREFIX: &str = "urn:smpte:mxf-digest:";

/// Base-58 digits: no `0`, `O`, `I` or `l`.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

pub const ENCODED_WIDTH: usize = 88;

pub const URN_LENGTH: usize = URN_PREFIX.len() + ENCODED_WIDTH;

pub fn encode_urn(digest: &Sha512Digest) -> String {
    let value = BigUint::from_bytes_be(digest);

    // zero has no digits; padding alone renders it
    let digits = if value.bits() == 0 {
        Vec::new()
    } else {
        value.to_radix_be(58)
    };

    let mut urn = String::with_capacity(URN_LENGTH);
    urn.push_str(URN_PREFIX);
    for _ in digits.len()..ENCODED_WIDTH {
        urn.push(ALPHABET[0] as char);
    }
    for d in digits {
        urn.push(ALPHABET[usize::from(d)] as char);
    }
    urn
}

/// Recovers the digest from a URN produced by [`encode_urn`].
pub fn parse_urn(urn: &str) -> Result<Sha512Digest> {
    let encoded = urn
        .strip_prefix(URN_PREFIX)
        .ok_or_else(|| MxfDigestError::InvalidUrn(format!("missing prefix {URN_PREFIX}")))?;

    if encoded.len() != ENCODED_WIDTH {
        return Err(MxfDigestError::InvalidUrn(format!(
            "expected {} digits, found {}",
            ENCODED_WIDTH,
            encoded.len()
        )));
    }

    let mut digits = Vec::with_capacity(ENCODED_WIDTH);
    for c in encoded.bytes() {
        let d = ALPHABET
            .iter()
            .position(|&a| a == c)
            .ok_or_else(|| MxfDigestError::InvalidUrn(format!("invalid digit {:?}", c as char)))?;
        digits.push(d as u8);
    }

    let value = BigUint::from_radix_be(&digits, 58)
        .ok_or_else(|| MxfDigestError::InvalidUrn("invalid digits".to_string()))?;
    if value.bits() > (DIGEST_LENGTH * 8) as u64 {
        return Err(MxfDigestError::InvalidUrn(
            "value exceeds 512 bits".to_string(),
        ));
    }

    let mut digest = [0u8; DIGEST_LENGTH];
    if value.bits() > 0 {
        let bytes = value.to_bytes_be();
        digest[DIGEST_LENGTH - bytes.len()..].copy_from_slice(&bytes);
    }
    Ok(digest)
}
