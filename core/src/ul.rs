//! SMPTE Universal Labels used as KLV keys.

use std::fmt;
use std::io::{self, Read};

use crate::error::{MxfDigestError, Result};

pub const UL_LENGTH: usize = 16;

/// Registration prefix shared by every SMPTE UL.
pub const SMPTE_UL_PREFIX: [u8; 4] = [0x06, 0x0E, 0x2B, 0x34];

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniversalLabel(pub [u8; UL_LENGTH]);

impl UniversalLabel {
    pub fn as_bytes(&self) -> &[u8; UL_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for UniversalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UniversalLabel({})", self.to_hex())
    }
}

impl fmt::Display for UniversalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chunk) in self.0.chunks(4).enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&hex::encode(chunk))?;
        }
        Ok(())
    }
}

/// Reads the next key.
///
/// `Ok(None)` means the stream was exactly at end-of-input, which is how a
/// KLV sequence normally ends. A partial key is `StreamTruncated`; four
/// bytes that are not the SMPTE prefix are `InvalidUniversalLabel`.
pub fn decode_ul<R: Read>(reader: &mut R) -> Result<Option<UniversalLabel>> {
    let mut key = [0u8; UL_LENGTH];

    let got = read_up_to(reader, &mut key[..4])?;
    match got {
        0 => return Ok(None),
        4 => {}
        _ => return Err(MxfDigestError::StreamTruncated("partial key at end of stream")),
    }

    if key[..4] != SMPTE_UL_PREFIX {
        let mut prefix = [0u8; 4];
        prefix.copy_from_slice(&key[..4]);
        return Err(MxfDigestError::InvalidUniversalLabel(prefix));
    }

    reader
        .read_exact(&mut key[4..])
        .map_err(|e| MxfDigestError::from_read(e, "partial key at end of stream"))?;

    Ok(Some(UniversalLabel(key)))
}

/// Like `read_exact`, but reports how many bytes arrived before EOF.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
