//! Run-in detection.
//!
//! MXF allows up to 64 KiB of arbitrary bytes before the header partition.
//! The run-in ends at the first Partition Pack key, recognised by its first
//! eleven bytes.

use std::io::{self, Read, Seek, SeekFrom};

use tracing::debug;

use crate::error::{MxfDigestError, Result};

/// UL prefix of the Partition Pack key plus the seven bytes that follow it.
pub const PARTITION_PACK_MARKER: [u8; 11] = [
    0x06, 0x0E, 0x2B, 0x34, 0x02, 0x05, 0x01, 0x01, 0x0D, 0x01, 0x02,
];

/// Upper bound on the bytes scanned while looking for the marker.
pub const MAX_RUN_IN: usize = 65_536;

const SCAN_CHUNK: usize = 8192;

/// Scans forward from the current position for the partition pack marker,
/// then leaves the stream positioned on the marker's first byte.
///
/// Returns the number of run-in bytes that precede the marker.
pub fn skip_run_in<R: Read + Seek>(reader: &mut R) -> Result<u64> {
    let origin = reader.stream_position()?;

    let mut buf = [0u8; SCAN_CHUNK];
    let mut scanned = 0usize;
    let mut matched = 0usize;

    while scanned < MAX_RUN_IN {
        let want = SCAN_CHUNK.min(MAX_RUN_IN - scanned);
        let n = match reader.read(&mut buf[..want]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        for (i, &b) in buf[..n].iter().enumerate() {
            // 0x06 only occurs at the head of the marker, so a broken match
            // can only restart at the current byte.
            matched = if b == PARTITION_PACK_MARKER[matched] {
                matched + 1
            } else if b == PARTITION_PACK_MARKER[0] {
                1
            } else {
                0
            };

            if matched == PARTITION_PACK_MARKER.len() {
                let run_in = (scanned + i + 1 - PARTITION_PACK_MARKER.len()) as u64;
                reader.seek(SeekFrom::Start(origin + run_in))?;
                debug!(run_in, "found partition pack marker");
                return Ok(run_in);
            }
        }

        scanned += n;
    }

    Err(MxfDigestError::RunInNotFound(MAX_RUN_IN))
}
