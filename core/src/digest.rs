//! Packet digests and the sequence digest over them.
//!
//! Each packet is hashed over its exact bytes, key and length field
//! included, so two files that differ only in how a length is BER-encoded
//! produce different digests. The sequence digest is SHA-512 over the raw
//! concatenation of the per-packet digests.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use digest::Digest;
use sha2::Sha512;
use tracing::debug;

use crate::error::{MxfDigestError, Result};
use crate::klv::KlvParser;
use crate::run_in::skip_run_in;
use crate::ul::{UniversalLabel, UL_LENGTH};
use crate::urn::encode_urn;

pub const DIGEST_LENGTH: usize = 64;

pub type Sha512Digest = [u8; DIGEST_LENGTH];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PacketDigest {
    /// Stream offset of the first key byte.
    pub offset: u64,
    pub key: UniversalLabel,
    /// Bytes taken by the BER length field.
    pub length_width: usize,
    pub length: u64,
    pub digest: Sha512Digest,
}

impl PacketDigest {
    /// Key, length field and value.
    pub fn total_size(&self) -> u64 {
        (UL_LENGTH + self.length_width) as u64 + self.length
    }
}

#[derive(Clone, Debug)]
pub struct MxfDigest {
    pub digest: Sha512Digest,
    /// Bytes skipped before the first partition pack.
    pub run_in: u64,
    pub packets: Vec<PacketDigest>,
}

impl MxfDigest {
    pub fn to_urn(&self) -> String {
        encode_urn(&self.digest)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

/// Digests every packet from the current position to end of stream.
pub fn digest_packets<R: Read + Seek>(reader: &mut R) -> Result<Vec<PacketDigest>> {
    let mut start = reader.stream_position()?;
    let mut packets = Vec::new();

    let mut parser = KlvParser::new(reader);
    while let Some(header) = parser.next() {
        let header = header?;
        let reader = parser.reader();

        let value_start = reader.stream_position()?;
        let end = value_start
            .checked_add(header.length)
            .ok_or(MxfDigestError::StreamTruncated("packet value"))?;

        // re-read from the key so the hash covers the bytes as stored
        reader.seek(SeekFrom::Start(start))?;
        let span = end - start;
        let mut hasher = Sha512::new();
        let copied = io::copy(&mut (&mut *reader).take(span), &mut hasher)?;
        if copied != span {
            return Err(MxfDigestError::StreamTruncated("packet value"));
        }

        let packet = PacketDigest {
            offset: start,
            key: header.key,
            length_width: (value_start - start) as usize - UL_LENGTH,
            length: header.length,
            digest: finish(hasher),
        };
        debug!(
            offset = packet.offset,
            key = %packet.key,
            length = packet.length,
            "digested packet"
        );
        packets.push(packet);

        start = end;
    }

    Ok(packets)
}

/// SHA-512 over the concatenated digests, in order. No digests at all is
/// the hash of the empty sequence.
pub fn aggregate_digests<'a, I>(digests: I) -> Sha512Digest
where
    I: IntoIterator<Item = &'a Sha512Digest>,
{
    let mut hasher = Sha512::new();
    for d in digests {
        hasher.update(d);
    }
    finish(hasher)
}

/// Digests a KLV stream starting at the current position, without looking
/// for run-in.
pub fn digest_klv_stream<R: Read + Seek>(reader: &mut R) -> Result<MxfDigest> {
    let packets = digest_packets(reader)?;
    let digest = aggregate_digests(packets.iter().map(|p| &p.digest));
    Ok(MxfDigest {
        digest,
        run_in: 0,
        packets,
    })
}

/// Skips run-in, then digests the remaining KLV stream.
pub fn digest_mxf<R: Read + Seek>(reader: &mut R) -> Result<MxfDigest> {
    let run_in = skip_run_in(reader)?;
    let mut digest = digest_klv_stream(reader)?;
    digest.run_in = run_in;
    Ok(digest)
}

pub fn mxf_digest_file<P: AsRef<Path>>(path: P) -> Result<MxfDigest> {
    let f = File::open(path)?;
    let mut reader = BufReader::new(f);
    digest_mxf(&mut reader)
}

fn finish(hasher: Sha512) -> Sha512Digest {
    let mut out = [0u8; DIGEST_LENGTH];
    out.copy_from_slice(&hasher.finalize());
    out
}
