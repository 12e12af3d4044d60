//! Lazy walk over a KLV stream.

use std::io::Read;

use tracing::trace;

use crate::ber::decode_ber_length;
use crate::error::Result;
use crate::ul::{decode_ul, UniversalLabel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KlvHeader {
    pub key: UniversalLabel,
    pub length: u64,
}

/// Yields the key and length of each packet in turn.
///
/// After an item is yielded the reader sits on the first value byte. The
/// parser never skips values: the caller must consume or seek past
/// `length` bytes before asking for the next item.
pub struct KlvParser<'a, R: Read> {
    reader: &'a mut R,
    done: bool,
}

impl<'a, R: Read> KlvParser<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        KlvParser {
            reader,
            done: false,
        }
    }

    /// Access to the underlying stream between items.
    pub fn reader(&mut self) -> &mut R {
        self.reader
    }
}

impl<R: Read> Iterator for KlvParser<'_, R> {
    type Item = Result<KlvHeader>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let key = match decode_ul(&mut *self.reader) {
            Ok(Some(key)) => key,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        match decode_ber_length(&mut *self.reader) {
            Ok((length, _)) => {
                trace!(%key, length, "klv header");
                Some(Ok(KlvHeader { key, length }))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
