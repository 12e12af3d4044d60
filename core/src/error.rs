use std::io;

use thiserror::Error;

pub type Result<T, E = MxfDigestError> = std::result::Result<T, E>;

/// Every failure is fatal for the file being digested; there is no
/// partial digest.
#[derive(Debug, Error)]
pub enum MxfDigestError {
    #[error("stream truncated: {0}")]
    StreamTruncated(&'static str),

    #[error("invalid universal label prefix {}", hex::encode(.0))]
    InvalidUniversalLabel([u8; 4]),

    #[error("malformed BER length: {0}")]
    MalformedLength(&'static str),

    #[error("partition pack marker not found within the first {0} bytes")]
    RunInNotFound(usize),

    #[error("invalid mxf-digest urn: {0}")]
    InvalidUrn(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl MxfDigestError {
    /// Maps an end-of-input condition to `StreamTruncated`, leaving every
    /// other I/O failure as `Io`.
    pub(crate) fn from_read(err: io::Error, field: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::StreamTruncated(field)
        } else {
            Self::Io(err)
        }
    }
}
