pub mod ber;
pub mod digest;
pub mod error;
pub mod klv;
pub mod run_in;
pub mod ul;
pub mod urn;

pub use crate::digest::{
    digest_klv_stream, digest_mxf, mxf_digest_file, MxfDigest, PacketDigest, Sha512Digest,
};
pub use crate::error::{MxfDigestError, Result};
pub use crate::urn::{encode_urn, parse_urn};
