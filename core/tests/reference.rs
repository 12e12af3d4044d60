//! Regression tests against the recorded reference asset.
//! `assets/reference.mxf` holds five KLV packets: header partition pack,
//! primer pack, fill item, one essence element and footer partition pack.

use std::io::Cursor;

use color_eyre::Result;
use mxf_digest_core::{
    digest_klv_stream, digest_mxf, mxf_digest_file, parse_urn, run_in::MAX_RUN_IN,
    urn::URN_LENGTH, MxfDigestError,
};
use proptest::prelude::*;

const REFERENCE: &[u8] = include_bytes!("assets/reference.mxf");
const REFERENCE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/assets/reference.mxf");
const REFERENCE_URN: &str = "urn:smpte:mxf-digest:2yPHjytQwLkxapocrQBE1nAUxjZGgTGyhG3yeBWyMJ9LCHjCJrSrp41MWmTXPbrJBGKAmRSEJXDYLv4mKPyuztY9";
const REFERENCE_HEX: &str = "62a402c24f06240ccd7288568248d17ac0bc461260d3238d9e572c92c9dc562244523c6195c6364ffbc12921cdd6e39f7fd30edc251849ef4f9c376bd003f6e2";
const EMPTY_URN: &str = "urn:smpte:mxf-digest:59dsjfscH38cYeXXYogktxf4Cd9ibshE3BHUo6a58hBXmRQdZrAkZzsWcbWtDg5oQstpDuni4Hirj75GEmTc1sFT";

// offset of the 300-byte essence value inside the asset
const ESSENCE_VALUE_OFFSET: usize = 252;

#[test]
fn test_reference_file() -> Result<()> {
    let digest = mxf_digest_file(REFERENCE_PATH)?;

    assert_eq!(digest.to_urn(), REFERENCE_URN);
    assert_eq!(digest.to_hex(), REFERENCE_HEX);
    assert_eq!(digest.run_in, 0);
    assert_eq!(digest.packets.len(), 5);

    let lengths: Vec<u64> = digest.packets.iter().map(|p| p.length).collect();
    assert_eq!(lengths, vec![88, 44, 37, 300, 88]);

    let widths: Vec<usize> = digest.packets.iter().map(|p| p.length_width).collect();
    assert_eq!(widths, vec![5, 5, 4, 5, 5]);

    assert_eq!(parse_urn(REFERENCE_URN)?, digest.digest);
    Ok(())
}

#[test]
fn test_deterministic() -> Result<()> {
    let a = digest_mxf(&mut Cursor::new(REFERENCE))?;
    let b = digest_mxf(&mut Cursor::new(REFERENCE))?;
    assert_eq!(a.to_urn(), b.to_urn());
    assert_eq!(a.packets, b.packets);
    Ok(())
}

#[test]
fn test_essence_value_offset() -> Result<()> {
    let digest = digest_mxf(&mut Cursor::new(REFERENCE))?;
    let essence = &digest.packets[3];
    assert_eq!(
        (essence.offset + 16 + essence.length_width as u64) as usize,
        ESSENCE_VALUE_OFFSET
    );
    Ok(())
}

#[test]
fn test_value_byte_change_changes_digest() -> Result<()> {
    let mut changed = REFERENCE.to_vec();
    changed[ESSENCE_VALUE_OFFSET + 17] ^= 0x01;

    let original = digest_mxf(&mut Cursor::new(REFERENCE))?;
    let modified = digest_mxf(&mut Cursor::new(changed))?;

    assert_ne!(original.digest, modified.digest);
    // only the essence packet's own digest moves
    for (i, (a, b)) in original.packets.iter().zip(&modified.packets).enumerate() {
        assert_eq!(a.digest == b.digest, i != 3);
    }
    Ok(())
}

#[test]
fn test_empty_klv_stream() -> Result<()> {
    let digest = digest_klv_stream(&mut Cursor::new(Vec::new()))?;
    assert_eq!(digest.to_urn(), EMPTY_URN);
    assert_eq!(digest.to_urn().len(), URN_LENGTH);
    Ok(())
}

#[test]
fn test_truncated_reference() {
    let mut bytes = REFERENCE.to_vec();
    bytes.extend_from_slice(&[0x06, 0x0E]);
    assert!(matches!(
        digest_mxf(&mut Cursor::new(bytes)),
        Err(MxfDigestError::StreamTruncated(_))
    ));

    let cut = &REFERENCE[..REFERENCE.len() - 10];
    assert!(matches!(
        digest_mxf(&mut Cursor::new(cut)),
        Err(MxfDigestError::StreamTruncated(_))
    ));
}

#[test]
fn test_run_in_too_long() {
    let mut bytes = vec![0u8; MAX_RUN_IN];
    bytes.extend_from_slice(REFERENCE);
    assert!(matches!(
        digest_mxf(&mut Cursor::new(bytes)),
        Err(MxfDigestError::RunInNotFound(_))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Run-in without a 0x06 byte can never contain the marker.
    #[test]
    fn run_in_does_not_change_digest(
        run_in in prop::collection::vec(
            any::<u8>().prop_map(|b| if b == 0x06 { 0x07 } else { b }),
            0..4096,
        )
    ) {
        let mut bytes = run_in.clone();
        bytes.extend_from_slice(REFERENCE);

        let digest = digest_mxf(&mut Cursor::new(bytes)).unwrap();
        prop_assert_eq!(digest.to_urn(), REFERENCE_URN);
        prop_assert_eq!(digest.run_in, run_in.len() as u64);
    }
}
