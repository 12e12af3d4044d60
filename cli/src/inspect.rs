use color_eyre::eyre::{Context, Result};
use mxf_digest_core::{mxf_digest_file, MxfDigest};
use std::fmt::{self, Write};
use std::path::Path;

/// Digest prefix shown per packet, in hex characters.
const DIGEST_PREFIX_LEN: usize = 16;

pub fn format_inspection(digest: &MxfDigest) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "run-in: {} bytes", digest.run_in)?;
    writeln!(
        out,
        "{:>12}  {:<35}  {:>3}  {:>12}  {}",
        "offset", "key", "ber", "length", "sha512"
    )?;
    for p in &digest.packets {
        writeln!(
            out,
            "{:>12}  {:<35}  {:>3}  {:>12}  {}",
            p.offset,
            p.key.to_string(),
            p.length_width,
            p.length,
            &hex::encode(p.digest)[..DIGEST_PREFIX_LEN]
        )?;
    }
    write!(out, "{}", digest.to_urn())?;
    Ok(out)
}

pub fn handle_inspect(file: &Path) -> Result<()> {
    let digest =
        mxf_digest_file(file).wrap_err_with(|| format!("digesting {}", file.display()))?;
    println!("{}", format_inspection(&digest)?);
    Ok(())
}
