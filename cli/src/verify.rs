use color_eyre::eyre::{bail, Context, Result};
use mxf_digest_core::{mxf_digest_file, parse_urn};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Expected digests, e.g.
///
/// ```toml
/// [[file]]
/// path = "clip.mxf"
/// urn = "urn:smpte:mxf-digest:..."
/// ```
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(rename = "file", default)]
    pub files: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ManifestEntry {
    pub path: PathBuf,
    pub urn: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Match,
    Mismatch { actual: String },
    Error(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Match => write!(f, "OK"),
            Outcome::Mismatch { actual } => write!(f, "MISMATCH {}", actual),
            Outcome::Error(e) => write!(f, "ERROR {}", e),
        }
    }
}

pub fn load_manifest(manifest_path: &Path) -> Result<Manifest> {
    let text = fs::read_to_string(manifest_path)
        .wrap_err_with(|| format!("reading manifest {}", manifest_path.display()))?;
    let manifest: Manifest = toml::from_str(&text).wrap_err("parsing manifest toml")?;

    for entry in &manifest.files {
        parse_urn(&entry.urn)
            .wrap_err_with(|| format!("expected urn for {}", entry.path.display()))?;
    }
    Ok(manifest)
}

/// Relative entries resolve against `base`, normally the manifest's directory.
pub fn verify_manifest(manifest: &Manifest, base: &Path) -> Vec<(PathBuf, Outcome)> {
    manifest
        .files
        .iter()
        .map(|entry| {
            let path = base.join(&entry.path);
            let outcome = match mxf_digest_file(&path) {
                Ok(digest) => {
                    let actual = digest.to_urn();
                    if actual == entry.urn {
                        Outcome::Match
                    } else {
                        Outcome::Mismatch { actual }
                    }
                }
                Err(e) => Outcome::Error(e.to_string()),
            };
            (path, outcome)
        })
        .collect()
}

pub fn handle_verify(manifest_path: &Path) -> Result<()> {
    let manifest = load_manifest(manifest_path)?;
    let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));

    let results = verify_manifest(&manifest, base);
    let mut bad = 0;
    for (path, outcome) in &results {
        println!("({}) {}", path.display(), outcome);
        if *outcome != Outcome::Match {
            bad += 1;
        }
    }

    if bad > 0 {
        bail!("{} of {} files did not verify", bad, results.len());
    }
    Ok(())
}
