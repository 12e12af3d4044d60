use clap::Parser;
use color_eyre::eyre::{bail, Context, Result};
use mxf_digest_core::{mxf_digest_file, MxfDigest};
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Prints the mxf-digest URN of each file", long_about = None)]
struct Cli {
    /// MXF files to digest
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,
}

/// `(<path>) <urn>`
fn digest_line(path: &Path, digest: &MxfDigest) -> String {
    format!("({}) {}", path.display(), digest.to_urn())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let mut failed = 0;
    for file in &cli.files {
        match mxf_digest_file(file).wrap_err_with(|| format!("digesting {}", file.display())) {
            Ok(digest) => println!("{}", digest_line(file, &digest)),
            Err(e) => {
                error!(path = %file.display(), "{:?}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} files failed", failed, cli.files.len());
    }
    Ok(())
}
