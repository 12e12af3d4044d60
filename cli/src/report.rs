use clap::ValueEnum;
use color_eyre::eyre::{bail, Context, Result};
use mxf_digest_core::{mxf_digest_file, MxfDigest};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `(<path>) <urn>`
    #[default]
    Text,
    /// `(<path>) <sha512 hex>`
    Hex,
    /// one JSON array for all files
    Json,
}

#[derive(Debug, Serialize)]
pub struct DigestReport {
    pub path: PathBuf,
    pub urn: String,
    pub hex: String,
    pub packets: usize,
    pub run_in: u64,
}

impl DigestReport {
    pub fn new(path: &Path, digest: &MxfDigest) -> Self {
        Self {
            path: path.to_path_buf(),
            urn: digest.to_urn(),
            hex: digest.to_hex(),
            packets: digest.packets.len(),
            run_in: digest.run_in,
        }
    }

    fn line(&self, format: OutputFormat) -> String {
        let value = match format {
            OutputFormat::Hex => &self.hex,
            _ => &self.urn,
        };
        format!("({}) {}", self.path.display(), value)
    }
}

pub fn render(reports: &[DigestReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(reports).wrap_err("serializing digest reports to json")
        }
        _ => Ok(reports
            .iter()
            .map(|r| r.line(format))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn handle_digest(files: &[PathBuf], format: OutputFormat) -> Result<()> {
    let mut reports = Vec::with_capacity(files.len());
    let mut failed = 0;

    for file in files {
        match mxf_digest_file(file).wrap_err_with(|| format!("digesting {}", file.display())) {
            Ok(digest) => {
                let report = DigestReport::new(file, &digest);
                // text output streams as it goes; json waits for the array
                if format != OutputFormat::Json {
                    println!("{}", report.line(format));
                }
                reports.push(report);
            }
            Err(e) => {
                error!(path = %file.display(), "{:?}", e);
                failed += 1;
            }
        }
    }

    if format == OutputFormat::Json {
        println!("{}", render(&reports, format)?);
    }

    if failed > 0 {
        bail!("{} of {} files failed", failed, files.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mxf_digest_core::digest_klv_stream;
    use std::io::Cursor;

    fn empty_report() -> DigestReport {
        let digest = digest_klv_stream(&mut Cursor::new(Vec::new())).unwrap();
        DigestReport::new(Path::new("a.mxf"), &digest)
    }

    #[test]
    fn test_text_line() {
        let report = empty_report();
        let text = render(&[report], OutputFormat::Text).unwrap();
        assert!(text.starts_with("(a.mxf) urn:smpte:mxf-digest:"));
    }

    #[test]
    fn test_hex_line() {
        let report = empty_report();
        let text = render(&[report], OutputFormat::Hex).unwrap();
        assert!(text.starts_with("(a.mxf) cf83e1357eefb8bd"));
    }

    #[test]
    fn test_json_array() {
        let reports = vec![empty_report(), empty_report()];
        let json = render(&reports, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["packets"], 0);
        assert_eq!(arr[0]["path"], "a.mxf");
    }
}
