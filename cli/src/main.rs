use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod inspect;
mod report;
mod verify;

use report::OutputFormat;

#[derive(Parser)]
#[command(name = "mxf-tool", version, about, long_about = None)]
struct Cli {
    /// log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// prints the mxf-digest of each file
    Digest {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// lists every KLV packet with its digest
    Inspect {
        #[arg(required = true, value_name = "FILE")]
        file: PathBuf,
    },

    /// checks files against a toml manifest of expected urns
    Verify {
        #[arg(required = true, value_name = "FILE")]
        manifest: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

pub fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Digest { files, format } => report::handle_digest(&files, format),
        Commands::Inspect { file } => inspect::handle_inspect(&file),
        Commands::Verify { manifest } => verify::handle_verify(&manifest),
    }
}
