//! `uplink-decode`: decode sensor uplink frames from the command line.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use uplink_cli::{BatchDecoder, CliError, DecoderConfig, OutputFormat};
use uplink_frame::LayoutVersion;

const PKG_DESCRIPTION: &str = concat!(env!("CARGO_PKG_NAME"), " - sensor uplink frame decoder");

#[derive(Debug, Parser)]
#[command(
    name = "uplink-decode",
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = PKG_DESCRIPTION,
)]
struct Cli {
    /// Hex frames (spaces, 0x prefixes and ':' or '-' separators allowed)
    #[arg(value_name = "FRAMES", conflicts_with = "input")]
    frames: Vec<String>,
    /// Layout for every frame (v1 or v2)
    #[arg(short = 'l', long = "layout")]
    layout: Option<LayoutVersion>,
    /// Device whose configured layout applies
    #[arg(short = 'd', long = "device")]
    device: Option<String>,
    /// Path to YAML decoder configuration
    #[arg(short = 'C', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print example configuration and exit
    #[arg(long = "print-config")]
    print_config: bool,
    /// Read frames from a file, one per line ("-" for stdin)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: Option<PathBuf>,
    /// Input lines are JSON uplink objects ({"bytes":[..],"fPort":10})
    #[arg(long = "json-input")]
    json_input: bool,
    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// More logging (repeat for more)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
    /// Write Prometheus metrics to this file after the batch
    #[cfg(feature = "prometheus")]
    #[arg(long = "metrics-out", value_name = "FILE")]
    metrics_out: Option<PathBuf>,
}

impl Cli {
    fn log_filter(&self) -> EnvFilter {
        let level = match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => {
                return EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
            }
            (false, 1) => "info",
            (false, 2) => "debug",
            (false, _) => "trace",
        };
        EnvFilter::new(level)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if cli.print_config {
        print!("{}", DecoderConfig::example_yaml());
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Decode every input line. Returns whether all lines were well-formed.
fn run(cli: &Cli) -> Result<bool, CliError> {
    let config = match &cli.config {
        Some(path) => DecoderConfig::load_from_file(path)?,
        None => DecoderConfig::default(),
    };

    #[cfg(feature = "prometheus")]
    let metrics_handle = match &cli.metrics_out {
        Some(_) => match uplink_metrics::install_prometheus_recorder() {
            Ok(handle) => Some(handle),
            Err(err) => {
                error!("failed to install metrics recorder: {}", err);
                return Ok(false);
            }
        },
        None => None,
    };

    let decoder = BatchDecoder::new(config)
        .with_layout(cli.layout)
        .with_device(cli.device.clone())
        .with_json_input(cli.json_input);

    let stdout = io::stdout();
    let out = stdout.lock();
    let summary = if !cli.frames.is_empty() {
        decoder.run_frames(&cli.frames, out, cli.format)?
    } else {
        match &cli.input {
            Some(path) if path.as_os_str() != "-" => {
                info!(path = %path.display(), "reading frames");
                decoder.run(BufReader::new(File::open(path)?), out, cli.format)?
            }
            _ => decoder.run(io::stdin().lock(), out, cli.format)?,
        }
    };

    info!(
        decoded = summary.decoded,
        malformed = summary.malformed,
        "batch complete"
    );

    #[cfg(feature = "prometheus")]
    {
        if let (Some(handle), Some(path)) = (metrics_handle, &cli.metrics_out) {
            std::fs::write(path, handle.render())?;
            info!(path = %path.display(), "wrote metrics");
        }
    }

    Ok(summary.malformed == 0)
}
