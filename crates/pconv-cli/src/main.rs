//! pconv - parallel convolution filters for images
//!
//! Loads a PNG or JPEG, convolves its color channels on a pool of worker
//! threads and writes the result.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "pconv")]
#[command(author, version, about = "Parallel 2D convolution filters for PNG/JPEG images")]
#[command(long_about = "
Applies integer convolution kernels to 8-bit gray, RGB and RGBA images.
Rows are split across worker threads; alpha is left untouched.

Examples:
  pconv sharpen photo.jpg -o sharp.png          # Fixed 3x3 sharpen
  pconv -j 8 sharpen photo.png -o out.png -a 2  # Stronger, 8 threads
  pconv filter photo.png -o relief.png -p emboss
  pconv convolve in.png -o out.png -k \"1,2,1; 2,4,2; 1,2,1\"
  pconv info a.png b.jpg
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of worker threads
    #[arg(short = 'j', long, global = true, default_value_t = 4, env = "PCONV_THREADS")]
    threads: usize,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Suppress the per-image summary line
    #[arg(short, long, global = true)]
    quiet: bool,

    /// JPEG output quality
    #[arg(long, global = true, default_value_t = pconv_io::jpeg::DEFAULT_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the 3x3 sharpen kernel
    Sharpen(SharpenArgs),

    /// Apply a named filter preset
    #[command(visible_alias = "f")]
    Filter(FilterArgs),

    /// Apply a custom kernel
    Convolve(ConvolveArgs),

    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

/// Arguments for the `sharpen` command.
#[derive(Args)]
struct SharpenArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Sharpen amount (1 = center 5, neighbors -1)
    #[arg(short, long, default_value_t = 1)]
    amount: u8,
}

/// Arguments for the `filter` command.
#[derive(Args)]
struct FilterArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Preset: sharpen, edge, emboss, identity
    #[arg(short, long, default_value = "sharpen")]
    preset: String,
}

/// Arguments for the `convolve` command.
#[derive(Args)]
struct ConvolveArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Kernel rows separated by ';', weights by ',' or spaces
    #[arg(short, long, allow_hyphen_values = true)]
    kernel: String,

    /// Value added to every sample before clamping
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i32,
}

/// Arguments for the `info` command.
#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

/// Settings shared by every filter command.
pub struct RunConfig {
    /// Worker thread count passed to the engine.
    pub threads: usize,
    /// Skip the summary line on stdout.
    pub quiet: bool,
    /// Quality for JPEG outputs.
    pub quality: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = RunConfig {
        threads: cli.threads,
        quiet: cli.quiet,
        quality: cli.quality,
    };

    match cli.command {
        Commands::Sharpen(args) => commands::sharpen::run(args, &config),
        Commands::Filter(args) => commands::filter::run(args, &config),
        Commands::Convolve(args) => commands::convolve::run(args, &config),
        Commands::Info(args) => commands::info::run(args),
    }
}

/// Installs the stderr subscriber and the optional file writer.
///
/// `RUST_LOG` takes precedence over `-v`. The returned guard flushes the
/// file writer when dropped.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(guard)
}
