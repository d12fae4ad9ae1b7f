//! spectral-sweep CLI - spectral image variant generator

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;

/// Generate contrast, frequency-boost and phase variants of grayscale images.
#[derive(Parser)]
#[command(name = "spectral-sweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every variant of every image in a directory
    Run {
        /// Directory of source images
        #[arg(short, long, env = "SPECTRAL_SWEEP_INPUT")]
        input: PathBuf,

        /// Directory for variants and manifests
        #[arg(short, long, env = "SPECTRAL_SWEEP_OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        sweep: SweepArgs,

        /// Resize inputs before processing (e.g. 256x256)
        #[arg(long)]
        resize: Option<String>,

        /// Output format (png, tiff, bmp)
        #[arg(long, default_value = "png")]
        format: String,

        /// Seed for phase scrambling (OS entropy if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Skip manifest.csv and manifest.json
        #[arg(long)]
        no_manifest: bool,
    },

    /// List the variant names one source image would produce
    Plan {
        /// Source file stem (e.g. face01)
        #[arg(long, default_value = "image")]
        stem: String,

        #[command(flatten)]
        sweep: SweepArgs,

        /// Output format (png, tiff, bmp)
        #[arg(long, default_value = "png")]
        format: String,
    },

    /// Write a 1/f noise image with scrambled phase
    Synth {
        /// Output file
        output: PathBuf,

        /// Width in pixels
        #[arg(long, default_value_t = 256)]
        width: usize,

        /// Height in pixels
        #[arg(long, default_value_t = 256)]
        height: usize,

        /// Output format (png, tiff, bmp)
        #[arg(long, default_value = "png")]
        format: String,

        /// Seed for the phase draw (OS entropy if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Sweep parameters shared by `run` and `plan`.
///
/// Flags override the matching fields of `--config`.
#[derive(Args)]
pub struct SweepArgs {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Contrast factors (e.g. "0.5,1,1.5")
    #[arg(long)]
    contrast: Option<String>,

    /// Mid-frequency boost factors (e.g. "0.5,1,2")
    #[arg(long)]
    boost: Option<String>,

    /// Frequency bands as low-high radius pairs (e.g. "8-40;4-16")
    #[arg(long)]
    bands: Option<String>,

    /// Phase handling: original, scrambled or both
    #[arg(long)]
    phase: Option<String>,

    /// Boost the source amplitude instead of the contrast-adjusted one
    #[arg(long)]
    use_original_amplitude: bool,

    /// Replace the amplitude spectrum with a 1/f envelope
    #[arg(long)]
    one_over_f: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Run { input, output, sweep, resize, format, seed, no_manifest } => {
            commands::run::run(input, output, &sweep, resize.as_deref(), &format, seed, no_manifest)
        }
        Commands::Plan { stem, sweep, format } => commands::plan::run(&stem, &sweep, &format),
        Commands::Synth { output, width, height, format, seed } => {
            commands::synth::run(output, width, height, &format, seed)
        }
    }
}
