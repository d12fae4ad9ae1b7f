//! Batch sweep command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use spectral_sweep::sweep::parse::parse_resize;
use spectral_sweep::{BatchConfig, BatchRunner, Error, OutputFormat};

use super::{make_rng, sweep_config};
use crate::SweepArgs;

pub fn run(
    input: PathBuf,
    output: PathBuf,
    args: &SweepArgs,
    resize: Option<&str>,
    format: &str,
    seed: Option<u64>,
    no_manifest: bool,
) -> Result<()> {
    let sweep = sweep_config(args)?;
    let format: OutputFormat = format.parse().context("Invalid --format")?;

    let mut builder = BatchConfig::builder()
        .input_dir(&input)
        .output_dir(&output)
        .format(format)
        .write_manifest(!no_manifest);
    if let Some(spec) = resize {
        let (width, height) = parse_resize(spec).context("Invalid --resize")?;
        builder = builder.resize(width, height);
    }
    let batch = builder.build().context("Invalid batch configuration")?;

    println!("Sweep: {}", sweep.summary());
    println!("Variants per image: {}", sweep.variant_count());

    let runner = BatchRunner::new(batch, sweep);
    let report = match runner.run(&mut make_rng(seed)) {
        Ok(report) => report,
        Err(Error::NoImages(dir)) => {
            println!("No input images found in {}", dir.display());
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Sweep failed for {}", input.display()));
        }
    };

    println!();
    println!("Processed images: {}", report.images.len());
    println!("Variants written: {}", report.total_variants());
    if !report.is_complete() {
        println!("Failed images: {}", report.failures.len());
        for failure in &report.failures {
            println!("  {}: {}", failure.path.display(), failure.error);
        }
    }
    println!("Output: {}", output.display());

    Ok(())
}
