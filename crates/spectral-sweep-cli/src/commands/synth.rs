//! 1/f noise synthesis command.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use spectral_sweep::spectrum::noise_image;
use spectral_sweep::{OutputFormat, io, luma};
use tracing::info;

use super::make_rng;

pub fn run(output: PathBuf, width: usize, height: usize, format: &str, seed: Option<u64>) -> Result<()> {
    if width == 0 || height == 0 {
        bail!("Noise size {}x{} has a zero dimension", width, height);
    }
    let format: OutputFormat = format.parse().context("Invalid --format")?;

    let noise = noise_image(width, height, &mut make_rng(seed)).context("Failed to synthesize noise")?;
    io::save_luma(&noise, &output, format)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("wrote {}x{} noise to {}", width, height, output.display());

    println!("Wrote: {}", output.display());
    println!(
        "Mean luminance: {:.4}, RMS contrast: {:.4}",
        luma::mean(&noise),
        luma::rms_contrast(&noise)
    );

    Ok(())
}
