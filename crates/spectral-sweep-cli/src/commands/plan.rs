//! Dry-run listing of variant names.

use anyhow::{Context, Result};
use spectral_sweep::OutputFormat;
use spectral_sweep::sweep::naming::variant_file_name;

use super::sweep_config;
use crate::SweepArgs;

pub fn run(stem: &str, args: &SweepArgs, format: &str) -> Result<()> {
    let sweep = sweep_config(args)?;
    let format: OutputFormat = format.parse().context("Invalid --format")?;

    println!("Sweep: {}", sweep.summary());
    println!("{:-<60}", "");
    for params in sweep.combinations() {
        println!("{}", variant_file_name(stem, &params, format.extension()));
    }
    println!("{:-<60}", "");
    println!("{} variants", sweep.variant_count());

    Ok(())
}
