//! CLI command implementations.

pub mod plan;
pub mod run;
pub mod synth;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use spectral_sweep::sweep::parse::{parse_band_list, parse_number_list};
use spectral_sweep::{SweepConfig, SweepSettings};

use crate::SweepArgs;

/// Build a validated sweep from `--config` plus flag overrides.
pub fn sweep_config(args: &SweepArgs) -> Result<SweepConfig> {
    let mut settings = match &args.config {
        Some(path) => SweepSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => SweepSettings::default(),
    };

    if let Some(list) = &args.contrast {
        settings.contrast_factors = parse_number_list(list).context("Invalid --contrast")?;
    }
    if let Some(list) = &args.boost {
        settings.boost_factors = parse_number_list(list).context("Invalid --boost")?;
    }
    if let Some(list) = &args.bands {
        settings.frequency_bands = parse_band_list(list)
            .context("Invalid --bands")?
            .into_iter()
            .map(Into::into)
            .collect();
    }
    if let Some(phase) = &args.phase {
        settings.phase_modes.clone_from(phase);
    }
    if args.use_original_amplitude {
        settings.use_original_amplitude = true;
    }
    if args.one_over_f {
        settings.one_over_f = true;
    }

    SweepConfig::from_settings(&settings).context("Invalid sweep configuration")
}

/// Seeded generator when a seed is given, OS entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
