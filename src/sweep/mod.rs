//! Parameter sweep configuration and the controller that runs it.
//!
//! - [`SweepConfig`]: validated, read-only product of sweep parameters
//! - [`SweepSettings`]: loosely typed external form (JSON, CLI)
//! - [`controller::SweepController`]: generates every variant of one image
//! - [`naming`]: output names that encode each variant's parameters
//! - [`parse`]: parsing of textual parameter lists

pub mod controller;
pub mod naming;
pub mod parse;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::spectrum::{FrequencyBand, PhaseMode, PhaseModes};

pub use controller::{SweepController, Variant, VariantParams};

/// Loosely typed sweep settings, as read from JSON or assembled by a CLI.
///
/// Missing fields take the defaults below. Convert with
/// [`SweepConfig::from_settings`], which performs all validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// Contrast factors, outermost sweep dimension.
    pub contrast_factors: Vec<f64>,
    /// Mid-frequency boost factors.
    pub boost_factors: Vec<f64>,
    /// Frequency bands as `[low, high]` radius pairs.
    pub frequency_bands: Vec<[f64; 2]>,
    /// `original`, `scrambled`, `both`, or a comma list.
    pub phase_modes: String,
    /// Boost the source image's amplitude instead of the contrast-adjusted one.
    pub use_original_amplitude: bool,
    /// Replace the amplitude spectrum with a 1/f envelope.
    pub one_over_f: bool,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            contrast_factors: vec![0.5, 1.0, 1.5],
            boost_factors: vec![0.5, 1.0, 2.0],
            frequency_bands: vec![[8.0, 40.0]],
            phase_modes: "both".to_string(),
            use_original_amplitude: false,
            one_over_f: false,
        }
    }
}

impl SweepSettings {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&content).map_err(|e| {
            Error::config(format!("invalid settings file {}: {e}", path.as_ref().display()))
        })
    }
}

/// Validated parameter sweep.
///
/// Every list is non-empty and duplicate-free, contrast factors are finite,
/// boost factors are finite and non-negative, and bands satisfy
/// `0 <= low <= high`. Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepConfig {
    contrast_factors: Vec<f64>,
    boost_factors: Vec<f64>,
    frequency_bands: Vec<FrequencyBand>,
    phase_modes: PhaseModes,
    use_original_amplitude: bool,
    one_over_f: bool,
}

impl SweepConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> SweepConfigBuilder {
        SweepConfigBuilder::default()
    }

    /// Validate external settings.
    pub fn from_settings(settings: &SweepSettings) -> Result<Self> {
        let bands = settings
            .frequency_bands
            .iter()
            .map(|&[low, high]| FrequencyBand::new(low, high))
            .collect::<Result<Vec<_>>>()?;

        Self::builder()
            .contrast_factors(settings.contrast_factors.clone())
            .boost_factors(settings.boost_factors.clone())
            .frequency_bands(bands)
            .phase_modes(settings.phase_modes.parse()?)
            .use_original_amplitude(settings.use_original_amplitude)
            .one_over_f(settings.one_over_f)
            .build()
    }

    /// Contrast factors in sweep order.
    #[must_use]
    pub fn contrast_factors(&self) -> &[f64] {
        &self.contrast_factors
    }

    /// Boost factors in sweep order.
    #[must_use]
    pub fn boost_factors(&self) -> &[f64] {
        &self.boost_factors
    }

    /// Frequency bands in sweep order.
    #[must_use]
    pub fn frequency_bands(&self) -> &[FrequencyBand] {
        &self.frequency_bands
    }

    /// Phase modes in sweep order.
    #[must_use]
    pub fn phase_modes(&self) -> &[PhaseMode] {
        self.phase_modes.as_slice()
    }

    /// Whether the boost applies to the unadjusted source amplitude.
    #[must_use]
    pub fn use_original_amplitude(&self) -> bool {
        self.use_original_amplitude
    }

    /// Whether amplitude is replaced by the 1/f envelope.
    #[must_use]
    pub fn one_over_f(&self) -> bool {
        self.one_over_f
    }

    /// Number of variants generated per source image.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.contrast_factors.len()
            * self.boost_factors.len()
            * self.frequency_bands.len()
            * self.phase_modes.len()
    }

    /// Every parameter combination, contrast outermost and phase innermost.
    pub fn combinations(&self) -> impl Iterator<Item = VariantParams> + '_ {
        let one_over_f = self.one_over_f;
        self.contrast_factors.iter().flat_map(move |&contrast| {
            self.boost_factors.iter().flat_map(move |&boost| {
                self.frequency_bands.iter().flat_map(move |&band| {
                    self.phase_modes().iter().map(move |&phase| VariantParams {
                        contrast,
                        boost,
                        band,
                        phase,
                        one_over_f,
                    })
                })
            })
        })
    }

    /// One-line description for logs and reports.
    #[must_use]
    pub fn summary(&self) -> String {
        let bands: Vec<String> = self.frequency_bands.iter().map(ToString::to_string).collect();
        format!(
            "contrast={:?} boost={:?} bands=[{}] phase={} original_amplitude={} one_over_f={}",
            self.contrast_factors,
            self.boost_factors,
            bands.join(","),
            self.phase_modes,
            self.use_original_amplitude,
            self.one_over_f,
        )
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            contrast_factors: vec![0.5, 1.0, 1.5],
            boost_factors: vec![0.5, 1.0, 2.0],
            frequency_bands: vec![FrequencyBand::MID_FREQUENCY],
            phase_modes: PhaseModes::both(),
            use_original_amplitude: false,
            one_over_f: false,
        }
    }
}

/// Builder for [`SweepConfig`]. Unset fields take the defaults.
#[derive(Debug, Default)]
pub struct SweepConfigBuilder {
    contrast_factors: Option<Vec<f64>>,
    boost_factors: Option<Vec<f64>>,
    frequency_bands: Option<Vec<FrequencyBand>>,
    phase_modes: Option<PhaseModes>,
    use_original_amplitude: bool,
    one_over_f: bool,
}

impl SweepConfigBuilder {
    /// Set contrast factors.
    #[must_use]
    pub fn contrast_factors(mut self, factors: Vec<f64>) -> Self {
        self.contrast_factors = Some(factors);
        self
    }

    /// Set boost factors.
    #[must_use]
    pub fn boost_factors(mut self, factors: Vec<f64>) -> Self {
        self.boost_factors = Some(factors);
        self
    }

    /// Set frequency bands.
    #[must_use]
    pub fn frequency_bands(mut self, bands: Vec<FrequencyBand>) -> Self {
        self.frequency_bands = Some(bands);
        self
    }

    /// Set phase modes.
    #[must_use]
    pub fn phase_modes(mut self, modes: PhaseModes) -> Self {
        self.phase_modes = Some(modes);
        self
    }

    /// Boost the source amplitude rather than the contrast-adjusted one.
    #[must_use]
    pub fn use_original_amplitude(mut self, enabled: bool) -> Self {
        self.use_original_amplitude = enabled;
        self
    }

    /// Replace amplitude with the 1/f envelope.
    #[must_use]
    pub fn one_over_f(mut self, enabled: bool) -> Self {
        self.one_over_f = enabled;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<SweepConfig> {
        let defaults = SweepConfig::default();

        let contrast_factors = self.contrast_factors.unwrap_or(defaults.contrast_factors);
        check_factors("contrast", &contrast_factors)?;

        let boost_factors = self.boost_factors.unwrap_or(defaults.boost_factors);
        check_factors("boost", &boost_factors)?;
        if let Some(negative) = boost_factors.iter().find(|&&b| b < 0.0) {
            return Err(Error::config(format!("boost factor {negative} is negative")));
        }

        let frequency_bands = self.frequency_bands.unwrap_or(defaults.frequency_bands);
        if frequency_bands.is_empty() {
            return Err(Error::config("at least one frequency band is required"));
        }
        for (i, band) in frequency_bands.iter().enumerate() {
            if frequency_bands[..i].contains(band) {
                return Err(Error::config(format!("frequency band {band} listed twice")));
            }
        }

        Ok(SweepConfig {
            contrast_factors,
            boost_factors,
            frequency_bands,
            phase_modes: self.phase_modes.unwrap_or(defaults.phase_modes),
            use_original_amplitude: self.use_original_amplitude,
            one_over_f: self.one_over_f,
        })
    }
}

/// Non-empty, finite, duplicate-free. Duplicates would collide in output names.
fn check_factors(kind: &str, factors: &[f64]) -> Result<()> {
    if factors.is_empty() {
        return Err(Error::config(format!("at least one {kind} factor is required")));
    }
    if let Some(bad) = factors.iter().find(|f| !f.is_finite()) {
        return Err(Error::config(format!("{kind} factor {bad} is not finite")));
    }
    for (i, factor) in factors.iter().enumerate() {
        if factors[..i].contains(factor) {
            return Err(Error::config(format!("{kind} factor {factor} listed twice")));
        }
    }
    Ok(())
}
