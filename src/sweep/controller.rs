//! Sweep controller: every parameter combination for one source image.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adjust::{adjust_contrast, normalize};
use crate::error::Result;
use crate::luma::LumaImage;
use crate::spectrum::{FrequencyBand, PhaseMode, RadiusCache, SpectralTransform, Spectrum, mask, pink};
use crate::sweep::{SweepConfig, naming};

/// The exact parameters that produced one variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariantParams {
    /// Contrast factor, applied before and after the spectral edit.
    pub contrast: f64,
    /// Amplitude multiplier inside `band`.
    pub boost: f64,
    /// Frequency band the boost applies to.
    pub band: FrequencyBand,
    /// How phase was chosen.
    pub phase: PhaseMode,
    /// Whether amplitude was replaced by the 1/f envelope.
    pub one_over_f: bool,
}

impl VariantParams {
    /// File stem for this variant of `source_stem`.
    #[must_use]
    pub fn stem(&self, source_stem: &str) -> String {
        naming::variant_stem(source_stem, self)
    }
}

/// One generated image and the parameters behind it.
#[derive(Debug, Clone)]
pub struct Variant {
    /// Parameter tuple.
    pub params: VariantParams,
    /// Reconstructed image, values in `[0, 1]`.
    pub image: LumaImage,
}

/// Runs a [`SweepConfig`] over source images.
///
/// # Example
///
/// ```rust,ignore
/// use spectral_sweep::{SweepConfig, SweepController};
///
/// let config = SweepConfig::builder().build()?;
/// let mut controller = SweepController::new(&config);
/// let mut rng = rand::thread_rng();
///
/// controller.run(&image, &mut rng, |variant| {
///     println!("{}", variant.params.stem("source"));
///     Ok(())
/// })?;
/// ```
#[derive(Debug)]
pub struct SweepController<'a> {
    config: &'a SweepConfig,
    radius_maps: RadiusCache,
}

impl<'a> SweepController<'a> {
    /// Create a controller for `config`.
    #[must_use]
    pub fn new(config: &'a SweepConfig) -> Self {
        Self {
            config,
            radius_maps: RadiusCache::new(),
        }
    }

    /// The configuration being swept.
    #[must_use]
    pub fn config(&self) -> &SweepConfig {
        self.config
    }

    /// Generate every variant of `source`, handing each to `sink` in sweep
    /// order. Returns the number of variants emitted.
    ///
    /// Scrambled-phase variants each take a fresh draw from `rng`. An error
    /// from `sink` stops the sweep and is returned.
    pub fn run<R, F>(&mut self, source: &LumaImage, rng: &mut R, mut sink: F) -> Result<usize>
    where
        R: Rng + ?Sized,
        F: FnMut(Variant) -> Result<()>,
    {
        let config = self.config;
        let (width, height) = (source.width(), source.height());
        let transform = SpectralTransform::new(width, height);
        let radius = self.radius_maps.get(width, height);

        let original = transform.decompose(source)?;
        let envelope = config
            .one_over_f()
            .then(|| pink::scaled(&radius, original.mean_amplitude()));

        debug!(
            width,
            height,
            variants = config.variant_count(),
            "sweeping image"
        );

        let mut emitted = 0;
        for &contrast in config.contrast_factors() {
            let adjusted = adjust_contrast(source, contrast);
            let adjusted_spectrum = transform.decompose(&adjusted)?;
            let base = if config.use_original_amplitude() {
                &original.amplitude
            } else {
                &adjusted_spectrum.amplitude
            };

            for &boost in config.boost_factors() {
                for &band in config.frequency_bands() {
                    let masked = mask::boost_with(&radius, base, band, boost)?;
                    // The 1/f envelope replaces the boosted amplitude outright.
                    let amplitude = envelope.as_ref().map_or(masked, Clone::clone);

                    for &phase_mode in config.phase_modes() {
                        let phase = phase_mode.apply(&adjusted_spectrum.phase, rng);
                        let spectrum = Spectrum::new(amplitude.clone(), phase)?;
                        let raw = transform.recompose(&spectrum)?;
                        let image = adjust_contrast(&normalize(&raw), contrast);

                        sink(Variant {
                            params: VariantParams {
                                contrast,
                                boost,
                                band,
                                phase: phase_mode,
                                one_over_f: config.one_over_f(),
                            },
                            image,
                        })?;
                        emitted += 1;
                    }
                }
            }
        }

        Ok(emitted)
    }

    /// Generate every variant of `source` into a vector.
    pub fn collect<R: Rng + ?Sized>(&mut self, source: &LumaImage, rng: &mut R) -> Result<Vec<Variant>> {
        let mut variants = Vec::with_capacity(self.config.variant_count());
        self.run(source, rng, |variant| {
            variants.push(variant);
            Ok(())
        })?;
        Ok(variants)
    }
}
