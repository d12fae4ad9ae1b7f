//! Canonical 1/f amplitude envelope.
//!
//! Natural images have amplitude spectra that fall off roughly as 1/f. The
//! envelope built here is that falloff with unit mean, independent of any
//! input image. Callers scale it to a target mean amplitude, usually the
//! source image's own mean spectral amplitude.

use rand::Rng;

use crate::adjust::normalize;
use crate::error::Result;
use crate::luma::{self, LumaImage};
use crate::spectrum::radius::RadiusMap;
use crate::spectrum::{SpectralTransform, Spectrum, phase};

/// Build a `width` x `height` 1/f envelope with mean 1.0.
#[must_use]
pub fn synthesize(width: usize, height: usize) -> LumaImage {
    synthesize_with(&RadiusMap::new(width, height))
}

/// Build the 1/f envelope for the shape of `map`.
#[must_use]
pub fn synthesize_with(map: &RadiusMap) -> LumaImage {
    let inverse = luma::map(map.as_grid(), |radius| 1.0 / radius);
    let mean = luma::mean(&inverse);
    if mean > 0.0 {
        luma::map(&inverse, |v| v / mean)
    } else {
        inverse
    }
}

/// Envelope scaled so its mean equals `target_mean`.
#[must_use]
pub fn scaled(map: &RadiusMap, target_mean: f64) -> LumaImage {
    luma::map(&synthesize_with(map), |v| v * target_mean)
}

/// Pink noise: the 1/f envelope recombined with uniformly random phase and
/// stretched into `[0, 1]`.
pub fn noise_image<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<LumaImage> {
    let map = RadiusMap::new(width, height);
    let spectrum = Spectrum::new(synthesize_with(&map), phase::randomize(width, height, rng))?;
    let raw = SpectralTransform::new(width, height).recompose(&spectrum)?;
    Ok(normalize(&raw))
}
