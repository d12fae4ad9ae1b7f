//! Amplitude boost inside a circular frequency band.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::luma::{self, LumaImage};
use crate::spectrum::radius::RadiusMap;

/// Inclusive `[low, high]` radius range, in samples from the spectrum centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct FrequencyBand {
    low: f64,
    high: f64,
}

impl FrequencyBand {
    /// Default mid-frequency band, radius 8 to 40.
    pub const MID_FREQUENCY: Self = Self { low: 8.0, high: 40.0 };

    /// Create a band, rejecting non-finite, negative, or reversed bounds.
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(Error::config(format!(
                "frequency band bounds must be finite, got [{low}, {high}]"
            )));
        }
        if low < 0.0 {
            return Err(Error::config(format!(
                "frequency band lower bound must be >= 0, got {low}"
            )));
        }
        if low > high {
            return Err(Error::config(format!(
                "frequency band lower bound {low} exceeds upper bound {high}"
            )));
        }
        Ok(Self { low, high })
    }

    /// Lower radius bound (inclusive).
    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper radius bound (inclusive).
    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Whether `radius` falls inside the band.
    #[must_use]
    pub fn contains(&self, radius: f64) -> bool {
        self.low <= radius && radius <= self.high
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

impl TryFrom<[f64; 2]> for FrequencyBand {
    type Error = Error;

    fn try_from([low, high]: [f64; 2]) -> Result<Self> {
        Self::new(low, high)
    }
}

impl From<FrequencyBand> for [f64; 2] {
    fn from(band: FrequencyBand) -> Self {
        [band.low, band.high]
    }
}

/// Scale the amplitude of every cell inside `band` by `factor`.
///
/// Builds a radius map for this call; use [`boost_with`] to reuse one.
pub fn boost(amplitude: &LumaImage, band: FrequencyBand, factor: f64) -> Result<LumaImage> {
    let map = RadiusMap::new(amplitude.width(), amplitude.height());
    boost_with(&map, amplitude, band, factor)
}

/// Scale the amplitude of every cell inside `band` by `factor`, using `map`.
///
/// Cells outside the band are copied unchanged, so `factor == 1.0` yields an
/// exact copy.
pub fn boost_with(
    map: &RadiusMap,
    amplitude: &LumaImage,
    band: FrequencyBand,
    factor: f64,
) -> Result<LumaImage> {
    luma::zip_map(map.as_grid(), amplitude, |radius, a| {
        if band.contains(radius) { a * factor } else { a }
    })
}
