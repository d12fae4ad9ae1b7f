//! Frequency-domain representation of grayscale images.
//!
//! This module provides the centred 2D discrete Fourier transform and the
//! operations applied to its amplitude and phase:
//!
//! - [`SpectralTransform`]: forward/inverse 2D DFT with zero-frequency centring
//! - [`radius::RadiusMap`]: distance of each cell from the spectrum centre
//! - [`mask`]: amplitude boost inside a circular frequency band
//! - [`pink`]: canonical 1/f amplitude envelope
//! - [`phase`]: phase passthrough or randomisation
//!
//! ## Example
//!
//! ```rust,ignore
//! use spectral_sweep::spectrum::SpectralTransform;
//!
//! let transform = SpectralTransform::new(image.width(), image.height());
//! let spectrum = transform.decompose(&image)?;
//! let raw = transform.recompose(&spectrum)?;
//! ```

pub mod mask;
pub mod phase;
pub mod pink;
pub mod radius;

use std::sync::Arc;

use imgref::ImgVec;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::error::Result;
use crate::luma::{self, LumaImage};

pub use mask::{FrequencyBand, boost, boost_with};
pub use phase::{PhaseMode, PhaseModes, passthrough, randomize};
pub use pink::{noise_image, synthesize, synthesize_with};
pub use radius::{RadiusCache, RadiusMap};

/// Amplitude and phase of a centred 2D DFT.
///
/// Both grids share the source image's shape. The zero-frequency component
/// sits at `(width / 2, height / 2)`.
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// Magnitude of each frequency component (non-negative).
    pub amplitude: LumaImage,
    /// Angle of each frequency component, in `(-π, π]`.
    pub phase: LumaImage,
}

impl Spectrum {
    /// Pair an amplitude grid with a phase grid of the same shape.
    pub fn new(amplitude: LumaImage, phase: LumaImage) -> Result<Self> {
        luma::ensure_same_shape(&amplitude, &phase)?;
        Ok(Self { amplitude, phase })
    }

    /// Grid width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.amplitude.width()
    }

    /// Grid height.
    #[must_use]
    pub fn height(&self) -> usize {
        self.amplitude.height()
    }

    /// Mean amplitude over all frequencies, DC included.
    #[must_use]
    pub fn mean_amplitude(&self) -> f64 {
        luma::mean(&self.amplitude)
    }
}

/// Planned forward and inverse 2D transforms for one grid shape.
///
/// Planning is the expensive part of an FFT, so a sweep builds one
/// `SpectralTransform` per image shape and reuses it for every variant.
pub struct SpectralTransform {
    width: usize,
    height: usize,
    row_forward: Arc<dyn Fft<f64>>,
    row_inverse: Arc<dyn Fft<f64>>,
    col_forward: Arc<dyn Fft<f64>>,
    col_inverse: Arc<dyn Fft<f64>>,
}

impl std::fmt::Debug for SpectralTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectralTransform")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl SpectralTransform {
    /// Plan transforms for `width` x `height` grids.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            width,
            height,
            row_forward: planner.plan_fft_forward(width.max(1)),
            row_inverse: planner.plan_fft_inverse(width.max(1)),
            col_forward: planner.plan_fft_forward(height.max(1)),
            col_inverse: planner.plan_fft_inverse(height.max(1)),
        }
    }

    /// Planned grid shape as (width, height).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Forward transform, centre shift, and split into amplitude and phase.
    pub fn decompose(&self, image: &LumaImage) -> Result<Spectrum> {
        self.check_shape(image)?;

        let mut data: Vec<Complex<f64>> =
            image.buf().iter().map(|&v| Complex::new(v, 0.0)).collect();
        self.transform(&mut data, Direction::Forward);
        let shifted = roll(&data, self.width, self.height, self.width / 2, self.height / 2);

        let amplitude = shifted.iter().map(|c| c.norm()).collect();
        let phase = shifted.iter().map(|c| wrap_phase(c.arg())).collect();

        Ok(Spectrum {
            amplitude: ImgVec::new(amplitude, self.width, self.height),
            phase: ImgVec::new(phase, self.width, self.height),
        })
    }

    /// Rebuild a spatial grid from amplitude and phase.
    ///
    /// Only the real part of the inverse transform is kept. The result is not
    /// range-limited; see [`crate::adjust::normalize`].
    pub fn recompose(&self, spectrum: &Spectrum) -> Result<LumaImage> {
        luma::ensure_same_shape(&spectrum.amplitude, &spectrum.phase)?;
        self.check_shape(&spectrum.amplitude)?;

        let centred: Vec<Complex<f64>> = spectrum
            .amplitude
            .buf()
            .iter()
            .zip(spectrum.phase.buf().iter())
            .map(|(&a, &p)| Complex::from_polar(a, p))
            .collect();

        let mut data = roll(
            &centred,
            self.width,
            self.height,
            self.width - self.width / 2,
            self.height - self.height / 2,
        );
        self.transform(&mut data, Direction::Inverse);

        let scale = 1.0 / (self.width * self.height).max(1) as f64;
        let real = data.iter().map(|c| c.re * scale).collect();
        Ok(ImgVec::new(real, self.width, self.height))
    }

    fn check_shape(&self, grid: &LumaImage) -> Result<()> {
        if grid.width() != self.width || grid.height() != self.height {
            return Err(crate::error::Error::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (grid.width(), grid.height()),
            });
        }
        Ok(())
    }

    /// Unnormalised 2D transform: rows in place, then columns via a transpose.
    fn transform(&self, data: &mut [Complex<f64>], direction: Direction) {
        if data.is_empty() {
            return;
        }
        let (row_fft, col_fft) = match direction {
            Direction::Forward => (&self.row_forward, &self.col_forward),
            Direction::Inverse => (&self.row_inverse, &self.col_inverse),
        };

        row_fft.process(data);

        let mut columns = transpose(data, self.width, self.height);
        col_fft.process(&mut columns);
        let rows = transpose(&columns, self.height, self.width);
        data.copy_from_slice(&rows);
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Inverse,
}

/// One-shot forward decomposition. Plans a transform for this call only.
pub fn decompose(image: &LumaImage) -> Result<Spectrum> {
    SpectralTransform::new(image.width(), image.height()).decompose(image)
}

/// One-shot inverse reconstruction. Plans a transform for this call only.
pub fn recompose(spectrum: &Spectrum) -> Result<LumaImage> {
    SpectralTransform::new(spectrum.width(), spectrum.height()).recompose(spectrum)
}

/// Map `atan2`'s `-π` onto `π` so phases lie in `(-π, π]`.
fn wrap_phase(angle: f64) -> f64 {
    if angle <= -std::f64::consts::PI {
        std::f64::consts::PI
    } else {
        angle
    }
}

/// Circularly shift a row-major grid by `dx` columns and `dy` rows.
fn roll(data: &[Complex<f64>], width: usize, height: usize, dx: usize, dy: usize) -> Vec<Complex<f64>> {
    let mut out = vec![Complex::new(0.0, 0.0); data.len()];
    for y in 0..height {
        let ny = (y + dy) % height;
        for x in 0..width {
            let nx = (x + dx) % width;
            out[ny * width + nx] = data[y * width + x];
        }
    }
    out
}

/// Transpose a row-major `width` x `height` grid into a `height` x `width` one.
fn transpose(data: &[Complex<f64>], width: usize, height: usize) -> Vec<Complex<f64>> {
    let mut out = vec![Complex::new(0.0, 0.0); data.len()];
    for y in 0..height {
        for x in 0..width {
            out[x * height + y] = data[y * width + x];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textured(width: usize, height: usize) -> LumaImage {
        luma::from_fn(width, height, |x, y| {
            let v = 0.5 + 0.3 * ((x as f64) * 0.7).sin() * ((y as f64) * 0.3).cos();
            v + 0.1 * (((x * 7 + y * 13) % 11) as f64 / 11.0 - 0.5)
        })
    }

    fn max_abs_diff(a: &LumaImage, b: &LumaImage) -> f64 {
        a.buf()
            .iter()
            .zip(b.buf().iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_round_trip_even_shape() {
        let img = textured(64, 64);
        let spectrum = decompose(&img).unwrap();
        let back = recompose(&spectrum).unwrap();
        assert!(max_abs_diff(&img, &back) <= 1e-5);
    }

    #[test]
    fn test_round_trip_odd_rectangular_shape() {
        let img = textured(33, 17);
        let transform = SpectralTransform::new(33, 17);
        let spectrum = transform.decompose(&img).unwrap();
        let back = transform.recompose(&spectrum).unwrap();
        assert!(max_abs_diff(&img, &back) <= 1e-5);
    }

    #[test]
    fn test_dc_is_centred() {
        let img = luma::filled(16, 10, 0.5);
        let spectrum = decompose(&img).unwrap();
        let centre = 5 * 16 + 8;
        assert!((spectrum.amplitude.buf()[centre] - 0.5 * 160.0).abs() < 1e-9);
        let off_centre: f64 = spectrum
            .amplitude
            .buf()
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != centre)
            .map(|(_, &a)| a)
            .sum();
        assert!(off_centre < 1e-9);
    }

    #[test]
    fn test_phase_range() {
        let spectrum = decompose(&textured(20, 20)).unwrap();
        let pi = std::f64::consts::PI;
        assert!(spectrum.phase.buf().iter().all(|&p| p > -pi && p <= pi));
        assert!(spectrum.amplitude.buf().iter().all(|&a| a >= 0.0));
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let transform = SpectralTransform::new(8, 8);
        let err = transform.decompose(&luma::filled(8, 9, 0.0)).unwrap_err();
        assert!(matches!(err, crate::error::Error::DimensionMismatch { .. }));

        let err = Spectrum::new(luma::filled(8, 8, 1.0), luma::filled(4, 8, 0.0)).unwrap_err();
        assert!(matches!(err, crate::error::Error::DimensionMismatch { .. }));
    }

    #[test]
    fn test_roll_matches_shift_convention() {
        let data: Vec<Complex<f64>> = (0..5u8).map(|i| Complex::new(f64::from(i), 0.0)).collect();
        let shifted = roll(&data, 5, 1, 5 / 2, 0);
        let re: Vec<f64> = shifted.iter().map(|c| c.re).collect();
        assert_eq!(re, vec![3.0, 4.0, 0.0, 1.0, 2.0]);
        let back = roll(&shifted, 5, 1, 5 - 5 / 2, 0);
        assert_eq!(back, data);
    }

    /// Reference shift built from slice halves: `x[split..] ++ x[..split]` per axis.
    fn split_shift(data: &[Complex<f64>], width: usize, height: usize, split_x: usize, split_y: usize) -> Vec<Complex<f64>> {
        let rows: Vec<&[Complex<f64>]> = data.chunks(width).collect();
        let mut out = Vec::with_capacity(data.len());
        for row in rows[split_y..].iter().chain(rows[..split_y].iter()) {
            out.extend_from_slice(&row[split_x..]);
            out.extend_from_slice(&row[..split_x]);
        }
        out
    }

    #[test]
    fn test_roll_matches_fftshift_on_odd_by_even_grid() {
        let (w, h) = (5, 4);
        let data: Vec<Complex<f64>> = (0..20u8).map(|i| Complex::new(f64::from(i), 0.0)).collect();

        // fftshift moves index 0 to n/2: halves split at ceil(n/2)
        let shifted = roll(&data, w, h, w / 2, h / 2);
        assert_eq!(shifted, split_shift(&data, w, h, w.div_ceil(2), h.div_ceil(2)));
        assert_eq!(shifted[(h / 2) * w + w / 2], data[0]);

        // ifftshift splits at floor(n/2) and undoes fftshift
        let unshifted = roll(&shifted, w, h, w - w / 2, h - h / 2);
        assert_eq!(unshifted, split_shift(&shifted, w, h, w / 2, h / 2));
        assert_eq!(unshifted, data);
    }
}
