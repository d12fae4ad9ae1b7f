//! Grayscale image grid used throughout the pipeline.
//!
//! Images are `imgref::ImgVec<f64>` with luminance in `[0, 1]`. Grids are
//! always created with `ImgVec::new`, so the stride equals the width and the
//! backing buffer is exactly `width * height` samples in row-major order.

use imgref::ImgVec;

use crate::error::{Error, Result};

/// Row-major grid of real-valued luminance samples.
pub type LumaImage = ImgVec<f64>;

/// Build a grid by evaluating `f(x, y)` for every cell.
pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> LumaImage {
    let mut buf = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            buf.push(f(x, y));
        }
    }
    ImgVec::new(buf, width, height)
}

/// Build a grid with every cell set to `value`.
pub fn filled(width: usize, height: usize, value: f64) -> LumaImage {
    ImgVec::new(vec![value; width * height], width, height)
}

/// Apply `f` to every sample, producing a new grid of the same shape.
pub fn map(image: &LumaImage, f: impl Fn(f64) -> f64) -> LumaImage {
    let buf = image.buf().iter().map(|&v| f(v)).collect();
    ImgVec::new(buf, image.width(), image.height())
}

/// Combine two grids of the same shape cell by cell.
pub fn zip_map(a: &LumaImage, b: &LumaImage, f: impl Fn(f64, f64) -> f64) -> Result<LumaImage> {
    ensure_same_shape(a, b)?;
    let buf = a.buf().iter().zip(b.buf().iter()).map(|(&x, &y)| f(x, y)).collect();
    Ok(ImgVec::new(buf, a.width(), a.height()))
}

/// Fail with [`Error::DimensionMismatch`] unless both grids share a shape.
pub fn ensure_same_shape(expected: &LumaImage, actual: &LumaImage) -> Result<()> {
    if expected.width() != actual.width() || expected.height() != actual.height() {
        return Err(Error::DimensionMismatch {
            expected: (expected.width(), expected.height()),
            actual: (actual.width(), actual.height()),
        });
    }
    Ok(())
}

/// Mean sample value (mean luminance for images). Empty grids have mean 0.
#[must_use]
pub fn mean(image: &LumaImage) -> f64 {
    let buf = image.buf();
    if buf.is_empty() {
        return 0.0;
    }
    buf.iter().sum::<f64>() / buf.len() as f64
}

/// RMS contrast: the standard deviation of luminance around the mean.
#[must_use]
pub fn rms_contrast(image: &LumaImage) -> f64 {
    let buf = image.buf();
    if buf.is_empty() {
        return 0.0;
    }
    let mu = mean(image);
    let variance = buf.iter().map(|&v| (v - mu) * (v - mu)).sum::<f64>() / buf.len() as f64;
    variance.sqrt()
}

/// Smallest and largest sample, or `None` for an empty grid.
#[must_use]
pub fn min_max(image: &LumaImage) -> Option<(f64, f64)> {
    let buf = image.buf();
    if buf.is_empty() {
        return None;
    }
    Some(
        buf.iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}
