//! Spatial-domain intensity adjustments.
//!
//! - [`adjust_contrast`]: scale luminance around the image mean.
//! - [`normalize`]: min-max stretch of a raw reconstruction into `[0, 1]`.

use crate::luma::{self, LumaImage};

/// Range below which a reconstruction is treated as flat.
///
/// An inverse transform of a uniform image leaves round-off residue around
/// 1e-16; stretching that residue to `[0, 1]` would turn a flat field into
/// full-contrast noise.
pub const FLAT_RANGE_EPSILON: f64 = 1e-9;

/// Rescale intensities around the mean by `factor`, clipped to `[0, 1]`.
///
/// `factor == 0` flattens the image to its mean and negative factors invert
/// contrast around it.
#[must_use]
pub fn adjust_contrast(image: &LumaImage, factor: f64) -> LumaImage {
    let mean = luma::mean(image);
    luma::map(image, |v| ((v - mean) * factor + mean).clamp(0.0, 1.0))
}

/// Stretch a raw reconstruction into `[0, 1]`.
///
/// Subtracts the minimum, then divides by the remaining maximum. Non-finite
/// samples are treated as 0. A grid whose range is at most
/// [`FLAT_RANGE_EPSILON`] carries no contrast to stretch; it is clipped to
/// `[0, 1]` instead, which keeps an all-zero grid at zero and a flat grey
/// field at its level.
#[must_use]
pub fn normalize(raw: &LumaImage) -> LumaImage {
    let finite = luma::map(raw, |v| if v.is_finite() { v } else { 0.0 });
    let Some((min, max)) = luma::min_max(&finite) else {
        return finite;
    };

    let range = max - min;
    if range <= FLAT_RANGE_EPSILON {
        return luma::map(&finite, |v| v.clamp(0.0, 1.0));
    }

    luma::map(&finite, |v| ((v - min) / range).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgref::ImgVec;

    fn ramp() -> LumaImage {
        luma::from_fn(4, 4, |x, y| (y * 4 + x) as f64 / 15.0)
    }

    #[test]
    fn test_contrast_identity() {
        let img = ramp();
        let out = adjust_contrast(&img, 1.0);
        for (a, b) in img.buf().iter().zip(out.buf().iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_contrast_zero_flattens_to_mean() {
        let img = ramp();
        let out = adjust_contrast(&img, 0.0);
        let mean = luma::mean(&img);
        assert!(out.buf().iter().all(|&v| (v - mean).abs() < 1e-12));
    }

    #[test]
    fn test_contrast_negative_inverts_around_mean() {
        let img = ImgVec::new(vec![0.25, 0.75], 2, 1);
        let out = adjust_contrast(&img, -1.0);
        assert!((out.buf()[0] - 0.75).abs() < 1e-12);
        assert!((out.buf()[1] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_contrast_clips_to_unit_range() {
        let img = ramp();
        let out = adjust_contrast(&img, 10.0);
        assert!(out.buf().iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert_eq!(out.buf()[0], 0.0);
        assert_eq!(out.buf()[15], 1.0);
    }

    #[test]
    fn test_normalize_stretches_to_unit_range() {
        let raw = ImgVec::new(vec![-3.0, -1.0, 1.0, 5.0], 2, 2);
        let out = normalize(&raw);
        assert_eq!(out.buf().as_slice(), &[0.0, 0.25, 0.5, 1.0]);
    }

    #[test]
    fn test_normalize_all_zero_stays_zero() {
        let raw = luma::filled(8, 8, 0.0);
        let out = normalize(&raw);
        assert!(out.buf().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_normalize_keeps_flat_level() {
        let raw = luma::from_fn(8, 8, |x, _| 0.5 + if x == 3 { 1e-15 } else { 0.0 });
        let out = normalize(&raw);
        assert!(out.buf().iter().all(|&v| (v - 0.5).abs() < 1e-12));
    }

    #[test]
    fn test_normalize_replaces_non_finite() {
        let raw = ImgVec::new(vec![f64::NAN, 2.0, f64::INFINITY, 4.0], 2, 2);
        let out = normalize(&raw);
        assert!(out.buf().iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert_eq!(out.buf()[3], 1.0);
    }
}
