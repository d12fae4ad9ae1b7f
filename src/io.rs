//! Loading and saving grayscale images.
//!
//! Input images of any supported format are decoded with the `image` crate,
//! optionally resized with bicubic (Catmull-Rom) interpolation, and
//! converted to 16-bit luminance before scaling into `[0, 1]`. Outputs are
//! clipped, quantised to 8 bits and written through a temporary file so a
//! variant never appears under its final name half-written.
//!
//! # Example
//!
//! ```rust,ignore
//! use spectral_sweep::io::{load_luma, save_luma, OutputFormat};
//!
//! let image = load_luma("stimuli/face01.png", Some((256, 256)))?;
//! save_luma(&image, "out/face01.png", OutputFormat::Png)?;
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::imageops::FilterType;
use image::{GrayImage, ImageFormat};
use imgref::ImgVec;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::luma::LumaImage;

/// Raster format for written variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// Uncompressed TIFF.
    Tiff,
    /// Windows bitmap.
    Bmp,
}

impl OutputFormat {
    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Tiff => "tif",
            Self::Bmp => "bmp",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Tiff => ImageFormat::Tiff,
            Self::Bmp => ImageFormat::Bmp,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "png"),
            Self::Tiff => write!(f, "tiff"),
            Self::Bmp => write!(f, "bmp"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "tif" | "tiff" => Ok(Self::Tiff),
            "bmp" => Ok(Self::Bmp),
            other => Err(Error::config(format!(
                "unsupported output format '{other}' (expected png, tiff or bmp)"
            ))),
        }
    }
}

/// Decode `path` as grayscale in `[0, 1]`, resizing to `resize` if given.
pub fn load_luma(path: impl AsRef<Path>, resize: Option<(u32, u32)>) -> Result<LumaImage> {
    let path = path.as_ref();
    let decode_error = |reason: String| Error::Decode {
        path: path.to_path_buf(),
        reason,
    };

    let mut img = image::open(path).map_err(|e| decode_error(e.to_string()))?;
    if let Some((width, height)) = resize {
        img = img.resize_exact(width, height, FilterType::CatmullRom);
    }

    let gray = img.into_luma16();
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    if width == 0 || height == 0 {
        return Err(decode_error("image has no pixels".to_string()));
    }

    let samples = gray
        .into_raw()
        .into_iter()
        .map(|v| f64::from(v) / f64::from(u16::MAX))
        .collect();
    Ok(ImgVec::new(samples, width, height))
}

/// Quantise a `[0, 1]` sample to 8 bits, clipping out-of-range values.
#[must_use]
pub fn quantize(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Write `image` to `path` as 8-bit grayscale.
///
/// The file is encoded next to its destination and renamed into place.
pub fn save_luma(image: &LumaImage, path: impl AsRef<Path>, format: OutputFormat) -> Result<()> {
    let path = path.as_ref();
    let encode_error = |reason: String| Error::Encode {
        path: path.to_path_buf(),
        reason,
    };

    let bytes: Vec<u8> = image.buf().iter().map(|&v| quantize(v)).collect();
    let gray = GrayImage::from_raw(image.width() as u32, image.height() as u32, bytes)
        .ok_or_else(|| encode_error("pixel buffer does not match image size".to_string()))?;

    let partial = partial_path(path);
    if let Err(e) = gray.save_with_format(&partial, format.image_format()) {
        let _ = fs::remove_file(&partial);
        return Err(encode_error(e.to_string()));
    }
    if let Err(e) = fs::rename(&partial, path) {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}
