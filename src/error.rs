//! Error types for spectral-sweep operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for spectral-sweep operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating image variants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Failed to decode an input image.
    #[error("Image decode failed: {path}: {reason}")]
    Decode {
        /// Path to the image that failed to decode.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Failed to encode or write an output image.
    #[error("Image encode failed: {path}: {reason}")]
    Encode {
        /// Destination path of the variant.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Malformed or invalid run configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The input directory contains no supported images.
    #[error("No input images found in {}", .0.display())]
    NoImages(PathBuf),

    /// Two grids that must share a shape do not.
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height).
        expected: (usize, usize),
        /// Actual dimensions (width, height).
        actual: (usize, usize),
    },

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether this error only invalidates the file being processed.
    ///
    /// The batch runner reports these and moves on to the next file; every
    /// other error aborts the run.
    #[must_use]
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::Encode { .. } | Self::DimensionMismatch { .. } | Self::Io(_)
        )
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_file_classification() {
        let decode = Error::Decode {
            path: PathBuf::from("a.png"),
            reason: "truncated".to_string(),
        };
        assert!(decode.is_per_file());
        assert!(Error::Io(std::io::Error::other("disk full")).is_per_file());
        assert!(!Error::config("bad list").is_per_file());
        assert!(!Error::NoImages(PathBuf::from("in")).is_per_file());
    }

    #[test]
    fn test_display() {
        let err = Error::config("boost factor -1 is negative");
        assert_eq!(err.to_string(), "Configuration error: boost factor -1 is negative");
    }
}
