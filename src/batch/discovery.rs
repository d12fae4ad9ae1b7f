//! Input image discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Supported input extensions.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

/// List the supported image files directly inside `dir`, sorted by path.
///
/// Subdirectories and hidden files are skipped. A missing or non-directory
/// path is a configuration error.
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(Error::config(format!("input path does not exist: {}", dir.display())));
    }
    if !dir.is_dir() {
        return Err(Error::config(format!("input path is not a directory: {}", dir.display())));
    }

    let entries = fs::read_dir(dir).map_err(|e| {
        Error::config(format!("failed to read directory {}: {}", dir.display(), e))
    })?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && is_supported_image(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Whether `path` has a supported extension and is not hidden.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|s| s.to_str())
        .map_or(true, |s| s.starts_with('.'));
    if hidden {
        return false;
    }
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
