//! Run reports and manifests.
//!
//! A [`RunReport`] records every variant written during a batch run, the
//! parameters behind it, and any per-file failures. It serialises to JSON and
//! flattens to a CSV manifest with one row per variant.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sweep::{SweepConfig, VariantParams};

/// One written variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantRecord {
    /// Output file name, relative to the output directory.
    pub file_name: String,

    /// Parameters that produced the variant.
    pub params: VariantParams,

    /// Mean luminance of the written image.
    pub mean_luminance: f64,

    /// RMS contrast (luminance standard deviation) of the written image.
    pub rms_contrast: f64,
}

/// All variants generated from one source image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageReport {
    /// Source file name.
    pub name: String,

    /// Path to the source image.
    pub source_path: PathBuf,

    /// Processed dimensions (after any resize).
    pub width: u32,
    pub height: u32,

    /// Variants in sweep order.
    pub variants: Vec<VariantRecord>,
}

impl ImageReport {
    /// Create an empty report for one source image.
    #[must_use]
    pub fn new(source_path: &Path, width: u32, height: u32) -> Self {
        Self {
            name: source_path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_string(),
            source_path: source_path.to_path_buf(),
            width,
            height,
            variants: Vec::new(),
        }
    }
}

/// A source file that could not be processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    /// Path to the source image.
    pub path: PathBuf,

    /// Error message.
    pub error: String,
}

/// Report for a whole batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Input directory.
    pub input_dir: PathBuf,

    /// Output directory.
    pub output_dir: PathBuf,

    /// Sweep configuration summary.
    pub config_summary: String,

    /// Variants per successfully processed image.
    pub variants_per_image: usize,

    /// Successfully processed images.
    pub images: Vec<ImageReport>,

    /// Images that failed.
    pub failures: Vec<FileFailure>,

    /// When this run started.
    #[serde(with = "chrono_serde")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl RunReport {
    /// Create an empty report for a run.
    #[must_use]
    pub fn new(input_dir: &Path, output_dir: &Path, config: &SweepConfig) -> Self {
        Self {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            config_summary: config.summary(),
            variants_per_image: config.variant_count(),
            images: Vec::new(),
            failures: Vec::new(),
            timestamp: chrono::Utc::now(),
        }
    }

    /// Total number of variants written.
    #[must_use]
    pub fn total_variants(&self) -> usize {
        self.images.iter().map(|img| img.variants.len()).sum()
    }

    /// Whether every discovered file was processed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Write the full report as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Write one CSV row per variant.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;

        wtr.write_record([
            "source",
            "file",
            "contrast",
            "boost",
            "band_low",
            "band_high",
            "phase",
            "one_over_f",
            "mean_luminance",
            "rms_contrast",
        ])?;

        for img in &self.images {
            for record in &img.variants {
                let p = &record.params;
                wtr.write_record([
                    &img.name,
                    &record.file_name,
                    &p.contrast.to_string(),
                    &p.boost.to_string(),
                    &p.band.low().to_string(),
                    &p.band.high().to_string(),
                    &p.phase.to_string(),
                    &p.one_over_f.to_string(),
                    &format!("{:.6}", record.mean_luminance),
                    &format!("{:.6}", record.rms_contrast),
                ])?;
            }
        }

        wtr.flush()?;
        Ok(())
    }
}

mod chrono_serde {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        dt.to_rfc3339().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
