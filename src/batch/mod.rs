//! Batch processing of an input directory.
//!
//! [`BatchRunner`] discovers images, runs the sweep on each one in turn,
//! writes every variant, and collects a [`RunReport`]. A file that fails to
//! decode or write is reported and skipped; configuration problems abort the
//! run before any file is touched.
//!
//! ## Example
//!
//! ```rust,ignore
//! use spectral_sweep::{BatchConfig, BatchRunner, SweepConfig};
//!
//! let batch = BatchConfig::builder()
//!     .input_dir("./stimuli")
//!     .output_dir("./variants")
//!     .resize(256, 256)
//!     .build()?;
//! let sweep = SweepConfig::builder().build()?;
//!
//! let report = BatchRunner::new(batch, sweep).run(&mut rand::thread_rng())?;
//! println!("{} variants", report.total_variants());
//! ```

pub mod discovery;
pub mod report;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::io::{self, OutputFormat};
use crate::luma;
use crate::sweep::{SweepConfig, SweepController, naming};

pub use discovery::discover_images;
pub use report::{FileFailure, ImageReport, RunReport, VariantRecord};

/// CSV manifest file name inside the output directory.
pub const MANIFEST_CSV: &str = "manifest.csv";
/// JSON manifest file name inside the output directory.
pub const MANIFEST_JSON: &str = "manifest.json";

/// Where to read inputs, where to write outputs, and how.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory scanned for input images.
    pub input_dir: PathBuf,

    /// Directory that receives variants and manifests.
    pub output_dir: PathBuf,

    /// Resize every input to (width, height) before processing.
    pub resize: Option<(u32, u32)>,

    /// Raster format for variants.
    pub format: OutputFormat,

    /// Write `manifest.csv` and `manifest.json`.
    pub write_manifest: bool,
}

impl BatchConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder::default()
    }
}

/// Builder for [`BatchConfig`].
#[derive(Debug, Default)]
pub struct BatchConfigBuilder {
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    resize: Option<(u32, u32)>,
    format: Option<OutputFormat>,
    write_manifest: Option<bool>,
}

impl BatchConfigBuilder {
    /// Set the input directory.
    #[must_use]
    pub fn input_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_dir = Some(path.into());
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Resize inputs to `width` x `height`.
    #[must_use]
    pub fn resize(mut self, width: u32, height: u32) -> Self {
        self.resize = Some((width, height));
        self
    }

    /// Set the output format.
    #[must_use]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Enable or disable manifest files (enabled by default).
    #[must_use]
    pub fn write_manifest(mut self, enabled: bool) -> Self {
        self.write_manifest = Some(enabled);
        self
    }

    /// Build the configuration.
    ///
    /// Fails if a directory is missing or a resize dimension is zero.
    pub fn build(self) -> Result<BatchConfig> {
        let input_dir = self
            .input_dir
            .ok_or_else(|| Error::config("input directory is required"))?;
        let output_dir = self
            .output_dir
            .ok_or_else(|| Error::config("output directory is required"))?;
        if let Some((w, h)) = self.resize {
            if w == 0 || h == 0 {
                return Err(Error::config(format!("resize {w}x{h} has a zero dimension")));
            }
        }

        Ok(BatchConfig {
            input_dir,
            output_dir,
            resize: self.resize,
            format: self.format.unwrap_or_default(),
            write_manifest: self.write_manifest.unwrap_or(true),
        })
    }
}

/// Runs one sweep configuration over every image in a directory.
#[derive(Debug)]
pub struct BatchRunner {
    batch: BatchConfig,
    sweep: SweepConfig,
}

impl BatchRunner {
    /// Create a runner.
    #[must_use]
    pub fn new(batch: BatchConfig, sweep: SweepConfig) -> Self {
        Self { batch, sweep }
    }

    /// Batch settings.
    #[must_use]
    pub fn batch_config(&self) -> &BatchConfig {
        &self.batch
    }

    /// Sweep settings.
    #[must_use]
    pub fn sweep_config(&self) -> &SweepConfig {
        &self.sweep
    }

    /// Process every discovered image.
    ///
    /// Returns [`Error::NoImages`] without creating the output directory when
    /// there is nothing to process. Per-file errors (see
    /// [`Error::is_per_file`]) are recorded in the report and the run moves on.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RunReport> {
        let inputs = discover_images(&self.batch.input_dir)?;
        if inputs.is_empty() {
            return Err(Error::NoImages(self.batch.input_dir.clone()));
        }
        let stems = source_stems(&inputs)?;

        info!(
            images = inputs.len(),
            variants_per_image = self.sweep.variant_count(),
            "starting sweep: {}",
            self.sweep.summary()
        );

        fs::create_dir_all(&self.batch.output_dir)?;

        let mut report = RunReport::new(&self.batch.input_dir, &self.batch.output_dir, &self.sweep);
        let mut controller = SweepController::new(&self.sweep);

        for (path, stem) in inputs.iter().zip(&stems) {
            match self.process_file(&mut controller, path, stem, rng) {
                Ok(image_report) => {
                    info!(
                        "{}: wrote {} variants",
                        path.display(),
                        image_report.variants.len()
                    );
                    report.images.push(image_report);
                }
                Err(e) if e.is_per_file() => {
                    warn!("{}: skipped: {}", path.display(), e);
                    report.failures.push(FileFailure {
                        path: path.clone(),
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        if self.batch.write_manifest {
            report.write_csv(&self.batch.output_dir.join(MANIFEST_CSV))?;
            report.write_json(&self.batch.output_dir.join(MANIFEST_JSON))?;
        }

        info!(
            processed = report.images.len(),
            failed = report.failures.len(),
            variants = report.total_variants(),
            "sweep finished"
        );
        Ok(report)
    }

    /// Load one image, sweep it, and write each variant as it is produced.
    ///
    /// On failure, variants already written for this image are removed so the
    /// output directory only holds images listed in the manifest.
    fn process_file<R: Rng + ?Sized>(
        &self,
        controller: &mut SweepController<'_>,
        path: &Path,
        stem: &str,
        rng: &mut R,
    ) -> Result<ImageReport> {
        let source = io::load_luma(path, self.batch.resize)?;

        let mut image_report = ImageReport::new(path, source.width() as u32, source.height() as u32);
        let output_dir = &self.batch.output_dir;
        let format = self.batch.format;

        let result = controller.run(&source, rng, |variant| {
            let file_name = naming::variant_file_name(stem, &variant.params, format.extension());
            io::save_luma(&variant.image, output_dir.join(&file_name), format)?;
            debug!("wrote {}", file_name);

            image_report.variants.push(VariantRecord {
                file_name,
                params: variant.params,
                mean_luminance: luma::mean(&variant.image),
                rms_contrast: luma::rms_contrast(&variant.image),
            });
            Ok(())
        });

        if let Err(e) = result {
            for record in &image_report.variants {
                let written = output_dir.join(&record.file_name);
                if let Err(remove_err) = fs::remove_file(&written) {
                    debug!("could not remove {}: {}", written.display(), remove_err);
                }
            }
            return Err(e);
        }
        Ok(image_report)
    }
}

/// Output stem for each input, unique within the batch.
///
/// The file stem is used when no other input shares it; inputs that share a
/// stem (`face.png`, `face.bmp`) keep their full file name instead. Any name
/// still colliding after that is a configuration error.
fn source_stems(inputs: &[PathBuf]) -> Result<Vec<String>> {
    let stem_of = |path: &Path| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    };

    let mut counts: HashMap<String, usize> = HashMap::new();
    for path in inputs {
        *counts.entry(stem_of(path)).or_default() += 1;
    }

    let stems: Vec<String> = inputs
        .iter()
        .map(|path| {
            let stem = stem_of(path);
            if counts[&stem] > 1 {
                path.file_name()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or(stem)
            } else {
                stem
            }
        })
        .collect();

    let mut owners: HashMap<&str, &Path> = HashMap::new();
    for (stem, path) in stems.iter().zip(inputs) {
        if let Some(other) = owners.insert(stem.as_str(), path) {
            return Err(Error::config(format!(
                "{} and {} map to the same output name '{}'",
                other.display(),
                path.display(),
                stem
            )));
        }
    }
    Ok(stems)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::spectrum::{FrequencyBand, PhaseModes};

    fn small_sweep() -> SweepConfig {
        SweepConfig::builder()
            .contrast_factors(vec![0.5, 1.0])
            .boost_factors(vec![2.0])
            .frequency_bands(vec![FrequencyBand::new(2.0, 6.0).unwrap()])
            .phase_modes(PhaseModes::both())
            .build()
            .unwrap()
    }

    fn write_input(dir: &Path, name: &str) {
        let image = luma::from_fn(16, 16, |x, y| ((x * 3 + y * 5) % 16) as f64 / 15.0);
        io::save_luma(&image, dir.join(name), OutputFormat::Png).unwrap();
    }

    #[test]
    fn test_batch_config_builder() {
        let config = BatchConfig::builder()
            .input_dir("/tmp/in")
            .output_dir("/tmp/out")
            .resize(64, 32)
            .format(OutputFormat::Tiff)
            .build()
            .unwrap();
        assert_eq!(config.input_dir, PathBuf::from("/tmp/in"));
        assert_eq!(config.resize, Some((64, 32)));
        assert_eq!(config.format, OutputFormat::Tiff);
        assert!(config.write_manifest);

        assert!(BatchConfig::builder().output_dir("/tmp/out").build().is_err());
        assert!(
            BatchConfig::builder()
                .input_dir("a")
                .output_dir("b")
                .resize(0, 4)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_run_writes_variants_and_manifests() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_input(input.path(), "one.png");
        write_input(input.path(), "two.png");

        let batch = BatchConfig::builder()
            .input_dir(input.path())
            .output_dir(output.path().join("variants"))
            .resize(8, 8)
            .build()
            .unwrap();
        let runner = BatchRunner::new(batch, small_sweep());
        let report = runner.run(&mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(report.images.len(), 2);
        assert_eq!(report.total_variants(), 8);
        assert!(report.is_complete());

        let out_dir = output.path().join("variants");
        for img in &report.images {
            assert_eq!((img.width, img.height), (8, 8));
            for record in &img.variants {
                assert!(out_dir.join(&record.file_name).is_file());
                assert!((0.0..=1.0).contains(&record.mean_luminance));
            }
        }
        assert!(out_dir.join("one_c0.5_b2_f2-6_pscr_amp.png").is_file());
        assert!(out_dir.join(MANIFEST_CSV).is_file());
        assert!(out_dir.join(MANIFEST_JSON).is_file());
    }

    #[test]
    fn test_run_continues_past_bad_file() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_input(input.path(), "good.png");
        std::fs::write(input.path().join("bad.png"), b"not an image").unwrap();

        let batch = BatchConfig::builder()
            .input_dir(input.path())
            .output_dir(output.path())
            .write_manifest(false)
            .build()
            .unwrap();
        let report = BatchRunner::new(batch, small_sweep())
            .run(&mut StdRng::seed_from_u64(2))
            .unwrap();

        assert_eq!(report.images.len(), 1);
        assert_eq!(report.images[0].name, "good.png");
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("bad.png"));
        assert!(!output.path().join(MANIFEST_CSV).exists());
    }

    #[test]
    fn test_empty_input_creates_nothing() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("notes.txt"), b"").unwrap();
        let out_dir = output.path().join("variants");

        let batch = BatchConfig::builder()
            .input_dir(input.path())
            .output_dir(&out_dir)
            .build()
            .unwrap();
        let err = BatchRunner::new(batch, small_sweep())
            .run(&mut StdRng::seed_from_u64(0))
            .unwrap_err();

        assert!(matches!(err, Error::NoImages(_)));
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_shared_stems_keep_distinct_names() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_input(input.path(), "face.png");
        let image = luma::from_fn(16, 16, |x, _| x as f64 / 15.0);
        io::save_luma(&image, input.path().join("face.bmp"), OutputFormat::Bmp).unwrap();
        write_input(input.path(), "scene.png");

        let batch = BatchConfig::builder()
            .input_dir(input.path())
            .output_dir(output.path())
            .build()
            .unwrap();
        let sweep = SweepConfig::builder()
            .contrast_factors(vec![1.0])
            .boost_factors(vec![1.0])
            .frequency_bands(vec![FrequencyBand::new(2.0, 6.0).unwrap()])
            .build()
            .unwrap();
        let report = BatchRunner::new(batch, sweep)
            .run(&mut StdRng::seed_from_u64(4))
            .unwrap();

        let names: Vec<&str> = report
            .images
            .iter()
            .flat_map(|img| img.variants.iter().map(|v| v.file_name.as_str()))
            .collect();
        assert_eq!(names.len(), 6);
        let unique: std::collections::HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), 6);
        for name in &names {
            assert!(output.path().join(name).is_file(), "{name} missing");
        }
        assert!(names.contains(&"face.bmp_c1_b1_f2-6_porig_amp.png"));
        assert!(names.contains(&"face.png_c1_b1_f2-6_pscr_amp.png"));
        assert!(names.contains(&"scene_c1_b1_f2-6_porig_amp.png"));
    }

    #[test]
    fn test_source_stems() {
        let inputs = vec![
            PathBuf::from("in/a.jpg"),
            PathBuf::from("in/a.png"),
            PathBuf::from("in/b.png"),
        ];
        assert_eq!(source_stems(&inputs).unwrap(), vec!["a.jpg", "a.png", "b"]);

        // "x.png" is both a full name and the stem of "x.png.jpg"
        let clash = vec![
            PathBuf::from("in/x.bmp"),
            PathBuf::from("in/x.png"),
            PathBuf::from("in/x.png.jpg"),
        ];
        assert!(matches!(source_stems(&clash), Err(Error::Config(_))));
    }

    #[test]
    fn test_failed_file_leaves_no_partial_variants() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_input(input.path(), "one.png");
        write_input(input.path(), "two.png");
        // a directory in the way of one.png's second variant makes its write fail
        std::fs::create_dir(output.path().join("one_c0.5_b2_f2-6_pscr_amp.png")).unwrap();

        let batch = BatchConfig::builder()
            .input_dir(input.path())
            .output_dir(output.path())
            .build()
            .unwrap();
        let report = BatchRunner::new(batch, small_sweep())
            .run(&mut StdRng::seed_from_u64(6))
            .unwrap();

        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("one.png"));
        assert_eq!(report.images.len(), 1);
        assert_eq!(report.images[0].name, "two.png");

        let leftovers: Vec<String> = std::fs::read_dir(output.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("one_") && output.path().join(name).is_file())
            .collect();
        assert!(leftovers.is_empty(), "partial outputs left: {leftovers:?}");
        assert!(!output.path().join("one_c0.5_b2_f2-6_pscr_amp.png.partial").exists());
    }
}
