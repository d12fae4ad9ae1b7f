//! # spectral-sweep
//!
//! Spectral image manipulation for perception experiments.
//!
//! Each source image is decomposed into its Fourier amplitude and phase, and
//! a grid of variants is produced by sweeping a contrast factor (deviations
//! from the mean luminance are scaled by it), a mid-frequency amplitude boost,
//! and phase handling (original or scrambled). The amplitude
//! can optionally be replaced by a canonical 1/f envelope. Every variant is
//! normalized and contrast-adjusted back into displayable `[0, 1]` luminance.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spectral_sweep::{BatchConfig, BatchRunner, FrequencyBand, PhaseModes, SweepConfig};
//!
//! let sweep = SweepConfig::builder()
//!     .contrast_factors(vec![0.5, 1.0, 1.5])
//!     .boost_factors(vec![0.5, 1.0, 2.0])
//!     .frequency_bands(vec![FrequencyBand::new(8.0, 40.0)?])
//!     .phase_modes(PhaseModes::both())
//!     .build()?;
//!
//! let batch = BatchConfig::builder()
//!     .input_dir("./stimuli")
//!     .output_dir("./variants")
//!     .build()?;
//!
//! let report = BatchRunner::new(batch, sweep).run(&mut rand::thread_rng())?;
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`luma`]: Grayscale image helpers and statistics
//! - [`adjust`]: Contrast adjustment and normalization
//! - [`spectrum`]: Fourier decomposition, frequency masks, phase and 1/f envelopes
//! - [`sweep`]: Sweep configuration, parameter grid and per-image controller
//! - [`io`]: Image loading and atomic writes
//! - [`batch`]: Directory processing and manifests

pub mod adjust;
pub mod batch;
pub mod error;
pub mod io;
pub mod luma;
pub mod spectrum;
pub mod sweep;

// Re-export commonly used types
pub use batch::{BatchConfig, BatchRunner, RunReport};
pub use error::{Error, Result};
pub use io::OutputFormat;
pub use luma::LumaImage;
pub use spectrum::{FrequencyBand, PhaseMode, PhaseModes, SpectralTransform, Spectrum};
pub use sweep::{SweepConfig, SweepController, SweepSettings, Variant, VariantParams};
