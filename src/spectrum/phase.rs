//! Phase selection: keep the original phase or scramble it.
//!
//! Randomisation draws from a generator the caller passes in. Nothing here
//! touches a process-wide RNG, so tests can substitute a seeded one.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::luma::{self, LumaImage};

/// How a variant's phase spectrum is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseMode {
    /// Keep the image's own phase.
    Original,
    /// Replace phase with uniform noise in `(-π, π]`.
    Scrambled,
}

impl PhaseMode {
    /// Short code used in output file names.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Original => "orig",
            Self::Scrambled => "scr",
        }
    }

    /// Produce the phase grid for this mode.
    ///
    /// `Scrambled` draws a fresh grid from `rng` on every call.
    pub fn apply<R: Rng + ?Sized>(self, phase: &LumaImage, rng: &mut R) -> LumaImage {
        match self {
            Self::Original => passthrough(phase),
            Self::Scrambled => randomize(phase.width(), phase.height(), rng),
        }
    }
}

impl fmt::Display for PhaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Scrambled => write!(f, "scrambled"),
        }
    }
}

impl FromStr for PhaseMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "original" | "orig" => Ok(Self::Original),
            "scrambled" | "scr" | "random" => Ok(Self::Scrambled),
            other => Err(Error::config(format!(
                "unknown phase mode '{other}' (expected original, scrambled or both)"
            ))),
        }
    }
}

/// Ordered, non-empty set of phase modes to sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhaseModes(Vec<PhaseMode>);

impl PhaseModes {
    /// Both modes, original first.
    #[must_use]
    pub fn both() -> Self {
        Self(vec![PhaseMode::Original, PhaseMode::Scrambled])
    }

    /// A single mode.
    #[must_use]
    pub fn only(mode: PhaseMode) -> Self {
        Self(vec![mode])
    }

    /// Build from a list, rejecting empty lists and duplicates.
    pub fn new(modes: Vec<PhaseMode>) -> Result<Self> {
        if modes.is_empty() {
            return Err(Error::config("at least one phase mode is required"));
        }
        for (i, mode) in modes.iter().enumerate() {
            if modes[..i].contains(mode) {
                return Err(Error::config(format!("phase mode '{mode}' listed twice")));
            }
        }
        Ok(Self(modes))
    }

    /// Modes in sweep order.
    #[must_use]
    pub fn as_slice(&self) -> &[PhaseMode] {
        &self.0
    }

    /// Number of modes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated set; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PhaseModes {
    fn default() -> Self {
        Self::both()
    }
}

impl fmt::Display for PhaseModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::both() {
            return write!(f, "both");
        }
        let names: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", names.join(","))
    }
}

impl FromStr for PhaseModes {
    type Err = Error;

    /// Accepts `original`, `scrambled`, `both`, or a comma list of modes.
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("both") {
            return Ok(Self::both());
        }
        let modes = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<PhaseMode>>>()?;
        Self::new(modes)
    }
}

impl TryFrom<String> for PhaseModes {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<PhaseModes> for String {
    fn from(modes: PhaseModes) -> Self {
        modes.to_string()
    }
}

/// Uniform random phase in `(-π, π]` for every cell.
pub fn randomize<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> LumaImage {
    // gen::<f64>() is in [0, 1), so PI - TAU * u is in (-PI, PI]
    luma::from_fn(width, height, |_, _| PI - TAU * rng.r#gen::<f64>())
}

/// The phase grid, unchanged.
#[must_use]
pub fn passthrough(phase: &LumaImage) -> LumaImage {
    phase.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_randomize_range_and_spread() {
        let mut rng = StdRng::seed_from_u64(7);
        let phase = randomize(64, 64, &mut rng);
        assert!(phase.buf().iter().all(|&p| p > -PI && p <= PI));
        let mean = luma::mean(&phase);
        assert!(mean.abs() < 0.2, "mean {mean} should be near 0");
        assert!(phase.buf().iter().any(|&p| p > 2.0));
        assert!(phase.buf().iter().any(|&p| p < -2.0));
    }

    #[test]
    fn test_fresh_draw_per_call() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = randomize(8, 8, &mut rng);
        let b = randomize(8, 8, &mut rng);
        assert_ne!(a.buf(), b.buf());
    }

    #[test]
    fn test_seeded_draws_are_reproducible() {
        let a = randomize(8, 8, &mut StdRng::seed_from_u64(42));
        let b = randomize(8, 8, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.buf(), b.buf());
    }

    #[test]
    fn test_original_mode_passes_through() {
        let phase = luma::from_fn(4, 4, |x, y| (x as f64 - y as f64) * 0.1);
        let mut rng = StdRng::seed_from_u64(0);
        let out = PhaseMode::Original.apply(&phase, &mut rng);
        assert_eq!(out.buf(), phase.buf());
        let scrambled = PhaseMode::Scrambled.apply(&phase, &mut rng);
        assert_ne!(scrambled.buf(), phase.buf());
        assert_eq!((scrambled.width(), scrambled.height()), (4, 4));
    }

    #[test]
    fn test_parse_phase_modes() {
        assert_eq!("both".parse::<PhaseModes>().unwrap(), PhaseModes::both());
        assert_eq!(
            "scrambled".parse::<PhaseModes>().unwrap().as_slice(),
            &[PhaseMode::Scrambled]
        );
        assert_eq!(
            "scrambled, original".parse::<PhaseModes>().unwrap().as_slice(),
            &[PhaseMode::Scrambled, PhaseMode::Original]
        );
        assert!("".parse::<PhaseModes>().is_err());
        assert!("original,original".parse::<PhaseModes>().is_err());
        assert!("inverted".parse::<PhaseModes>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        assert_eq!(PhaseModes::both().to_string(), "both");
        let single = PhaseModes::only(PhaseMode::Original);
        assert_eq!(single.to_string(), "original");
        assert_eq!(single.to_string().parse::<PhaseModes>().unwrap(), single);
    }
}
