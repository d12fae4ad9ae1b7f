//! Output naming convention.
//!
//! A variant's name encodes its full parameter tuple:
//!
//! ```text
//! {stem}_c{contrast}_b{boost}_f{low}-{high}_p{orig|scr}_{1f|amp}
//! ```
//!
//! Numbers use Rust's shortest round-trip formatting (`1` for 1.0, `0.25`
//! for 0.25), which is injective over finite values, so two variants of the
//! same source collide only if every parameter is equal.

use crate::sweep::VariantParams;

/// Format a parameter value for a file name.
#[must_use]
pub fn format_value(value: f64) -> String {
    format!("{value}")
}

/// File stem (no extension) for a variant of `source_stem`.
#[must_use]
pub fn variant_stem(source_stem: &str, params: &VariantParams) -> String {
    format!(
        "{}_c{}_b{}_f{}-{}_p{}_{}",
        source_stem,
        format_value(params.contrast),
        format_value(params.boost),
        format_value(params.band.low()),
        format_value(params.band.high()),
        params.phase.code(),
        if params.one_over_f { "1f" } else { "amp" },
    )
}

/// File name with extension for a variant of `source_stem`.
#[must_use]
pub fn variant_file_name(source_stem: &str, params: &VariantParams, extension: &str) -> String {
    format!("{}.{}", variant_stem(source_stem, params), extension)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::spectrum::{FrequencyBand, PhaseMode};
    use crate::sweep::SweepConfig;

    #[test]
    fn test_stem_encodes_parameters() {
        let params = VariantParams {
            contrast: 0.5,
            boost: 2.0,
            band: FrequencyBand::new(8.0, 40.0).unwrap(),
            phase: PhaseMode::Scrambled,
            one_over_f: false,
        };
        assert_eq!(variant_stem("face01", &params), "face01_c0.5_b2_f8-40_pscr_amp");
        assert_eq!(
            variant_file_name("face01", &params, "png"),
            "face01_c0.5_b2_f8-40_pscr_amp.png"
        );
    }

    #[test]
    fn test_negative_and_fractional_values() {
        let params = VariantParams {
            contrast: -1.25,
            boost: 0.0,
            band: FrequencyBand::new(2.5, 3.0).unwrap(),
            phase: PhaseMode::Original,
            one_over_f: true,
        };
        assert_eq!(variant_stem("x", &params), "x_c-1.25_b0_f2.5-3_porig_1f");
    }

    #[test]
    fn test_names_are_unique_across_sweep() {
        let config = SweepConfig::builder()
            .contrast_factors(vec![0.1, 0.25, 1.0, 1.5])
            .boost_factors(vec![0.0, 0.5, 1.0, 2.0])
            .frequency_bands(vec![
                FrequencyBand::new(8.0, 40.0).unwrap(),
                FrequencyBand::new(8.0, 4.0e1 + 0.5).unwrap(),
                FrequencyBand::new(0.0, 8.0).unwrap(),
            ])
            .build()
            .unwrap();
        let names: HashSet<String> = config
            .combinations()
            .map(|params| variant_stem("img", &params))
            .collect();
        assert_eq!(names.len(), config.variant_count());
    }
}
