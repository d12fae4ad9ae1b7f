//! Parsing of textual sweep parameters.
//!
//! Accepted forms:
//!
//! | Parameter | Example | Separators |
//! |-----------|---------|------------|
//! | number list | `0.5, 1, 1.5` | `,` or whitespace |
//! | band list | `8-40, 40-80` | items `,` or `;`, bounds `-` or `:` |
//! | resize | `256x256` | `x`, `X` or `,` |
//!
//! Every malformed value is an [`Error::Config`].

use crate::error::{Error, Result};
use crate::spectrum::FrequencyBand;

/// Parse a list of real numbers such as `0.5,1,1.5`.
pub fn parse_number_list(s: &str) -> Result<Vec<f64>> {
    let values = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>()
                .map_err(|_| Error::config(format!("'{part}' is not a number in list '{s}'")))
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.is_empty() {
        return Err(Error::config(format!("number list '{s}' is empty")));
    }
    Ok(values)
}

/// Parse a single band such as `8-40` or `8:40`.
pub fn parse_band(s: &str) -> Result<FrequencyBand> {
    let s = s.trim();
    let (low, high) = s
        .split_once(':')
        .or_else(|| s.split_once('-'))
        .ok_or_else(|| Error::config(format!("frequency range '{s}' must look like LOW-HIGH")))?;

    let bound = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|_| Error::config(format!("frequency range '{s}' has a malformed bound '{}'", part.trim())))
    };
    FrequencyBand::new(bound(low)?, bound(high)?)
}

/// Parse a list of bands such as `8-40,40-80`.
pub fn parse_band_list(s: &str) -> Result<Vec<FrequencyBand>> {
    let bands = s
        .split([',', ';'])
        .filter(|part| !part.trim().is_empty())
        .map(parse_band)
        .collect::<Result<Vec<_>>>()?;

    if bands.is_empty() {
        return Err(Error::config(format!("frequency range list '{s}' is empty")));
    }
    Ok(bands)
}

/// Parse a target size such as `256x256` into (width, height).
pub fn parse_resize(s: &str) -> Result<(u32, u32)> {
    let malformed = || Error::config(format!("resize '{s}' must look like WIDTHxHEIGHT"));
    let (w, h) = s.trim().split_once(['x', 'X', ',']).ok_or_else(malformed)?;
    let width: u32 = w.trim().parse().map_err(|_| malformed())?;
    let height: u32 = h.trim().parse().map_err(|_| malformed())?;
    if width == 0 || height == 0 {
        return Err(Error::config(format!("resize '{s}' has a zero dimension")));
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_list() {
        assert_eq!(parse_number_list("0.5,1,1.5").unwrap(), vec![0.5, 1.0, 1.5]);
        assert_eq!(parse_number_list(" 2 , -1  0 ").unwrap(), vec![2.0, -1.0, 0.0]);
        assert!(parse_number_list("").is_err());
        assert!(parse_number_list("1,,x").is_err());
        assert!(matches!(parse_number_list("one"), Err(Error::Config(_))));
    }

    #[test]
    fn test_band() {
        let band = parse_band("8-40").unwrap();
        assert_eq!((band.low(), band.high()), (8.0, 40.0));
        let band = parse_band(" 2.5 : 10 ").unwrap();
        assert_eq!((band.low(), band.high()), (2.5, 10.0));
        assert!(parse_band("40-8").is_err());
        assert!(parse_band("8").is_err());
        assert!(parse_band("a-b").is_err());
    }

    #[test]
    fn test_band_list() {
        let bands = parse_band_list("8-40, 40-80;0-4").unwrap();
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[2].high(), 4.0);
        assert!(parse_band_list(" , ").is_err());
    }

    #[test]
    fn test_resize() {
        assert_eq!(parse_resize("256x128").unwrap(), (256, 128));
        assert_eq!(parse_resize("64X64").unwrap(), (64, 64));
        assert_eq!(parse_resize("32, 16").unwrap(), (32, 16));
        assert!(parse_resize("256").is_err());
        assert!(parse_resize("0x10").is_err());
        assert!(parse_resize("-4x10").is_err());
    }
}
