//! Interpolation arithmetic selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Arithmetic used by the encode path to interpolate inside a segment.
///
/// Both modes share the clamping and segment search; they differ only in how
/// `(v - X[j]) * dY / dX` is evaluated. Decode always divides exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterpolationMode {
    /// Per-sample integer division with round-half-up.
    Exact,

    /// Precomputed 16-bit fractional gains, multiply and shift per sample.
    ///
    /// Adds at most one output step of error relative to [`Self::Exact`]
    /// and requires at most four control points with segments no wider than
    /// `2^16` domain values.
    #[default]
    FixedPoint,
}

impl InterpolationMode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 2] = [Self::Exact, Self::FixedPoint];

    /// Stable lowercase name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::FixedPoint => "fixed-point",
        }
    }

    /// Extra round-trip error, in wide-domain units, the mode may add on top
    /// of the quantization bound.
    pub const fn extra_error(self) -> u32 {
        match self {
            Self::Exact => 0,
            Self::FixedPoint => 1,
        }
    }
}

impl fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised [`InterpolationMode`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown interpolation mode '{0}', expected 'exact' or 'fixed-point'")]
pub struct ParseModeError(String);

impl FromStr for InterpolationMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "divide" => Ok(Self::Exact),
            "fixed-point" | "fixed_point" | "fixed" => Ok(Self::FixedPoint),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fixed_point() {
        assert_eq!(InterpolationMode::default(), InterpolationMode::FixedPoint);
    }

    #[test]
    fn test_parse_and_display_agree() {
        for mode in InterpolationMode::ALL {
            let parsed: Result<InterpolationMode, _> = mode.to_string().parse();
            assert_eq!(parsed, Ok(mode));
        }
        assert_eq!("FIXED".parse(), Ok(InterpolationMode::FixedPoint));
        assert!("float".parse::<InterpolationMode>().is_err());
    }

    #[test]
    fn test_serde_names() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::to_string(&InterpolationMode::FixedPoint)?,
            "\"fixed-point\""
        );
        let mode: InterpolationMode = serde_json::from_str("\"exact\"")?;
        assert_eq!(mode, InterpolationMode::Exact);
        Ok(())
    }
}
