//! Round-trip validation scenarios with documented error bounds.
//!
//! Two shapes cover the intended deployments:
//!
//! ```text
//!  Linear                             Windowed
//!   out                                out
//!    ^                                  ^
//! Ymax +            +------>         Ymax +             +------>
//!      |          .                       |           .
//!      |       .                          |        .
//!      |    .                             |     .
//!    0 +.-----------+------> in         0 +----+--------+------> in
//!      0          Xmax                       start   start+N-1
//! ```
//!
//! A linear scenario squeezes every `bpp_in`-bit value into `bpp_out` bits
//! and bounds the reconstruction error. A windowed scenario maps exactly
//! `N = 2^bpp_out` consecutive input values onto the full output range, a
//! bijection that must round-trip without loss.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::codec::Codec;
use crate::control_points::ControlPoints;
use crate::error::{PwlError, PwlResult};
use crate::mode::InterpolationMode;
use crate::stats::ErrorStats;

/// Largest bits-per-sample a scenario may use on either side.
pub const MAX_SCENARIO_BPP: u8 = 16;

/// Average-error limit for a fixed-point linear scenario.
pub const FIXED_POINT_AVG_ERR_LIMIT: f64 = 0.51;

/// A self-contained round-trip test case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Scenario {
    /// Full `bpp_in`-bit range mapped linearly onto `bpp_out` bits.
    Linear {
        /// Input bits per sample.
        bpp_in: u8,
        /// Output bits per sample.
        bpp_out: u8,
    },
    /// `2^bpp_out` input values starting at `start`, mapped onto `bpp_out` bits.
    Windowed {
        /// First input value of the window.
        start: u32,
        /// Output bits per sample.
        bpp_out: u8,
    },
}

impl Scenario {
    /// A linear scenario.
    ///
    /// # Errors
    ///
    /// Returns [`PwlError::InvalidBitWidth`] unless
    /// `1 <= bpp_out <= bpp_in <= MAX_SCENARIO_BPP`.
    pub fn linear(bpp_in: u8, bpp_out: u8) -> PwlResult<Self> {
        let scenario = Self::Linear { bpp_in, bpp_out };
        scenario.validate()?;
        Ok(scenario)
    }

    /// A windowed scenario.
    ///
    /// # Errors
    ///
    /// Returns [`PwlError::InvalidBitWidth`] for `bpp_out` outside
    /// `1..=MAX_SCENARIO_BPP`, or [`PwlError::WindowOutOfRange`] when the
    /// window runs past `u32::MAX`.
    pub fn windowed(start: u32, bpp_out: u8) -> PwlResult<Self> {
        let scenario = Self::Windowed { start, bpp_out };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check the widths and window placement.
    ///
    /// Scenarios built through [`Scenario::linear`] or [`Scenario::windowed`]
    /// always pass. Every method that derives a table, samples or bounds
    /// runs this first, so a variant built by hand fails with an error
    /// instead of overflowing.
    ///
    /// # Errors
    ///
    /// Returns [`PwlError::InvalidBitWidth`] or [`PwlError::WindowOutOfRange`].
    pub fn validate(&self) -> PwlResult<()> {
        match *self {
            Self::Linear { bpp_in, bpp_out } => {
                if bpp_out == 0 || bpp_out > bpp_in || bpp_in > MAX_SCENARIO_BPP {
                    return Err(PwlError::InvalidBitWidth {
                        bpp_in,
                        bpp_out,
                        max: MAX_SCENARIO_BPP,
                    });
                }
            }
            Self::Windowed { start, bpp_out } => {
                if bpp_out == 0 || bpp_out > MAX_SCENARIO_BPP {
                    return Err(PwlError::InvalidBitWidth {
                        bpp_in: bpp_out,
                        bpp_out,
                        max: MAX_SCENARIO_BPP,
                    });
                }
                let len = 1u32 << bpp_out;
                if start.checked_add(len - 1).is_none() {
                    return Err(PwlError::WindowOutOfRange { start, len });
                }
            }
        }
        Ok(())
    }

    /// Every linear scenario with `bpp_in` in `min_in..=max_in` and
    /// `bpp_out` in `min_out..=bpp_in`.
    ///
    /// # Errors
    ///
    /// Fails if any generated pair is invalid (see [`Scenario::linear`]).
    pub fn linear_sweep(min_in: u8, max_in: u8, min_out: u8) -> PwlResult<Vec<Self>> {
        let mut scenarios = Vec::new();
        for bpp_in in min_in..=max_in {
            for bpp_out in min_out..=bpp_in {
                scenarios.push(Self::linear(bpp_in, bpp_out)?);
            }
        }
        Ok(scenarios)
    }

    /// Linear sweep of 9..=16 input bits down to 8..=`bpp_in` output bits,
    /// followed by a 12-bit window starting at 2000 in a 16-bit range.
    pub fn standard_suite() -> Vec<Self> {
        let mut suite: Vec<Self> = (9..=MAX_SCENARIO_BPP)
            .flat_map(|bpp_in| (8..=bpp_in).map(move |bpp_out| Self::Linear { bpp_in, bpp_out }))
            .collect();
        suite.push(Self::Windowed {
            start: 2000,
            bpp_out: 12,
        });
        suite
    }

    /// Control points describing the scenario's mapping.
    ///
    /// # Errors
    ///
    /// Fails when [`Scenario::validate`] does.
    pub fn control_points(&self) -> PwlResult<ControlPoints> {
        self.validate()?;
        match *self {
            Self::Linear { bpp_in, bpp_out } => {
                ControlPoints::linear(0, max_value(bpp_in), 0, max_narrow(bpp_out))
            }
            Self::Windowed { start, bpp_out } => {
                let stop = start.saturating_add(max_value(bpp_out));
                ControlPoints::linear(start, stop, 0, max_narrow(bpp_out))
            }
        }
    }

    /// Input samples the scenario feeds through the codec.
    ///
    /// # Errors
    ///
    /// Fails when [`Scenario::validate`] does.
    pub fn samples(&self) -> PwlResult<Vec<u32>> {
        self.validate()?;
        Ok(match *self {
            Self::Linear { bpp_in, .. } => (0..=max_value(bpp_in)).collect(),
            Self::Windowed { start, bpp_out } => {
                (start..=start.saturating_add(max_value(bpp_out))).collect()
            }
        })
    }

    /// Largest acceptable `max_abs_err` under `mode`.
    ///
    /// # Errors
    ///
    /// Fails when [`Scenario::validate`] does.
    pub fn max_abs_err_bound(&self, mode: InterpolationMode) -> PwlResult<u32> {
        self.validate()?;
        Ok(match *self {
            Self::Linear { bpp_in, bpp_out } if bpp_in == bpp_out => mode.extra_error(),
            Self::Linear { bpp_in, bpp_out } => {
                (1u32 << (bpp_in - bpp_out - 1)) + mode.extra_error()
            }
            Self::Windowed { .. } => 0,
        })
    }

    /// Limit on `|avg_err|`; zero means the average must be exactly zero.
    pub fn avg_err_limit(&self, mode: InterpolationMode) -> f64 {
        match (self, mode) {
            (Self::Linear { .. }, InterpolationMode::FixedPoint) => FIXED_POINT_AVG_ERR_LIMIT,
            _ => 0.0,
        }
    }

    /// Reduce and expand the scenario's samples and check the bounds.
    ///
    /// # Errors
    ///
    /// Fails when [`Scenario::validate`] does, or if the scenario's table
    /// cannot be used in `mode`.
    pub fn run(&self, mode: InterpolationMode) -> PwlResult<ScenarioReport> {
        let codec = Codec::new(self.control_points()?, mode)?;
        let stats = codec.round_trip(&self.samples()?)?;
        let report = ScenarioReport {
            scenario: *self,
            mode,
            stats,
            max_abs_err_bound: self.max_abs_err_bound(mode)?,
            avg_err_limit: self.avg_err_limit(mode),
        };

        debug!(
            scenario = %self,
            mode = %mode,
            max_abs_err = stats.max_abs_err,
            avg_err = stats.avg_err,
            passed = report.passed(),
            "scenario finished"
        );

        Ok(report)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear { bpp_in, bpp_out } => write!(f, "linear {bpp_in}->{bpp_out} bit"),
            Self::Windowed { start, bpp_out } => {
                write!(f, "windowed {bpp_out} bit from {start}")
            }
        }
    }
}

/// Outcome of one [`Scenario::run`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioReport {
    /// The scenario that ran.
    pub scenario: Scenario,
    /// Encode arithmetic used.
    pub mode: InterpolationMode,
    /// Measured round-trip error.
    pub stats: ErrorStats,
    /// Largest acceptable `max_abs_err`.
    pub max_abs_err_bound: u32,
    /// Limit on `|avg_err|`; zero means exactly zero.
    pub avg_err_limit: f64,
}

impl ScenarioReport {
    /// True when both error measures are within their bounds.
    pub fn passed(&self) -> bool {
        let avg = self.stats.avg_err.abs();
        let avg_ok = if self.avg_err_limit > 0.0 {
            avg < self.avg_err_limit
        } else {
            avg == 0.0
        };
        self.stats.max_abs_err <= self.max_abs_err_bound && avg_ok
    }
}

fn max_value(bpp: u8) -> u32 {
    (1u32 << bpp) - 1
}

fn max_narrow(bpp: u8) -> u16 {
    u16::try_from(max_value(bpp)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_linear_constructor_validates_widths() {
        assert!(Scenario::linear(12, 8).is_ok());
        assert!(Scenario::linear(8, 8).is_ok());
        assert!(Scenario::linear(8, 9).is_err());
        assert!(Scenario::linear(17, 8).is_err());
        assert!(Scenario::linear(8, 0).is_err());
    }

    #[test]
    fn test_windowed_constructor_validates_range() {
        assert!(Scenario::windowed(2000, 12).is_ok());
        assert!(Scenario::windowed(0, 17).is_err());
        assert_eq!(
            Scenario::windowed(u32::MAX - 10, 8),
            Err(PwlError::WindowOutOfRange {
                start: u32::MAX - 10,
                len: 256,
            })
        );
        assert!(Scenario::windowed(u32::MAX - 255, 8).is_ok());
    }

    #[test]
    fn test_standard_suite_shape() {
        let suite = Scenario::standard_suite();
        // sum over bpp_in = 9..=16 of (bpp_in - 7) linear cases, plus one window
        assert_eq!(suite.len(), (2..=9).sum::<usize>() + 1);
        assert_eq!(
            suite.first(),
            Some(&Scenario::Linear {
                bpp_in: 9,
                bpp_out: 8,
            })
        );
        assert_eq!(
            suite.last(),
            Some(&Scenario::Windowed {
                start: 2000,
                bpp_out: 12,
            })
        );
        assert_eq!(must(Scenario::linear_sweep(9, 16, 8)).len(), suite.len() - 1);
    }

    #[test]
    fn test_bounds() {
        let same = must(Scenario::linear(10, 10));
        assert_eq!(same.max_abs_err_bound(InterpolationMode::Exact), Ok(0));
        assert_eq!(same.max_abs_err_bound(InterpolationMode::FixedPoint), Ok(1));

        let narrow = must(Scenario::linear(16, 8));
        assert_eq!(narrow.max_abs_err_bound(InterpolationMode::Exact), Ok(128));
        assert_eq!(narrow.max_abs_err_bound(InterpolationMode::FixedPoint), Ok(129));

        let window = must(Scenario::windowed(2000, 12));
        assert_eq!(window.max_abs_err_bound(InterpolationMode::FixedPoint), Ok(0));
    }

    #[test]
    fn test_samples_cover_domain() {
        let linear = must(Scenario::linear(9, 8));
        let samples = must(linear.samples());
        assert_eq!(samples.len(), 512);
        assert_eq!(samples.last(), Some(&511));

        let window = must(Scenario::windowed(2000, 12));
        let samples = must(window.samples());
        assert_eq!(samples.len(), 4096);
        assert_eq!(samples.first(), Some(&2000));
        assert_eq!(samples.last(), Some(&6095));
    }

    #[test]
    fn test_hand_built_variants_fail_instead_of_overflowing() {
        let reversed = Scenario::Linear {
            bpp_in: 8,
            bpp_out: 9,
        };
        let invalid = PwlError::InvalidBitWidth {
            bpp_in: 8,
            bpp_out: 9,
            max: MAX_SCENARIO_BPP,
        };
        assert_eq!(
            reversed.max_abs_err_bound(InterpolationMode::Exact),
            Err(invalid.clone())
        );
        assert_eq!(reversed.control_points(), Err(invalid.clone()));
        assert_eq!(reversed.samples(), Err(invalid.clone()));
        assert_eq!(reversed.run(InterpolationMode::FixedPoint), Err(invalid));

        let too_wide = Scenario::Linear {
            bpp_in: 40,
            bpp_out: 8,
        };
        assert!(matches!(
            too_wide.control_points(),
            Err(PwlError::InvalidBitWidth { bpp_in: 40, .. })
        ));
        assert!(too_wide.samples().is_err());
        assert!(too_wide.max_abs_err_bound(InterpolationMode::FixedPoint).is_err());

        let zero_out = Scenario::Linear {
            bpp_in: 8,
            bpp_out: 0,
        };
        assert!(zero_out.max_abs_err_bound(InterpolationMode::Exact).is_err());

        let wide_window = Scenario::Windowed {
            start: 0,
            bpp_out: 32,
        };
        assert!(matches!(
            wide_window.control_points(),
            Err(PwlError::InvalidBitWidth { bpp_out: 32, .. })
        ));
        assert!(wide_window.samples().is_err());

        let past_end = Scenario::Windowed {
            start: u32::MAX,
            bpp_out: 8,
        };
        assert_eq!(
            past_end.samples(),
            Err(PwlError::WindowOutOfRange {
                start: u32::MAX,
                len: 256,
            })
        );
        assert!(past_end.max_abs_err_bound(InterpolationMode::Exact).is_err());
    }

    #[test]
    fn test_window_round_trips_exactly_in_both_modes() {
        let window = must(Scenario::windowed(2000, 12));
        for mode in InterpolationMode::ALL {
            let report = must(window.run(mode));
            assert!(report.passed(), "{report:?}");
            assert_eq!(report.stats.max_abs_err, 0);
        }
    }

    #[test]
    fn test_report_passed_logic() {
        let mut report = ScenarioReport {
            scenario: Scenario::Linear {
                bpp_in: 10,
                bpp_out: 8,
            },
            mode: InterpolationMode::FixedPoint,
            stats: ErrorStats {
                max_abs_err: 3,
                avg_err: -0.5,
                samples: 1024,
            },
            max_abs_err_bound: 3,
            avg_err_limit: FIXED_POINT_AVG_ERR_LIMIT,
        };
        assert!(report.passed());

        report.stats.max_abs_err = 4;
        assert!(!report.passed());

        report.stats.max_abs_err = 0;
        report.avg_err_limit = 0.0;
        assert!(!report.passed());
    }

    #[test]
    fn test_display() {
        assert_eq!(must(Scenario::linear(12, 8)).to_string(), "linear 12->8 bit");
        assert_eq!(
            must(Scenario::windowed(2000, 12)).to_string(),
            "windowed 12 bit from 2000"
        );
    }
}
