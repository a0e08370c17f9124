//! Piecewise-linear bit-width reduction for sensor sample streams.
//!
//! This crate maps wide unsigned samples (up to 32 bits) onto a narrower
//! codomain (up to 16 bits) through a small table of control points, and
//! maps them back again. The mapping is lossy: how much precision survives
//! in each input range is decided by where the control points sit.
//!
//! # Overview
//!
//! - [`ControlPoints`]: validated `(X, Y)` table, X strictly increasing,
//!   Y non-decreasing
//! - [`reduce`] / [`expand`]: one-shot encode and decode
//! - [`Codec`]: table, mode and precomputed gains bundled for reuse,
//!   including scoped-thread batch helpers
//! - [`InterpolationMode`]: exact per-sample division, or 16-bit
//!   fixed-point gains (the default)
//! - [`ErrorStats`] and [`Scenario`]: round-trip error measurement and
//!   the linear and windowed validation suites
//! - [`stream`]: headerless little-endian sample files
//!
//! # Arithmetic
//!
//! Every intermediate product is computed in `u64` and every division
//! rounds half up. Decode always divides exactly. Fixed-point encode adds
//! at most one output step of error and accepts tables of up to
//! [`MAX_CONTROL_POINTS`] points whose segments span at most
//! [`MAX_SEGMENT_WIDTH`] domain values.
//!
//! # Example
//!
//! ```
//! use pwl_codec::{Codec, ControlPoints, InterpolationMode};
//!
//! // 12-bit window of a 16-bit sensor, starting at 2000
//! let points = ControlPoints::linear(2000, 6095, 0, 4095)?;
//! let codec = Codec::new(points, InterpolationMode::FixedPoint)?;
//!
//! let samples = [0, 2000, 3000, 6095, 65_535];
//! let narrow = codec.reduce(&samples);
//! assert_eq!(narrow, vec![0, 0, 1000, 4095, 4095]);
//!
//! let stats = codec.round_trip(&[2000, 3000, 6095])?;
//! assert!(stats.is_lossless());
//! # Ok::<(), pwl_codec::PwlError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod codec;
pub mod config;
pub mod control_points;
pub mod error;
pub mod gain;
pub mod mode;
pub mod prelude;
pub mod scenario;
pub mod stats;
pub mod stream;
pub mod transform;

pub use codec::{Codec, MIN_PARALLEL_CHUNK};
pub use config::CodecConfig;
pub use control_points::{ControlPoints, Segment};
pub use error::{PwlError, PwlResult};
pub use gain::{GAIN_FBITS, GAIN_ROUND, GainTable, MAX_CONTROL_POINTS, MAX_SEGMENT_WIDTH};
pub use mode::{InterpolationMode, ParseModeError};
pub use scenario::{Scenario, ScenarioReport};
pub use stats::ErrorStats;
pub use transform::{expand, reduce};
