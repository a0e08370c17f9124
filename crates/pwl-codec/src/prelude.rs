//! Prelude module for common codec types.
//!
//! This module provides a convenient way to import the most commonly used
//! types from the codec crate.

pub use crate::codec::Codec;
pub use crate::config::CodecConfig;
pub use crate::control_points::{ControlPoints, Segment};
pub use crate::error::{PwlError, PwlResult};
pub use crate::mode::InterpolationMode;
pub use crate::stats::ErrorStats;
pub use crate::transform::{expand, reduce};
