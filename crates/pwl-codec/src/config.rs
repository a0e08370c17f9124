//! Serializable codec configuration.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codec::Codec;
use crate::control_points::ControlPoints;
use crate::error::PwlResult;
use crate::mode::InterpolationMode;

/// A control-point table plus the encode arithmetic to run it with.
///
/// The table is validated while deserializing, so a `CodecConfig` read from
/// disk always holds a usable table. The mode is still checked against the
/// table in [`CodecConfig::build`] since fixed-point mode has tighter limits.
///
/// ```
/// use pwl_codec::{CodecConfig, InterpolationMode};
///
/// let config: CodecConfig = serde_json::from_str(
///     r#"{ "control_points": { "x": [0, 255], "y": [0, 15] } }"#,
/// )?;
/// assert_eq!(config.mode, InterpolationMode::FixedPoint);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Mapping table.
    pub control_points: ControlPoints,
    /// Encode arithmetic, fixed-point unless stated.
    #[serde(default)]
    pub mode: InterpolationMode,
}

impl CodecConfig {
    /// Pair `control_points` with `mode`.
    pub fn new(control_points: ControlPoints, mode: InterpolationMode) -> Self {
        Self {
            control_points,
            mode,
        }
    }

    /// Build a [`Codec`] from this configuration.
    ///
    /// # Errors
    ///
    /// Fails when the table cannot be used in the configured mode.
    pub fn build(&self) -> PwlResult<Codec> {
        let codec = Codec::new(self.control_points.clone(), self.mode)?;
        info!(
            points = self.control_points.len(),
            mode = %self.mode,
            "codec built from configuration"
        );
        Ok(codec)
    }
}
