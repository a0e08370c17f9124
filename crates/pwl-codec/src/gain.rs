//! Per-segment fixed-point gains for the division-free encode path.
//!
//! A gain is the segment slope `dY / dX` scaled by `2^GAIN_FBITS` and
//! rounded half-up. Precomputing one gain per segment moves the division
//! out of the per-sample loop; each sample then costs one multiply, one
//! add and one shift.

use serde::{Serialize, Serializer};

use crate::control_points::ControlPoints;
use crate::error::{PwlError, PwlResult};

/// Fractional bits carried by each gain.
pub const GAIN_FBITS: u32 = 16;

/// Half of one output step in gain units, added before the final shift.
pub const GAIN_ROUND: u64 = 1 << (GAIN_FBITS - 1);

/// Largest control-point table the fixed-point path accepts.
pub const MAX_CONTROL_POINTS: usize = 4;

/// Widest segment (in domain units) whose interpolated output is guaranteed
/// to stay within the segment's codomain bounds.
pub const MAX_SEGMENT_WIDTH: u32 = 1 << GAIN_FBITS;

/// `round(n / d)` for non-negative `n` and positive `d`, rounding half up.
#[inline]
pub(crate) fn divide_and_round(n: u64, d: u64) -> u64 {
    (n + d / 2) / d
}

/// Fixed-point gain for every segment of a control-point table.
///
/// Stored inline (no heap) with room for `MAX_CONTROL_POINTS - 1` segments.
/// Must be rebuilt whenever the table changes; a [`Codec`](crate::Codec)
/// owns one alongside its table so the pair can never drift apart.
///
/// # Example
///
/// ```
/// use pwl_codec::{ControlPoints, GainTable};
///
/// let points = ControlPoints::new(vec![0, 255], vec![0, 15])?;
/// let gains = GainTable::new(&points)?;
/// // round((15 << 16) / 255)
/// assert_eq!(gains.as_slice(), &[3855]);
/// # Ok::<(), pwl_codec::PwlError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GainTable {
    gains: [u32; MAX_CONTROL_POINTS - 1],
    len: usize,
}

impl GainTable {
    /// Compute gains for `points`.
    ///
    /// # Errors
    ///
    /// Returns [`PwlError::TooManyControlPoints`] if the table exceeds
    /// [`MAX_CONTROL_POINTS`], or [`PwlError::SegmentTooWide`] if a segment
    /// spans more than [`MAX_SEGMENT_WIDTH`] domain values.
    pub fn new(points: &ControlPoints) -> PwlResult<Self> {
        if points.len() > MAX_CONTROL_POINTS {
            return Err(PwlError::TooManyControlPoints {
                count: points.len(),
                max: MAX_CONTROL_POINTS,
            });
        }

        let mut gains = [0u32; MAX_CONTROL_POINTS - 1];
        let mut len = 0;
        for (segment, (slot, seg)) in gains.iter_mut().zip(points.segments()).enumerate() {
            let width = seg.width();
            if width > MAX_SEGMENT_WIDTH {
                return Err(PwlError::SegmentTooWide {
                    segment,
                    width,
                    max: MAX_SEGMENT_WIDTH,
                });
            }
            let scaled = u64::from(seg.height()) << GAIN_FBITS;
            // height < 2^16 and width >= 1 keep the quotient below 2^32.
            *slot = u32::try_from(divide_and_round(scaled, u64::from(width))).unwrap_or(u32::MAX);
            len += 1;
        }

        Ok(Self { gains, len })
    }

    /// Gain of segment `j`; zero for an index past the table.
    #[inline]
    pub fn gain(&self, j: usize) -> u32 {
        self.as_slice().get(j).copied().unwrap_or(0)
    }

    /// Gains in segment order.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        self.gains.get(..self.len).unwrap_or(&[])
    }

    /// Number of segments covered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no segment is covered (never the case for a valid table).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Interpolated offset above `Y[j]` for a sample `offset` domain units
    /// past `X[j]`.
    #[inline]
    pub fn scale(&self, j: usize, offset: u32) -> u64 {
        (u64::from(offset) * u64::from(self.gain(j)) + GAIN_ROUND) >> GAIN_FBITS
    }
}

impl Serialize for GainTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_slice().serialize(serializer)
    }
}
