//! Validated control-point table defining the piecewise-linear mapping.

use serde::{Deserialize, Serialize};

use crate::error::{PwlError, PwlResult};

/// One linear piece `[x_lo, x_hi] -> [y_lo, y_hi]` of the mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Left domain endpoint.
    pub x_lo: u32,
    /// Right domain endpoint (strictly greater than `x_lo`).
    pub x_hi: u32,
    /// Left codomain endpoint.
    pub y_lo: u16,
    /// Right codomain endpoint (never below `y_lo`).
    pub y_hi: u16,
}

impl Segment {
    /// Domain width `x_hi - x_lo`, always at least 1.
    #[inline]
    pub fn width(&self) -> u32 {
        self.x_hi.saturating_sub(self.x_lo)
    }

    /// Codomain height `y_hi - y_lo`.
    #[inline]
    pub fn height(&self) -> u16 {
        self.y_hi.saturating_sub(self.y_lo)
    }

    /// A flat segment maps its whole domain onto a single output value.
    #[inline]
    pub fn is_flat(&self) -> bool {
        self.y_lo == self.y_hi
    }
}

/// Ordered `(X, Y)` control points of a piecewise-linear bit-width mapping.
///
/// X values live in the wide sample domain and are strictly increasing.
/// Y values live in the narrow codomain and are non-decreasing; equal
/// neighbours describe a flat (clamped) segment.
///
/// The invariants are checked once on construction, so every transform
/// can rely on them without re-validating per call.
///
/// # Example
///
/// ```
/// use pwl_codec::ControlPoints;
///
/// // 8-bit input reduced to a 4-bit output
/// let points = ControlPoints::new(vec![0, 255], vec![0, 15])?;
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.segment_count(), 1);
/// # Ok::<(), pwl_codec::PwlError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawControlPoints", into = "RawControlPoints")]
pub struct ControlPoints {
    x: Vec<u32>,
    y: Vec<u16>,
}

/// Unvalidated serde form of [`ControlPoints`].
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawControlPoints {
    x: Vec<u32>,
    y: Vec<u16>,
}

impl ControlPoints {
    /// Build a table from parallel X and Y sequences.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequences differ in length, hold fewer than
    /// two points, if X is not strictly increasing or if Y decreases.
    pub fn new(x: Vec<u32>, y: Vec<u16>) -> PwlResult<Self> {
        if x.len() != y.len() {
            return Err(PwlError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(PwlError::TooFewControlPoints { count: x.len() });
        }

        for (index, pair) in x.windows(2).enumerate() {
            if let [previous, value] = *pair
                && value <= previous
            {
                return Err(PwlError::NonIncreasingX {
                    index: index + 1,
                    previous,
                    value,
                });
            }
        }
        for (index, pair) in y.windows(2).enumerate() {
            if let [previous, value] = *pair
                && value < previous
            {
                return Err(PwlError::DecreasingY {
                    index: index + 1,
                    previous,
                    value,
                });
            }
        }

        Ok(Self { x, y })
    }

    /// Build a table from `(x, y)` pairs.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ControlPoints::new`].
    pub fn from_pairs(pairs: &[(u32, u16)]) -> PwlResult<Self> {
        let (x, y) = pairs.iter().copied().unzip();
        Self::new(x, y)
    }

    /// Two-point table mapping `[x_lo, x_hi]` linearly onto `[y_lo, y_hi]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x_lo >= x_hi` or `y_lo > y_hi`.
    pub fn linear(x_lo: u32, x_hi: u32, y_lo: u16, y_hi: u16) -> PwlResult<Self> {
        Self::new(vec![x_lo, x_hi], vec![y_lo, y_hi])
    }

    /// Domain control values.
    pub fn x(&self) -> &[u32] {
        &self.x
    }

    /// Codomain control values.
    pub fn y(&self) -> &[u16] {
        &self.y
    }

    /// Number of control points (`numXY`).
    #[expect(clippy::len_without_is_empty, reason = "a table always holds at least two points")]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Number of linear segments, `len() - 1`.
    pub fn segment_count(&self) -> usize {
        self.x.len().saturating_sub(1)
    }

    /// First control point.
    #[inline]
    pub fn first(&self) -> (u32, u16) {
        (
            self.x.first().copied().unwrap_or_default(),
            self.y.first().copied().unwrap_or_default(),
        )
    }

    /// Last control point.
    #[inline]
    pub fn last(&self) -> (u32, u16) {
        (
            self.x.last().copied().unwrap_or_default(),
            self.y.last().copied().unwrap_or_default(),
        )
    }

    /// Segment `[j, j+1)`, or `None` if `j >= segment_count()`.
    #[inline]
    pub fn segment(&self, j: usize) -> Option<Segment> {
        let x = self.x.get(j..j.checked_add(2)?)?;
        let y = self.y.get(j..j + 2)?;
        match (x, y) {
            (&[x_lo, x_hi], &[y_lo, y_hi]) => Some(Segment {
                x_lo,
                x_hi,
                y_lo,
                y_hi,
            }),
            _ => None,
        }
    }

    /// Iterate over all segments in domain order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.x
            .windows(2)
            .zip(self.y.windows(2))
            .filter_map(|pair| match pair {
                (&[x_lo, x_hi], &[y_lo, y_hi]) => Some(Segment {
                    x_lo,
                    x_hi,
                    y_lo,
                    y_hi,
                }),
                _ => None,
            })
    }

    /// Largest segment index `j` with `X[j] <= v`, searching downwards.
    ///
    /// Meaningful for `X[0] <= v`; smaller inputs map to segment 0.
    #[inline]
    pub fn domain_segment(&self, v: u32) -> usize {
        self.x
            .iter()
            .take(self.segment_count())
            .rposition(|&x| x <= v)
            .unwrap_or(0)
    }

    /// Largest segment index `j` with `Y[j] <= o`, searching downwards.
    ///
    /// Meaningful for `Y[0] <= o`; smaller inputs map to segment 0.
    #[inline]
    pub fn codomain_segment(&self, o: u16) -> usize {
        self.y
            .iter()
            .take(self.segment_count())
            .rposition(|&y| y <= o)
            .unwrap_or(0)
    }
}

impl TryFrom<RawControlPoints> for ControlPoints {
    type Error = PwlError;

    fn try_from(raw: RawControlPoints) -> PwlResult<Self> {
        Self::new(raw.x, raw.y)
    }
}

impl From<ControlPoints> for RawControlPoints {
    fn from(points: ControlPoints) -> Self {
        Self {
            x: points.x,
            y: points.y,
        }
    }
}
