//! Forward (`reduce`) and inverse (`expand`) piecewise-linear transforms.
//!
//! # Forward
//!
//! ```text
//!   out
//!    ^
//! Y3 +                     +-------->
//!    |                   .
//! Y2 +           +-----+
//!    |         .
//! Y0 +-------+
//!    +-------+---------+---+---------> in
//!           X0        X1  X2  X3
//! ```
//!
//! Samples at or below `X[0]` clamp to `Y[0]`, samples at or above the last
//! control point clamp to the last `Y`. Everything in between is
//! interpolated inside the segment `j` with the largest `X[j] <= v`.
//!
//! # Inverse
//!
//! The inverse swaps the roles of X and Y and always divides exactly. When
//! a codomain value falls on a flat run of Y, it decodes to the right-hand
//! end of that run.
//!
//! All intermediate products are `u64`: a 32-bit offset times a 16-bit rise
//! (or a 32-bit gain) cannot overflow.

use crate::control_points::{ControlPoints, Segment};
use crate::error::PwlResult;
use crate::gain::{GainTable, divide_and_round};
use crate::mode::InterpolationMode;

/// Per-call interpolation arithmetic, borrowing precomputed gains.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Arithmetic<'a> {
    Exact,
    FixedPoint(&'a GainTable),
}

/// Narrow an interpolated output that the segment bounds already cap at
/// `y_hi`.
#[inline]
fn narrow(out: u64, seg: &Segment) -> u16 {
    u16::try_from(out).unwrap_or(seg.y_hi)
}

/// Widen an interpolated input that the segment bounds already cap at
/// `x_hi`.
#[inline]
fn widen(input: u64, seg: &Segment) -> u32 {
    u32::try_from(input).unwrap_or(seg.x_hi)
}

/// Encode one wide sample.
#[inline]
pub(crate) fn reduce_sample(points: &ControlPoints, arithmetic: Arithmetic<'_>, v: u32) -> u16 {
    let (x_first, y_first) = points.first();
    let (x_last, y_last) = points.last();

    if v <= x_first {
        return y_first;
    }
    if v >= x_last {
        return y_last;
    }

    let j = points.domain_segment(v);
    let Some(seg) = points.segment(j) else {
        return y_last;
    };
    let offset = v - seg.x_lo;

    let rise = match arithmetic {
        Arithmetic::Exact => divide_and_round(
            u64::from(offset) * u64::from(seg.height()),
            u64::from(seg.width()),
        ),
        Arithmetic::FixedPoint(gains) => gains.scale(j, offset),
    };
    let out = u64::from(seg.y_lo) + rise;

    debug_assert!(
        seg.x_lo <= v && v < seg.x_hi,
        "sample {v} outside segment {j} [{}, {})",
        seg.x_lo,
        seg.x_hi
    );
    debug_assert!(
        u64::from(seg.y_lo) <= out && out <= u64::from(seg.y_hi),
        "output {out} outside segment {j} [{}, {}]",
        seg.y_lo,
        seg.y_hi
    );

    narrow(out, &seg)
}

/// Decode one narrow sample.
#[inline]
pub(crate) fn expand_sample(points: &ControlPoints, o: u16) -> u32 {
    let (x_first, y_first) = points.first();
    let (x_last, y_last) = points.last();

    // `o == Y[0]` goes through the search so a flat leading run decodes to
    // its right-hand end.
    if o < y_first {
        return x_first;
    }
    if o >= y_last {
        return x_last;
    }

    let j = points.codomain_segment(o);
    let Some(seg) = points.segment(j) else {
        return x_last;
    };

    let input = if seg.is_flat() {
        u64::from(seg.x_hi)
    } else {
        u64::from(seg.x_lo)
            + divide_and_round(
                u64::from(o - seg.y_lo) * u64::from(seg.width()),
                u64::from(seg.height()),
            )
    };

    debug_assert!(
        seg.y_lo <= o && o <= seg.y_hi,
        "value {o} outside segment {j} [{}, {}]",
        seg.y_lo,
        seg.y_hi
    );
    debug_assert!(
        u64::from(seg.x_lo) <= input && input <= u64::from(seg.x_hi),
        "input {input} outside segment {j} [{}, {}]",
        seg.x_lo,
        seg.x_hi
    );

    widen(input, &seg)
}

/// Encode `input` into `output` element by element.
pub(crate) fn reduce_slice(
    points: &ControlPoints,
    arithmetic: Arithmetic<'_>,
    input: &[u32],
    output: &mut [u16],
) {
    for (dst, &v) in output.iter_mut().zip(input) {
        *dst = reduce_sample(points, arithmetic, v);
    }
}

/// Decode `input` into `output` element by element.
pub(crate) fn expand_slice(points: &ControlPoints, input: &[u16], output: &mut [u32]) {
    for (dst, &o) in output.iter_mut().zip(input) {
        *dst = expand_sample(points, o);
    }
}

/// Reduce wide samples to the narrow codomain of `points`.
///
/// Gains for [`InterpolationMode::FixedPoint`] are computed for this call
/// and dropped afterwards; build a [`Codec`](crate::Codec) to reuse them
/// across batches.
///
/// # Errors
///
/// In fixed-point mode, returns an error if the table is too large or has a
/// segment too wide for the gain precision (see
/// [`GainTable::new`](crate::GainTable::new)).
///
/// # Example
///
/// ```
/// use pwl_codec::{ControlPoints, InterpolationMode, reduce};
///
/// let points = ControlPoints::new(vec![0, 10, 20], vec![5, 5, 10])?;
/// let out = reduce(&[0, 4, 10, 15, 25], &points, InterpolationMode::Exact)?;
/// assert_eq!(out, vec![5, 5, 5, 8, 10]);
/// # Ok::<(), pwl_codec::PwlError>(())
/// ```
pub fn reduce(
    input: &[u32],
    points: &ControlPoints,
    mode: InterpolationMode,
) -> PwlResult<Vec<u16>> {
    let mut output = vec![0u16; input.len()];
    match mode {
        InterpolationMode::Exact => reduce_slice(points, Arithmetic::Exact, input, &mut output),
        InterpolationMode::FixedPoint => {
            let gains = GainTable::new(points)?;
            reduce_slice(points, Arithmetic::FixedPoint(&gains), input, &mut output);
        }
    }
    Ok(output)
}

/// Expand narrow samples back to an approximation of the wide domain.
///
/// # Example
///
/// ```
/// use pwl_codec::{ControlPoints, expand};
///
/// let points = ControlPoints::new(vec![0, 255], vec![0, 15])?;
/// assert_eq!(expand(&[0, 8, 15], &points), vec![0, 136, 255]);
/// # Ok::<(), pwl_codec::PwlError>(())
/// ```
pub fn expand(input: &[u16], points: &ControlPoints) -> Vec<u32> {
    let mut output = vec![0u32; input.len()];
    expand_slice(points, input, &mut output);
    output
}
