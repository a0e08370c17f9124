//! Property-based tests for the PWL transforms.
//!
//! Random tables hold 2 to 4 control points with segments no wider than the
//! fixed-point limit, so every property is checked in both modes.

use std::num::NonZeroUsize;

use proptest::prelude::*;
use pwl_codec::{Codec, ControlPoints, InterpolationMode, MAX_SEGMENT_WIDTH, expand, reduce};
use quickcheck_macros::quickcheck;

/// `(x0, y0, [(width, rise)])` turned into a table.
fn build_table(x0: u32, y0: u16, steps: &[(u32, u16)]) -> Option<ControlPoints> {
    let mut pairs = vec![(x0, y0)];
    let (mut x, mut y) = (x0, y0);
    for &(width, rise) in steps {
        x = x.checked_add(width)?;
        y = y.checked_add(rise)?;
        pairs.push((x, y));
    }
    ControlPoints::from_pairs(&pairs).ok()
}

fn arb_table() -> impl Strategy<Value = ControlPoints> {
    (
        0u32..(1 << 24),
        0u16..1000,
        prop::collection::vec((1u32..=MAX_SEGMENT_WIDTH, 0u16..=20_000), 1..=3),
    )
        .prop_filter_map("table overflows", |(x0, y0, steps)| {
            build_table(x0, y0, &steps)
        })
}

/// Tables whose segments never widen the codomain (`rise <= width`).
fn arb_narrowing_table() -> impl Strategy<Value = ControlPoints> {
    (
        0u32..(1 << 24),
        0u16..1000,
        prop::collection::vec((1u32..=MAX_SEGMENT_WIDTH, 0u32..=1000), 1..=3),
    )
        .prop_filter_map("table overflows", |(x0, y0, steps)| {
            let steps: Vec<(u32, u16)> = steps
                .into_iter()
                .map(|(width, permille)| {
                    let rise = (u64::from(width) * u64::from(permille) / 1000).min(20_000);
                    (width, u16::try_from(rise).unwrap_or(20_000))
                })
                .collect();
            build_table(x0, y0, &steps)
        })
}

fn codec(points: &ControlPoints, mode: InterpolationMode) -> Result<Codec, TestCaseError> {
    Codec::new(points.clone(), mode).map_err(|e| TestCaseError::fail(format!("{e}")))
}

/// Samples spread over the table's domain plus a margin on both sides.
fn probe(points: &ControlPoints, a: u32, b: u32) -> (u32, u32) {
    let (lo, _) = points.first();
    let (hi, _) = points.last();
    let span = u64::from(hi - lo) + 200;
    let base = u64::from(lo.saturating_sub(100));
    let pick = |r: u32| {
        let v = base + u64::from(r) % span;
        u32::try_from(v).unwrap_or(u32::MAX)
    };
    let (v1, v2) = (pick(a), pick(b));
    (v1.min(v2), v1.max(v2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// `v1 <= v2` implies `reduce(v1) <= reduce(v2)` in both modes.
    #[test]
    fn prop_reduce_is_monotone(points in arb_table(), a: u32, b: u32) {
        let (v1, v2) = probe(&points, a, b);
        for mode in InterpolationMode::ALL {
            let codec = codec(&points, mode)?;
            let (o1, o2) = (codec.reduce_sample(v1), codec.reduce_sample(v2));
            prop_assert!(o1 <= o2, "{mode}: reduce({v1})={o1} > reduce({v2})={o2}");
        }
    }

    /// Encoded values never leave `[Y[0], Y[last]]`.
    #[test]
    fn prop_reduce_stays_in_codomain(points in arb_table(), v: u32) {
        let (_, y_lo) = points.first();
        let (_, y_hi) = points.last();
        for mode in InterpolationMode::ALL {
            let o = codec(&points, mode)?.reduce_sample(v);
            prop_assert!((y_lo..=y_hi).contains(&o), "{mode}: reduce({v})={o}");
        }
    }

    /// Control points map exactly onto their Y values.
    #[test]
    fn prop_control_points_are_exact(points in arb_table()) {
        for mode in InterpolationMode::ALL {
            let out = reduce(points.x(), &points, mode)
                .map_err(|e| TestCaseError::fail(format!("{e}")))?;
            prop_assert_eq!(out.as_slice(), points.y());
        }
    }

    /// Fixed-point encode is never more than one step from exact encode.
    #[test]
    fn prop_fixed_point_within_one_of_exact(points in arb_table(), a: u32, b: u32) {
        let exact = codec(&points, InterpolationMode::Exact)?;
        let fixed = codec(&points, InterpolationMode::FixedPoint)?;
        let (v1, v2) = probe(&points, a, b);
        for v in [v1, v2] {
            let (e, f) = (exact.reduce_sample(v), fixed.reduce_sample(v));
            prop_assert!(e.abs_diff(f) <= 1, "v={v}: exact {e}, fixed {f}");
        }
    }

    /// `o1 <= o2` implies `expand(o1) <= expand(o2)`, and the result stays
    /// within `[X[0], X[last]]`.
    #[test]
    fn prop_expand_is_monotone_and_bounded(points in arb_table(), a: u16, b: u16) {
        let (o1, o2) = (a.min(b), a.max(b));
        let out = expand(&[o1, o2], &points);
        let (x_lo, _) = points.first();
        let (x_hi, _) = points.last();
        prop_assert!(out.iter().all(|i| (x_lo..=x_hi).contains(i)), "{out:?}");
        if let [i1, i2] = out.as_slice() {
            prop_assert!(i1 <= i2, "expand({o1})={i1} > expand({o2})={i2}");
        }
    }

    /// On tables that never widen, decoding then encoding recovers every
    /// reachable narrow value.
    #[test]
    fn prop_expand_then_reduce_is_identity(points in arb_narrowing_table(), r: u16) {
        let (_, y_lo) = points.first();
        let (_, y_hi) = points.last();
        let o = y_lo + r % (y_hi - y_lo + 1);
        let back = reduce(&expand(&[o], &points), &points, InterpolationMode::Exact)
            .map_err(|e| TestCaseError::fail(format!("{e}")))?;
        prop_assert_eq!(back, vec![o]);
    }
}

#[quickcheck]
fn prop_parallel_matches_sequential(samples: Vec<u32>, workers: u8) -> bool {
    let Ok(points) = ControlPoints::new(vec![0, 40_000, 100_000], vec![0, 3000, 4095]) else {
        return false;
    };
    let Ok(codec) = Codec::new(points, InterpolationMode::FixedPoint) else {
        return false;
    };
    let workers = NonZeroUsize::new(usize::from(workers % 16) + 1).unwrap_or(NonZeroUsize::MIN);

    let mut narrow = vec![0u16; samples.len()];
    let mut wide = vec![0u32; samples.len()];
    codec.reduce_parallel(&samples, &mut narrow, workers).is_ok()
        && narrow == codec.reduce(&samples)
        && codec.expand_parallel(&narrow, &mut wide, workers).is_ok()
        && wide == codec.expand(&narrow)
}

#[quickcheck]
fn prop_free_functions_match_codec(samples: Vec<u32>) -> bool {
    let Ok(points) = ControlPoints::linear(0, 65_535, 0, 255) else {
        return false;
    };
    InterpolationMode::ALL.into_iter().all(|mode| {
        let Ok(codec) = Codec::new(points.clone(), mode) else {
            return false;
        };
        let narrow = codec.reduce(&samples);
        matches!(reduce(&samples, &points, mode), Ok(ref out) if *out == narrow)
            && expand(&narrow, &points) == codec.expand(&narrow)
    })
}

#[quickcheck]
fn prop_stream_decoding_inverts_encoding(wide: Vec<u32>, narrow: Vec<u16>) -> bool {
    use pwl_codec::stream;

    matches!(stream::decode_wide(&stream::encode_wide(&wide)), Ok(ref w) if *w == wide)
        && matches!(stream::decode_narrow(&stream::encode_narrow(&narrow)), Ok(ref n) if *n == narrow)
}
