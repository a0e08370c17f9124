//! Reusable codec pairing a control-point table with its arithmetic.

use std::num::NonZeroUsize;

use tracing::{debug, trace};

use crate::control_points::ControlPoints;
use crate::error::{PwlError, PwlResult};
use crate::gain::GainTable;
use crate::mode::InterpolationMode;
use crate::stats::ErrorStats;
use crate::transform::{self, Arithmetic};

/// Smallest chunk a parallel batch hands to one worker thread.
///
/// Bounds the number of spawned threads to `samples / MIN_PARALLEL_CHUNK`
/// (rounded up) whatever worker count the caller asks for.
pub const MIN_PARALLEL_CHUNK: usize = 4096;

/// A control-point table bound to an interpolation mode.
///
/// Fixed-point gains are computed once in [`Codec::new`] and reused for
/// every batch, which is the intended setup when the table only changes
/// with sensor configuration. A `Codec` is immutable, `Send` and `Sync`:
/// one instance can serve any number of threads.
///
/// # Example
///
/// ```
/// use pwl_codec::{Codec, ControlPoints, InterpolationMode};
///
/// let points = ControlPoints::new(vec![0, 255], vec![0, 15])?;
/// let codec = Codec::new(points, InterpolationMode::FixedPoint)?;
///
/// let narrow = codec.reduce(&[0, 128, 255]);
/// assert_eq!(narrow, vec![0, 8, 15]);
///
/// let wide = codec.expand(&narrow);
/// assert_eq!(wide, vec![0, 136, 255]);
/// # Ok::<(), pwl_codec::PwlError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Codec {
    points: ControlPoints,
    gains: Option<GainTable>,
}

impl Codec {
    /// Bind `points` to `mode`, precomputing gains for fixed-point mode.
    ///
    /// # Errors
    ///
    /// In fixed-point mode, fails when the table exceeds the gain table's
    /// capacity or a segment is too wide (see [`GainTable::new`]).
    pub fn new(points: ControlPoints, mode: InterpolationMode) -> PwlResult<Self> {
        let gains = match mode {
            InterpolationMode::Exact => None,
            InterpolationMode::FixedPoint => Some(GainTable::new(&points)?),
        };

        debug!(
            points = points.len(),
            mode = %mode,
            gains = ?gains.as_ref().map(GainTable::as_slice),
            "PWL codec configured"
        );

        Ok(Self { points, gains })
    }

    /// The control-point table.
    pub fn points(&self) -> &ControlPoints {
        &self.points
    }

    /// Encode arithmetic in use.
    pub fn mode(&self) -> InterpolationMode {
        match self.gains {
            Some(_) => InterpolationMode::FixedPoint,
            None => InterpolationMode::Exact,
        }
    }

    /// Precomputed gains, present in fixed-point mode only.
    pub fn gains(&self) -> Option<&GainTable> {
        self.gains.as_ref()
    }

    #[inline]
    fn arithmetic(&self) -> Arithmetic<'_> {
        match &self.gains {
            Some(gains) => Arithmetic::FixedPoint(gains),
            None => Arithmetic::Exact,
        }
    }

    /// Encode one sample.
    #[inline]
    pub fn reduce_sample(&self, v: u32) -> u16 {
        transform::reduce_sample(&self.points, self.arithmetic(), v)
    }

    /// Decode one sample.
    #[inline]
    pub fn expand_sample(&self, o: u16) -> u32 {
        transform::expand_sample(&self.points, o)
    }

    /// Encode `input` into a caller-provided buffer of the same length.
    ///
    /// # Errors
    ///
    /// Returns [`PwlError::BufferLengthMismatch`] if the lengths differ.
    pub fn reduce_into(&self, input: &[u32], output: &mut [u16]) -> PwlResult<()> {
        check_lengths(input.len(), output.len())?;
        trace!(samples = input.len(), "reduce batch");
        transform::reduce_slice(&self.points, self.arithmetic(), input, output);
        Ok(())
    }

    /// Decode `input` into a caller-provided buffer of the same length.
    ///
    /// # Errors
    ///
    /// Returns [`PwlError::BufferLengthMismatch`] if the lengths differ.
    pub fn expand_into(&self, input: &[u16], output: &mut [u32]) -> PwlResult<()> {
        check_lengths(input.len(), output.len())?;
        trace!(samples = input.len(), "expand batch");
        transform::expand_slice(&self.points, input, output);
        Ok(())
    }

    /// Encode `input` into a new buffer.
    pub fn reduce(&self, input: &[u32]) -> Vec<u16> {
        let mut output = vec![0u16; input.len()];
        transform::reduce_slice(&self.points, self.arithmetic(), input, &mut output);
        output
    }

    /// Decode `input` into a new buffer.
    pub fn expand(&self, input: &[u16]) -> Vec<u32> {
        let mut output = vec![0u32; input.len()];
        transform::expand_slice(&self.points, input, &mut output);
        output
    }

    /// Encode on up to `workers` scoped threads, each owning a disjoint
    /// chunk of at least [`MIN_PARALLEL_CHUNK`] samples.
    ///
    /// Produces exactly the same output as [`Codec::reduce_into`].
    ///
    /// # Errors
    ///
    /// Returns [`PwlError::BufferLengthMismatch`] if the lengths differ.
    ///
    /// # Panics
    ///
    /// Re-raises a panic from any worker thread.
    pub fn reduce_parallel(
        &self,
        input: &[u32],
        output: &mut [u16],
        workers: NonZeroUsize,
    ) -> PwlResult<()> {
        check_lengths(input.len(), output.len())?;
        let chunk = chunk_len(input.len(), workers);
        let arithmetic = self.arithmetic();
        let points = &self.points;
        debug!(samples = input.len(), workers = workers.get(), chunk, "parallel reduce");

        let joined = crossbeam::thread::scope(|scope| {
            for (src, dst) in input.chunks(chunk).zip(output.chunks_mut(chunk)) {
                scope.spawn(move |_| transform::reduce_slice(points, arithmetic, src, dst));
            }
        });
        if let Err(payload) = joined {
            std::panic::resume_unwind(payload);
        }
        Ok(())
    }

    /// Decode on up to `workers` scoped threads, each owning a disjoint
    /// chunk of at least [`MIN_PARALLEL_CHUNK`] samples.
    ///
    /// # Errors
    ///
    /// Returns [`PwlError::BufferLengthMismatch`] if the lengths differ.
    ///
    /// # Panics
    ///
    /// Re-raises a panic from any worker thread.
    pub fn expand_parallel(
        &self,
        input: &[u16],
        output: &mut [u32],
        workers: NonZeroUsize,
    ) -> PwlResult<()> {
        check_lengths(input.len(), output.len())?;
        let chunk = chunk_len(input.len(), workers);
        let points = &self.points;
        debug!(samples = input.len(), workers = workers.get(), chunk, "parallel expand");

        let joined = crossbeam::thread::scope(|scope| {
            for (src, dst) in input.chunks(chunk).zip(output.chunks_mut(chunk)) {
                scope.spawn(move |_| transform::expand_slice(points, src, dst));
            }
        });
        if let Err(payload) = joined {
            std::panic::resume_unwind(payload);
        }
        Ok(())
    }

    /// Reduce then expand `input`, and measure the reconstruction error.
    ///
    /// # Errors
    ///
    /// Returns [`PwlError::EmptyInput`] for an empty input.
    pub fn round_trip(&self, input: &[u32]) -> PwlResult<ErrorStats> {
        let reconstructed = self.expand(&self.reduce(input));
        ErrorStats::between(input, &reconstructed)
    }
}

fn check_lengths(input: usize, output: usize) -> PwlResult<()> {
    if input == output {
        Ok(())
    } else {
        Err(PwlError::BufferLengthMismatch { input, output })
    }
}

fn chunk_len(samples: usize, workers: NonZeroUsize) -> usize {
    samples.div_ceil(workers.get()).max(MIN_PARALLEL_CHUNK)
}
