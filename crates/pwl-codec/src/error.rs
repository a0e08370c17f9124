//! Error types for PWL codec operations.

/// A specialized `Result` type for PWL codec operations.
pub type PwlResult<T> = Result<T, PwlError>;

/// Error type for PWL codec operations.
///
/// Every variant describes a caller-side contract violation that is
/// detected when a table, codec or buffer pair is set up. Once a
/// [`Codec`](crate::Codec) exists, per-sample transforms cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PwlError {
    /// The table has fewer than two control points (no segment).
    #[error("Control-point table needs at least 2 points, got {count}")]
    TooFewControlPoints {
        /// Number of points supplied.
        count: usize,
    },

    /// X and Y sequences differ in length.
    #[error("Control-point X has {x_len} values but Y has {y_len}")]
    LengthMismatch {
        /// Length of the X (domain) sequence.
        x_len: usize,
        /// Length of the Y (codomain) sequence.
        y_len: usize,
    },

    /// X is not strictly increasing at `index`.
    #[error("Control-point X must be strictly increasing: X[{index}]={value} follows {previous}")]
    NonIncreasingX {
        /// Index of the offending point.
        index: usize,
        /// X value of the preceding point.
        previous: u32,
        /// X value of the offending point.
        value: u32,
    },

    /// Y decreases at `index`.
    #[error("Control-point Y must be non-decreasing: Y[{index}]={value} follows {previous}")]
    DecreasingY {
        /// Index of the offending point.
        index: usize,
        /// Y value of the preceding point.
        previous: u16,
        /// Y value of the offending point.
        value: u16,
    },

    /// Fixed-point mode supports a bounded number of control points.
    #[error("Fixed-point mode supports at most {max} control points, got {count}")]
    TooManyControlPoints {
        /// Number of points supplied.
        count: usize,
        /// Maximum supported.
        max: usize,
    },

    /// A segment is too wide for the 16-bit fractional gain.
    #[error("Segment {segment} spans {width} input values, fixed-point mode allows at most {max}")]
    SegmentTooWide {
        /// Segment index.
        segment: usize,
        /// Domain width `X[j+1] - X[j]`.
        width: u32,
        /// Largest width the gain precision supports.
        max: u32,
    },

    /// Input and output buffers differ in length.
    #[error("Buffer length mismatch: input has {input} samples, output has {output}")]
    BufferLengthMismatch {
        /// Input sample count.
        input: usize,
        /// Output sample count.
        output: usize,
    },

    /// Statistics were requested over zero samples.
    #[error("Cannot compute error statistics over an empty sample set")]
    EmptyInput,

    /// Raw stream length is not a multiple of the sample size.
    #[error("Raw stream of {len} bytes is not a whole number of {sample_bytes}-byte samples")]
    MisalignedStream {
        /// Stream length in bytes.
        len: usize,
        /// Bytes per sample.
        sample_bytes: usize,
    },

    /// Scenario bit widths are outside the supported range.
    #[error("Invalid bit widths: {bpp_in} bits in, {bpp_out} bits out (need 1 <= out <= in <= {max})")]
    InvalidBitWidth {
        /// Input bits per sample.
        bpp_in: u8,
        /// Output bits per sample.
        bpp_out: u8,
        /// Largest supported width.
        max: u8,
    },

    /// A windowed scenario runs past the end of the 32-bit domain.
    #[error("Window starting at {start} with {len} samples exceeds the 32-bit domain")]
    WindowOutOfRange {
        /// First domain value of the window.
        start: u32,
        /// Number of samples in the window.
        len: u32,
    },
}
