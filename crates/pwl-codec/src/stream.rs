//! Headerless little-endian sample streams.
//!
//! Wide samples are stored as consecutive 4-byte little-endian words,
//! narrow samples as 2-byte little-endian words. There is no header; the
//! sample count is the byte length divided by the sample size.

use crate::error::{PwlError, PwlResult};

/// Bytes per wide sample.
pub const WIDE_SAMPLE_BYTES: usize = 4;

/// Bytes per narrow sample.
pub const NARROW_SAMPLE_BYTES: usize = 2;

fn check_alignment(len: usize, sample_bytes: usize) -> PwlResult<()> {
    if len % sample_bytes == 0 {
        Ok(())
    } else {
        Err(PwlError::MisalignedStream { len, sample_bytes })
    }
}

/// Decode a wide-sample stream.
///
/// # Errors
///
/// Returns [`PwlError::MisalignedStream`] if `bytes` is not a whole number
/// of 4-byte samples.
pub fn decode_wide(bytes: &[u8]) -> PwlResult<Vec<u32>> {
    check_alignment(bytes.len(), WIDE_SAMPLE_BYTES)?;
    let (words, _) = bytes.as_chunks::<WIDE_SAMPLE_BYTES>();
    Ok(words.iter().copied().map(u32::from_le_bytes).collect())
}

/// Decode a narrow-sample stream.
///
/// # Errors
///
/// Returns [`PwlError::MisalignedStream`] if `bytes` has odd length.
pub fn decode_narrow(bytes: &[u8]) -> PwlResult<Vec<u16>> {
    check_alignment(bytes.len(), NARROW_SAMPLE_BYTES)?;
    let (words, _) = bytes.as_chunks::<NARROW_SAMPLE_BYTES>();
    Ok(words.iter().copied().map(u16::from_le_bytes).collect())
}

/// Encode wide samples as a stream.
pub fn encode_wide(samples: &[u32]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Encode narrow samples as a stream.
pub fn encode_narrow(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}
