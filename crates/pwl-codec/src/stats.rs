//! Round-trip error statistics between two wide sample arrays.

use serde::Serialize;

use crate::error::{PwlError, PwlResult};

/// Maximum absolute and average signed error between a reference array and
/// its reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ErrorStats {
    /// `max |reference[i] - reconstructed[i]|`.
    pub max_abs_err: u32,
    /// `mean(reference[i] - reconstructed[i])`, signed.
    pub avg_err: f64,
    /// Number of samples compared.
    pub samples: usize,
}

impl ErrorStats {
    /// Compare `reference` against `reconstructed`.
    ///
    /// # Errors
    ///
    /// Returns [`PwlError::BufferLengthMismatch`] if the arrays differ in
    /// length and [`PwlError::EmptyInput`] if they are empty.
    ///
    /// # Example
    ///
    /// ```
    /// use pwl_codec::ErrorStats;
    ///
    /// let stats = ErrorStats::between(&[10, 20, 30], &[11, 20, 28])?;
    /// assert_eq!(stats.max_abs_err, 2);
    /// assert!((stats.avg_err - 1.0 / 3.0).abs() < 1e-12);
    /// # Ok::<(), pwl_codec::PwlError>(())
    /// ```
    pub fn between(reference: &[u32], reconstructed: &[u32]) -> PwlResult<Self> {
        if reference.len() != reconstructed.len() {
            return Err(PwlError::BufferLengthMismatch {
                input: reference.len(),
                output: reconstructed.len(),
            });
        }
        if reference.is_empty() {
            return Err(PwlError::EmptyInput);
        }

        let mut sum_err: i64 = 0;
        let mut max_abs_err: u32 = 0;
        for (&a, &b) in reference.iter().zip(reconstructed) {
            sum_err += i64::from(a) - i64::from(b);
            max_abs_err = max_abs_err.max(a.abs_diff(b));
        }

        #[expect(clippy::cast_precision_loss, reason = "statistics tolerate f64 rounding")]
        let avg_err = sum_err as f64 / reference.len() as f64;

        Ok(Self {
            max_abs_err,
            avg_err,
            samples: reference.len(),
        })
    }

    /// True when every sample was reconstructed exactly.
    pub fn is_lossless(&self) -> bool {
        self.max_abs_err == 0
    }
}
