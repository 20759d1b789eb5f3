//! Sliding-window diagonal filter
//!
//! Each diagonal of a [`SimilarityMatrix`] is treated as a 1-D run of 0/1
//! values. A window of `window` cells slides along it with step 1, and the
//! cell at the start of every window whose match count falls below
//! `threshold` is cleared. Isolated matches disappear while conserved runs
//! survive.
//!
//! Near the end of a diagonal, where fewer than `window` cells remain, the
//! count runs from the window start up to but not including the last cell
//! of the diagonal. The final cell of a diagonal therefore only survives
//! when `window == 1`.

use serde::{Deserialize, Serialize};

use crate::error::{DotError, DotResult};
use crate::matrix::SimilarityMatrix;

/// Window length and minimum match count for [`DiagonalFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterParams {
    pub window: usize,
    pub threshold: usize,
}

impl FilterParams {
    pub fn new(window: usize, threshold: usize) -> Self {
        Self { window, threshold }
    }

    /// Largest accepted window/threshold for sequences of these lengths
    pub fn upper_bound(len1: usize, len2: usize) -> usize {
        len1.min(len2)
    }

    /// Check both values lie in `[1, min(len1, len2)]`
    pub fn validate(&self, len1: usize, len2: usize) -> DotResult<()> {
        let max = Self::upper_bound(len1, len2);
        check_range("window", self.window, max)?;
        check_range("threshold", self.threshold, max)
    }
}

fn check_range(name: &str, value: usize, max: usize) -> DotResult<()> {
    if value < 1 || value > max {
        return Err(DotError::InvalidParameters(format!(
            "{} must be between 1 and {}, got {}",
            name, max, value
        )));
    }
    Ok(())
}

/// Suppresses matches that are not part of a sufficiently dense diagonal run
pub struct DiagonalFilter {
    params: FilterParams,
}

impl DiagonalFilter {
    pub fn new(params: FilterParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> FilterParams {
        self.params
    }

    /// Filter a copy of `matrix`. The input is left untouched.
    pub fn apply(&self, matrix: &SimilarityMatrix) -> DotResult<SimilarityMatrix> {
        let FilterParams { window, threshold } = self.params;
        self.params.validate(matrix.rows(), matrix.cols())?;

        let mut filtered = matrix.clone();
        let mut suppressed = 0usize;
        let mut prefix: Vec<usize> = Vec::new();

        for offset in matrix.diagonal_offsets() {
            let len = matrix.diagonal_len(offset);

            // prefix[k] = number of matches among the first k cells
            prefix.clear();
            prefix.push(0);
            for pos in 0..len {
                let (row, col) = SimilarityMatrix::diagonal_cell(offset, pos);
                let running = prefix[pos] + usize::from(matrix.get(row, col));
                prefix.push(running);
            }

            for pos in 0..len {
                let end = if len - pos >= window { pos + window } else { len - 1 };
                // Integer sums: rounding to nearest is the identity here
                let score = prefix[end] - prefix[pos];
                if score < threshold {
                    let (row, col) = SimilarityMatrix::diagonal_cell(offset, pos);
                    if filtered.get(row, col) == 1 {
                        suppressed += 1;
                    }
                    filtered.clear(row, col);
                }
            }
        }

        log::debug!(
            "Diagonal filter (window {}, threshold {}) suppressed {} of {} matches",
            window,
            threshold,
            suppressed,
            matrix.count_matches()
        );
        Ok(filtered)
    }
}

/// Filter `matrix` with a sliding window of `window` cells along every
/// diagonal, keeping window starts with at least `threshold` matches.
pub fn filter_matrix(
    matrix: &SimilarityMatrix,
    window: usize,
    threshold: usize,
) -> DotResult<SimilarityMatrix> {
    DiagonalFilter::new(FilterParams::new(window, threshold)).apply(matrix)
}
