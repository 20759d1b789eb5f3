//! Comparison session
//!
//! Holds the two sequences and their display names for the lifetime of one
//! comparison, and caches the unfiltered matrix so repeated filter attempts
//! with different parameters reuse it.

use std::cell::OnceCell;

use crate::error::DotResult;
use crate::filter::{DiagonalFilter, FilterParams};
use crate::matrix::{build_matrix, SimilarityMatrix};
use crate::types::Sequence;

pub struct Session {
    seq1: Sequence,
    seq2: Sequence,
    name1: String,
    name2: String,
    matrix: OnceCell<SimilarityMatrix>,
}

impl Session {
    /// `seq1` runs along the columns, `seq2` along the rows
    pub fn new(seq1: Sequence, name1: impl Into<String>, seq2: Sequence, name2: impl Into<String>) -> Self {
        Self {
            seq1,
            seq2,
            name1: name1.into(),
            name2: name2.into(),
            matrix: OnceCell::new(),
        }
    }

    pub fn seq1(&self) -> &Sequence {
        &self.seq1
    }

    pub fn seq2(&self) -> &Sequence {
        &self.seq2
    }

    pub fn name1(&self) -> &str {
        &self.name1
    }

    pub fn name2(&self) -> &str {
        &self.name2
    }

    /// Largest window or threshold accepted for this pair
    pub fn max_parameter(&self) -> usize {
        FilterParams::upper_bound(self.seq1.len(), self.seq2.len())
    }

    /// The unfiltered matrix, built on first use
    pub fn matrix(&self) -> DotResult<&SimilarityMatrix> {
        if let Some(matrix) = self.matrix.get() {
            return Ok(matrix);
        }
        let matrix = build_matrix(self.seq1.symbols(), self.seq2.symbols())?;
        Ok(self.matrix.get_or_init(|| matrix))
    }

    /// A freshly filtered copy of the cached matrix
    pub fn filtered(&self, params: FilterParams) -> DotResult<SimilarityMatrix> {
        params.validate(self.seq1.len(), self.seq2.len())?;
        DiagonalFilter::new(params).apply(self.matrix()?)
    }
}
