//! Binary similarity matrix for a pair of nucleotide sequences
//!
//! Rows are indexed by the second sequence and columns by the first, so a
//! cell `(i, j)` holds 1 exactly when `seq2[i] == seq1[j]`.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::error::{DotError, DotResult};
use crate::types::validate_symbols;

/// Row-major 0/1 matrix of pairwise symbol identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl SimilarityMatrix {
    /// Build a matrix from explicit rows. Every row must have the same
    /// non-zero length and hold only 0 or 1.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> DotResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(DotError::InvalidInput("matrix has no cells".to_string()));
        }

        let mut cells = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(DotError::InvalidInput(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n_cols
                )));
            }
            if let Some(&bad) = row.iter().find(|&&v| v > 1) {
                return Err(DotError::InvalidInput(format!(
                    "row {} holds {}, cells must be 0 or 1",
                    i, bad
                )));
            }
            cells.extend(row);
        }

        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Value at `(row, col)`. Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.rows && col < self.cols, "cell ({}, {}) out of bounds", row, col);
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub(crate) fn clear(&mut self, row: usize, col: usize) {
        self.cells[row * self.cols + col] = 0;
    }

    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.cols)
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.iter_rows().map(<[u8]>::to_vec).collect()
    }

    /// Number of cells set to 1
    pub fn count_matches(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 1).count()
    }

    /// Diagonal offsets from the bottom-left corner `-(rows-1)` to the
    /// top-right corner `cols-1`. Offset 0 is the main diagonal.
    pub fn diagonal_offsets(&self) -> RangeInclusive<isize> {
        -(self.rows as isize - 1)..=(self.cols as isize - 1)
    }

    /// Number of cells on the diagonal at `offset` (0 when it lies outside
    /// the matrix)
    pub fn diagonal_len(&self, offset: isize) -> usize {
        if offset >= 0 {
            let shift = offset as usize;
            if shift >= self.cols {
                return 0;
            }
            self.rows.min(self.cols - shift)
        } else {
            let shift = offset.unsigned_abs();
            if shift >= self.rows {
                return 0;
            }
            (self.rows - shift).min(self.cols)
        }
    }

    /// Matrix coordinates `(row, col)` of position `pos` along the diagonal
    /// at `offset`.
    #[inline]
    pub fn diagonal_cell(offset: isize, pos: usize) -> (usize, usize) {
        if offset < 0 {
            (offset.unsigned_abs() + pos, pos)
        } else {
            (pos, offset as usize + pos)
        }
    }

    /// Copy of the diagonal at `offset` as a 1-D sequence
    pub fn diagonal(&self, offset: isize) -> Vec<u8> {
        (0..self.diagonal_len(offset))
            .map(|pos| {
                let (row, col) = Self::diagonal_cell(offset, pos);
                self.get(row, col)
            })
            .collect()
    }

    /// Copy with every cell flipped, for renderers that expect
    /// mismatch = 1.
    pub fn inverted(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(|&v| v ^ 1).collect(),
        }
    }
}

/// Builds similarity matrices by exhaustive pairwise comparison
pub struct MatrixBuilder;

impl MatrixBuilder {
    /// Compare every symbol of `seq2` (rows) with every symbol of `seq1`
    /// (columns).
    pub fn build(seq1: &[u8], seq2: &[u8]) -> DotResult<SimilarityMatrix> {
        if seq1.is_empty() || seq2.is_empty() {
            return Err(DotError::InvalidInput(format!(
                "cannot compare sequences of length {} and {}",
                seq1.len(),
                seq2.len()
            )));
        }
        validate_symbols(seq1)?;
        validate_symbols(seq2)?;

        let mut cells = Vec::with_capacity(seq1.len() * seq2.len());
        for &row_symbol in seq2 {
            cells.extend(seq1.iter().map(|&col_symbol| u8::from(row_symbol == col_symbol)));
        }

        let matrix = SimilarityMatrix {
            rows: seq2.len(),
            cols: seq1.len(),
            cells,
        };
        log::debug!(
            "Built {}x{} similarity matrix with {} matches",
            matrix.rows,
            matrix.cols,
            matrix.count_matches()
        );
        Ok(matrix)
    }
}

/// Build the similarity matrix of `seq1` (columns) against `seq2` (rows)
pub fn build_matrix(seq1: &[u8], seq2: &[u8]) -> DotResult<SimilarityMatrix> {
    MatrixBuilder::build(seq1, seq2)
}
