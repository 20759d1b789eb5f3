//! seqdot Core Library
//!
//! Pairwise similarity matrices, the sliding-window diagonal filter, and
//! sequence sources for seqdot.

pub mod error;
pub mod types;
pub mod matrix;
pub mod filter;
pub mod io;
pub mod session;

// Re-export commonly used types and functions
pub use error::{DotError, DotResult};
pub use types::{validate_symbols, Sequence, NUCLEOTIDES};
pub use matrix::{build_matrix, MatrixBuilder, SimilarityMatrix};
pub use filter::{filter_matrix, DiagonalFilter, FilterParams};
pub use io::{sequence_from_text, FastaError, FastaParser};
pub use session::Session;

/// Version information for the seqdot core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
