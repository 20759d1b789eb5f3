//! Sequence sources
//!
//! Sequences enter a comparison either from a FASTA/FASTQ file or from
//! text typed by a user. Both paths end in a validated [`Sequence`].

pub mod fasta;

pub use fasta::{FastaError, FastaParser};

use crate::error::DotResult;
use crate::types::Sequence;

/// Build a sequence from interactively entered text.
///
/// Surrounding whitespace is dropped; every other character must already be
/// one of `A`, `T`, `C`, `G` (no case folding).
pub fn sequence_from_text(name: &str, text: &str) -> DotResult<Sequence> {
    Sequence::new(name, text.trim().as_bytes().to_vec())
}
