//! FASTA/FASTQ sequence reader
//!
//! Parsing is delegated to needletail. Records are upper-cased (soft-masked
//! bases are common in reference FASTA) and then checked against the
//! nucleotide alphabet, so every returned [`Sequence`] is ready for matrix
//! construction.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use needletail::{parse_fastx_file, parse_fastx_reader, FastxReader};
use thiserror::Error;

use crate::error::DotError;
use crate::types::Sequence;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty file or no sequences found")]
    EmptyFile,
    #[error("Invalid record '{id}': {source}")]
    Sequence {
        id: String,
        #[source]
        source: DotError,
    },
}

/// FASTA/FASTQ parser producing validated nucleotide sequences
pub struct FastaParser;

impl FastaParser {
    /// Parse every record of a FASTA/FASTQ file. Paths ending in `.gz` are
    /// decompressed on the fly.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>> {
        let path = path.as_ref();
        log::debug!("Reading sequences from {}", path.display());

        let sequences = if path.to_string_lossy().ends_with(".gz") {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Self::parse_reader(BufReader::new(GzDecoder::new(file)))
        } else {
            Self::parse_uncompressed_file(path)
        };

        sequences.with_context(|| format!("Failed to read sequences from {}", path.display()))
    }

    /// Read the sequence a file contributes to a comparison: its last record.
    pub fn read_sequence<P: AsRef<Path>>(path: P) -> Result<Sequence> {
        let path = path.as_ref();
        let mut sequences = Self::parse_file(path)?;
        if sequences.len() > 1 {
            log::warn!(
                "{} holds {} records, using the last one",
                path.display(),
                sequences.len()
            );
        }
        // parse_file never returns an empty list
        sequences.pop().ok_or_else(|| FastaError::EmptyFile.into())
    }

    fn parse_uncompressed_file(path: &Path) -> Result<Vec<Sequence>, FastaError> {
        let reader = parse_fastx_file(path).map_err(|e| FastaError::Parse(e.to_string()))?;
        Self::collect_records(reader)
    }

    /// Parse FASTA/FASTQ data from any readable source
    pub fn parse_reader<R: std::io::Read + Send>(reader: R) -> Result<Vec<Sequence>, FastaError> {
        let reader = parse_fastx_reader(reader).map_err(|e| FastaError::Parse(e.to_string()))?;
        Self::collect_records(reader)
    }

    fn collect_records<'a>(
        mut reader: Box<dyn FastxReader + 'a>,
    ) -> Result<Vec<Sequence>, FastaError> {
        let mut sequences = Vec::new();
        while let Some(record) = reader.next() {
            let record = record.map_err(|e| FastaError::Parse(e.to_string()))?;
            sequences.push(Self::record_to_sequence(&record)?);
        }

        if sequences.is_empty() {
            Err(FastaError::EmptyFile)
        } else {
            Ok(sequences)
        }
    }

    fn record_to_sequence(
        record: &needletail::parser::SequenceRecord,
    ) -> Result<Sequence, FastaError> {
        let header = String::from_utf8_lossy(record.id()).into_owned();
        let (id, description) = split_header(&header);

        let symbols = record.seq().to_ascii_uppercase();
        let sequence = Sequence::new(id, symbols).map_err(|source| FastaError::Sequence {
            id: id.to_string(),
            source,
        })?;

        Ok(match description {
            Some(desc) => sequence.with_description(desc),
            None => sequence,
        })
    }
}

/// Split a header line into the identifier and the optional description
fn split_header(header: &str) -> (&str, Option<&str>) {
    let header = header.trim();
    match header.split_once(char::is_whitespace) {
        Some((id, rest)) => {
            let rest = rest.trim();
            (id, (!rest.is_empty()).then_some(rest))
        }
        None => (header, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_fasta_reader() {
        let fasta_data = ">seq1 description of sequence 1\n\
                          ATCGATCGATCG\n\
                          >seq2\n\
                          GCTAGCTAGCTA\n";

        let sequences = FastaParser::parse_reader(Cursor::new(fasta_data)).unwrap();

        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].id, "seq1");
        assert_eq!(sequences[0].description.as_deref(), Some("description of sequence 1"));
        assert_eq!(sequences[0].symbols(), b"ATCGATCGATCG");

        assert_eq!(sequences[1].id, "seq2");
        assert_eq!(sequences[1].description, None);
        assert_eq!(sequences[1].symbols(), b"GCTAGCTAGCTA");
    }

    #[test]
    fn test_parse_fastq_reader() {
        let fastq_data = "@seq1 description\n\
                          ATCGATCG\n\
                          +\n\
                          IIIIIIII\n";

        let sequences = FastaParser::parse_reader(Cursor::new(fastq_data)).unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].id, "seq1");
        assert_eq!(sequences[0].symbols(), b"ATCGATCG");
    }

    #[test]
    fn test_multiline_fasta() {
        let fasta_data = ">seq1\n\
                          ATCGATCG\n\
                          ATCGATCG\n\
                          GCTAGCTA\n";

        let sequences = FastaParser::parse_reader(Cursor::new(fasta_data)).unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].symbols(), b"ATCGATCGATCGATCGGCTAGCTA");
        assert_eq!(sequences[0].len(), 24);
    }

    #[test]
    fn test_soft_masked_bases_are_uppercased() {
        let sequences = FastaParser::parse_reader(Cursor::new(">masked\nACgtaC\n")).unwrap();
        assert_eq!(sequences[0].symbols(), b"ACGTAC");
    }

    #[test]
    fn test_ambiguous_base_is_rejected() {
        let err = FastaParser::parse_reader(Cursor::new(">amb\nACGNT\n")).unwrap_err();
        match err {
            FastaError::Sequence { id, source } => {
                assert_eq!(id, "amb");
                assert_eq!(source, DotError::InvalidSymbol { symbol: 'N', position: 3 });
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(FastaParser::parse_reader(Cursor::new("")).is_err());
    }

    #[test]
    fn test_split_header() {
        assert_eq!(split_header("chr1"), ("chr1", None));
        assert_eq!(split_header("chr1  Homo sapiens "), ("chr1", Some("Homo sapiens")));
    }
}
