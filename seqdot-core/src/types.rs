use serde::Serialize;

use crate::error::{DotError, DotResult};

/// The nucleotide symbols accepted in a sequence
pub const NUCLEOTIDES: [u8; 4] = [b'A', b'T', b'C', b'G'];

#[inline]
pub fn is_nucleotide(symbol: u8) -> bool {
    NUCLEOTIDES.contains(&symbol)
}

/// Check that every byte is one of `A`, `T`, `C`, `G`.
///
/// Lower-case bases are rejected; callers that accept soft-masked input
/// upper-case it first.
pub fn validate_symbols(symbols: &[u8]) -> DotResult<()> {
    match symbols.iter().position(|&b| !is_nucleotide(b)) {
        Some(position) => Err(DotError::InvalidSymbol {
            symbol: char::from(symbols[position]),
            position,
        }),
        None => Ok(()),
    }
}

/// A named nucleotide sequence whose symbols have passed alphabet validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sequence {
    pub id: String,
    pub description: Option<String>,
    symbols: Vec<u8>,
}

impl Sequence {
    pub fn new(id: impl Into<String>, symbols: Vec<u8>) -> DotResult<Self> {
        let id = id.into();
        if symbols.is_empty() {
            return Err(DotError::InvalidInput(format!("sequence '{}' is empty", id)));
        }
        validate_symbols(&symbols)?;

        Ok(Self {
            id,
            description: None,
            symbols,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols as text, for tick labels and log lines
    pub fn as_str(&self) -> &str {
        // Only ASCII nucleotides get past `new`
        std::str::from_utf8(&self.symbols).unwrap_or_default()
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_symbols_accepts_alphabet() {
        assert!(validate_symbols(b"ATCGGCTA").is_ok());
        assert!(validate_symbols(b"").is_ok());
    }

    #[test]
    fn test_validate_symbols_reports_first_offender() {
        let err = validate_symbols(b"ATXGN").unwrap_err();
        assert_eq!(err, DotError::InvalidSymbol { symbol: 'X', position: 2 });
    }

    #[test]
    fn test_lowercase_is_rejected() {
        assert!(matches!(
            validate_symbols(b"acgt"),
            Err(DotError::InvalidSymbol { position: 0, .. })
        ));
    }

    #[test]
    fn test_sequence_creation() {
        let seq = Sequence::new("chr1", b"ACGT".to_vec())
            .unwrap()
            .with_description("test sequence");
        assert_eq!(seq.id, "chr1");
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.as_str(), "ACGT");
        assert_eq!(seq.description.as_deref(), Some("test sequence"));
    }

    #[test]
    fn test_empty_sequence_is_invalid_input() {
        assert!(matches!(
            Sequence::new("empty", Vec::new()),
            Err(DotError::InvalidInput(_))
        ));
    }
}
