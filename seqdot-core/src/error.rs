use thiserror::Error;

/// Errors raised while building or filtering a similarity matrix
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DotError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid symbol '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

pub type DotResult<T> = Result<T, DotError>;
