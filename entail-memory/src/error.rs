//! Error types for entail-memory

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, MemoryError>;

/// Errors from parsing or evaluating a query against the memory store.
#[derive(Error, Debug)]
pub enum MemoryError {
    /// The query text could not be tokenized
    #[error("Lex error: {0}")]
    Lex(String),

    /// The token stream did not match the supported grammar
    #[error("Parse error: {0}")]
    Parse(String),

    /// A syntactically valid query outside the supported subset
    #[error("Unsupported query: {0}")]
    Unsupported(String),
}

impl MemoryError {
    pub fn lex(msg: impl Into<String>) -> Self {
        MemoryError::Lex(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        MemoryError::Parse(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        MemoryError::Unsupported(msg.into())
    }
}
