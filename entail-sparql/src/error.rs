//! Error types for entail-sparql

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, SparqlError>;

/// Serialization failures: an atom or value that cannot be translated into
/// the store's query syntax.
#[derive(Error, Debug)]
pub enum SparqlError {
    /// The atom kind has no query-syntax rendering in this position
    #[error("Cannot serialize atom: {0}")]
    UnsupportedAtom(String),

    /// A built-in atom was asked to render but is not store-serializable
    #[error("Built-in is not store-serializable: {0}")]
    UnserializableBuiltin(String),

    /// A built-in filter rendering with the wrong argument count
    #[error("Built-in {builtin} renders as a binary filter, got {actual} arguments")]
    FilterArity { builtin: String, actual: usize },
}
