//! Error types for entail-core

use thiserror::Error;

/// Errors surfaced by a [`crate::TripleStore`] implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store rejected or failed a read query
    #[error("Query error: {0}")]
    Query(String),

    /// The store rejected or failed an update
    #[error("Update error: {0}")]
    Update(String),

    /// The store could not be reached
    #[error("Connection error: {0}")]
    Connection(String),
}

impl StoreError {
    /// Create a query error
    pub fn query(msg: impl Into<String>) -> Self {
        StoreError::Query(msg.into())
    }

    /// Create an update error
    pub fn update(msg: impl Into<String>) -> Self {
        StoreError::Update(msg.into())
    }

    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        StoreError::Connection(msg.into())
    }
}

/// Errors raised by built-in implementations.
#[derive(Error, Debug)]
pub enum BuiltinError {
    /// Wrong number of arguments for the built-in
    #[error("Built-in {builtin} called with {actual} arguments, expected {expected}")]
    Arity {
        builtin: String,
        expected: String,
        actual: usize,
    },

    /// The built-in could not evaluate over the given values
    #[error("Built-in {builtin}: {message}")]
    Evaluation { builtin: String, message: String },
}

impl BuiltinError {
    /// Create an arity error
    pub fn arity(builtin: impl Into<String>, expected: impl Into<String>, actual: usize) -> Self {
        BuiltinError::Arity {
            builtin: builtin.into(),
            expected: expected.into(),
            actual,
        }
    }

    /// Create an evaluation error
    pub fn evaluation(builtin: impl Into<String>, message: impl Into<String>) -> Self {
        BuiltinError::Evaluation {
            builtin: builtin.into(),
            message: message.into(),
        }
    }
}
