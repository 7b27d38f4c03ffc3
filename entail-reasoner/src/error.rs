//! Error types for entail-reasoner
//!
//! The taxonomy is closed and none of these are caught or retried inside
//! the subsystem: planning, evaluation and commit raise synchronously, and a
//! failure while processing one rule aborts the whole round. Store-level
//! errors are wrapped into [`ReasonerError::Serialization`] so callers see a
//! uniform error surface instead of the store's native error type.

use entail_core::{BuiltinError, StoreError, Variable};
use entail_sparql::SparqlError;
use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, ReasonerError>;

/// Reasoner error type
#[derive(Error, Debug)]
pub enum ReasonerError {
    /// A variable has no path to being bound — the rule is unsatisfiable
    #[error("Unbound variable: {0}")]
    UnboundVariable(String),

    /// Built-in computations form a dependency cycle — the rule is unusable
    #[error("Cyclic dependency: {0}")]
    CyclicDependency(String),

    /// An atom or value could not be translated to the store's query
    /// syntax, or the store itself failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A structurally defective rule (e.g. no variables to bind)
    #[error("Illegal rule: {0}")]
    IllegalRule(String),

    /// A planning invariant was violated during in-memory evaluation
    #[error("In-memory evaluation error: {0}")]
    InMemoryEvaluation(String),

    /// A built-in implementation could not be resolved or failed to run
    #[error("Built-in error: {0}")]
    Builtin(#[from] BuiltinError),
}

impl ReasonerError {
    /// Create an unbound-variable error for a variable
    pub fn unbound(var: &Variable) -> Self {
        ReasonerError::UnboundVariable(format!(
            "{var} is bound by no class/role atom and computed by no built-in"
        ))
    }
}

impl From<SparqlError> for ReasonerError {
    fn from(err: SparqlError) -> Self {
        ReasonerError::Serialization(err.to_string())
    }
}

impl From<StoreError> for ReasonerError {
    fn from(err: StoreError) -> Self {
        ReasonerError::Serialization(err.to_string())
    }
}
