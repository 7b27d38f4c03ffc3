//! Built-in SPI and registry
//!
//! Built-ins are the extensible atom kind: a *predicate* built-in gates
//! truth over already-bound values, a *computation* built-in derives exactly
//! one unbound variable's value from the others. Implementations are
//! registered once at engine construction in a [`BuiltinRegistry`], keyed by
//! the built-in's predicate IRI — there is no runtime service discovery.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::bindings::Bindings;
use crate::error::BuiltinError;
use crate::solutions::SolutionSet;
use crate::term::{Iri, Term, Variable};

/// An executable built-in implementation.
pub trait Builtin: Send + Sync {
    /// True when this built-in can derive one unbound variable from the
    /// remaining arguments (via [`Builtin::solve`]).
    fn is_computation(&self) -> bool {
        false
    }

    /// True when the store can evaluate this built-in natively, so the
    /// planner may push it into the store query.
    fn is_store_serializable(&self) -> bool {
        self.filter_operator().is_some()
    }

    /// The SPARQL FILTER comparison operator for store-serializable binary
    /// predicates, e.g. `">"` for greaterThan.
    fn filter_operator(&self) -> Option<&'static str> {
        None
    }

    /// Evaluate the predicate over fully-bound arguments.
    fn evaluate(&self, args: &[Term], bindings: &Bindings) -> Result<bool, BuiltinError>;

    /// Derive values for `target`, the single argument variable left unbound
    /// by `bindings`. Each returned solution binds exactly `target` on top
    /// of the input bindings; zero solutions means the computation has no
    /// result for these inputs.
    fn solve(
        &self,
        args: &[Term],
        bindings: &Bindings,
        target: &Variable,
    ) -> Result<SolutionSet, BuiltinError> {
        let _ = (args, bindings);
        Err(BuiltinError::evaluation(
            "unknown",
            format!("not a computation, cannot solve for {target}"),
        ))
    }
}

/// An explicit, statically-populated map from built-in predicate IRI to
/// implementation.
#[derive(Clone, Default)]
pub struct BuiltinRegistry {
    builtins: HashMap<Iri, Arc<dyn Builtin>>,
}

impl BuiltinRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an implementation under a predicate IRI, replacing any
    /// previous registration for the same IRI.
    pub fn register(&mut self, predicate: impl Into<Iri>, builtin: Arc<dyn Builtin>) {
        self.builtins.insert(predicate.into(), builtin);
    }

    /// Look up the implementation for a predicate IRI.
    pub fn lookup(&self, predicate: &Iri) -> Option<&Arc<dyn Builtin>> {
        self.builtins.get(predicate)
    }

    pub fn contains(&self, predicate: &Iri) -> bool {
        self.builtins.contains_key(predicate)
    }

    pub fn len(&self) -> usize {
        self.builtins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builtins.is_empty()
    }
}

impl std::fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinRegistry")
            .field("builtins", &self.builtins.keys().collect::<Vec<_>>())
            .finish()
    }
}
