//! Variable bindings: one partial solution

use std::collections::BTreeMap;

use crate::term::{Term, TermValue, Variable};

/// A partial function from variables to ground values.
///
/// Bindings are extended by copy, never mutated in place, and a variable is
/// never rebound within one instance. The ordered map representation makes
/// equality and hashing structural, which is what [`crate::SolutionSet`]
/// dedup relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bindings(BTreeMap<Variable, TermValue>);

impl Bindings {
    pub fn new() -> Self {
        Bindings(BTreeMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, var: &Variable) -> Option<&TermValue> {
        self.0.get(var)
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.0.contains_key(var)
    }

    /// Copy-and-extend with one more binding.
    ///
    /// Invariant: `var` must not already be bound; extending never rebinds.
    pub fn bind(&self, var: Variable, value: TermValue) -> Bindings {
        debug_assert!(
            !self.0.contains_key(&var),
            "variable {var} is already bound"
        );
        let mut map = self.0.clone();
        map.insert(var, value);
        Bindings(map)
    }

    /// Resolve a term under these bindings: ground terms pass through,
    /// variables look themselves up.
    pub fn resolve(&self, term: &Term) -> Option<TermValue> {
        match term {
            Term::Value(v) => Some(v.clone()),
            Term::Variable(var) => self.0.get(var).cloned(),
        }
    }

    /// True when every pair of `other` is present here with the same value.
    pub fn extends(&self, other: &Bindings) -> bool {
        other
            .0
            .iter()
            .all(|(var, value)| self.0.get(var) == Some(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &TermValue)> {
        self.0.iter()
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.0.keys()
    }
}

impl FromIterator<(Variable, TermValue)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (Variable, TermValue)>>(iter: I) -> Self {
        Bindings(iter.into_iter().collect())
    }
}
