//! Atoms and atom lists
//!
//! An [`Atom`] is one conjunct of a rule body or head. The closed sum type
//! replaces the open interface hierarchy of classic rule APIs: the
//! serializer and planner match exhaustively, so adding a new non-built-in
//! atom kind is a compile-time-checked decision.

use crate::term::{Iri, Term, Variable};

/// One conjunct of a rule body or head.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atom {
    /// Class membership: `class(arg)`
    Class { arg: Term, class: Iri },
    /// Binary relation between two resources: `property(arg1, arg2)`
    IndividualProperty {
        arg1: Term,
        property: Iri,
        arg2: Term,
    },
    /// Binary relation from a resource to a literal: `property(arg1, arg2)`
    DatavaluedProperty {
        arg1: Term,
        property: Iri,
        arg2: Term,
    },
    /// Extensible predicate or computation, resolved through the built-in
    /// registry by predicate IRI.
    Builtin { predicate: Iri, args: Vec<Term> },
}

impl Atom {
    /// Create a class atom
    pub fn class(arg: Term, class: impl Into<Iri>) -> Self {
        Atom::Class {
            arg,
            class: class.into(),
        }
    }

    /// Create an individual-property atom
    pub fn individual_property(arg1: Term, property: impl Into<Iri>, arg2: Term) -> Self {
        Atom::IndividualProperty {
            arg1,
            property: property.into(),
            arg2,
        }
    }

    /// Create a datavalued-property atom
    pub fn datavalued_property(arg1: Term, property: impl Into<Iri>, arg2: Term) -> Self {
        Atom::DatavaluedProperty {
            arg1,
            property: property.into(),
            arg2,
        }
    }

    /// Create a built-in atom
    pub fn builtin(predicate: impl Into<Iri>, args: Vec<Term>) -> Self {
        Atom::Builtin {
            predicate: predicate.into(),
            args,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Atom::Builtin { .. })
    }

    /// True for class and role atoms, i.e. everything the store can assert.
    pub fn is_class_or_role(&self) -> bool {
        !self.is_builtin()
    }

    /// The argument terms of this atom, in positional order.
    pub fn terms(&self) -> Vec<&Term> {
        match self {
            Atom::Class { arg, .. } => vec![arg],
            Atom::IndividualProperty { arg1, arg2, .. }
            | Atom::DatavaluedProperty { arg1, arg2, .. } => vec![arg1, arg2],
            Atom::Builtin { args, .. } => args.iter().collect(),
        }
    }

    /// The variables this atom mentions, in positional order (no dedup).
    pub fn variables(&self) -> Vec<&Variable> {
        self.terms()
            .into_iter()
            .filter_map(Term::as_variable)
            .collect()
    }
}

/// An ordered conjunction of atoms (a rule body or head).
///
/// Order carries no semantics before planning; the execution planner imposes
/// the order that is actually evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomList(Vec<Atom>);

impl AtomList {
    pub fn new(atoms: Vec<Atom>) -> Self {
        AtomList(atoms)
    }

    pub fn empty() -> Self {
        AtomList(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Atom] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Atom> {
        self.0.get(index)
    }

    /// Every variable used anywhere in the list, in first-occurrence order.
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars: Vec<Variable> = Vec::new();
        for atom in &self.0 {
            for v in atom.variables() {
                if !vars.contains(v) {
                    vars.push(v.clone());
                }
            }
        }
        vars
    }

    /// Variables bound by class/role atoms, i.e. those the store query can
    /// ground directly.
    pub fn groundable_variables(&self) -> Vec<Variable> {
        let mut vars: Vec<Variable> = Vec::new();
        for atom in self.0.iter().filter(|a| a.is_class_or_role()) {
            for v in atom.variables() {
                if !vars.contains(v) {
                    vars.push(v.clone());
                }
            }
        }
        vars
    }

    /// The built-in atoms only, in list order.
    pub fn builtins(&self) -> Vec<&Atom> {
        self.0.iter().filter(|a| a.is_builtin()).collect()
    }

    /// The class and role atoms only, in list order.
    pub fn class_and_role_atoms(&self) -> Vec<&Atom> {
        self.0.iter().filter(|a| a.is_class_or_role()).collect()
    }
}

impl From<Vec<Atom>> for AtomList {
    fn from(atoms: Vec<Atom>) -> Self {
        AtomList(atoms)
    }
}

impl IntoIterator for AtomList {
    type Item = Atom;
    type IntoIter = std::vec::IntoIter<Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AtomList {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent(a: &str, b: &str) -> Atom {
        Atom::individual_property(Term::var(a), "http://example.org/parent", Term::var(b))
    }

    #[test]
    fn test_atom_variables_positional() {
        let atom = parent("x", "y");
        let vars = atom.variables();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars[0].name(), "x");
        assert_eq!(vars[1].name(), "y");
    }

    #[test]
    fn test_atom_list_variables_dedup() {
        let list = AtomList::new(vec![parent("x", "y"), parent("y", "z")]);
        let vars = list.variables();
        assert_eq!(
            vars.iter().map(Variable::name).collect::<Vec<_>>(),
            vec!["x", "y", "z"]
        );
    }

    #[test]
    fn test_groundable_excludes_builtin_only_vars() {
        let list = AtomList::new(vec![
            parent("x", "y"),
            Atom::builtin(
                entail_vocab::swrlb::ADD,
                vec![Term::var("sum"), Term::var("y")],
            ),
        ]);
        let groundable = list.groundable_variables();
        assert!(groundable.contains(&Variable::new("x")));
        assert!(groundable.contains(&Variable::new("y")));
        assert!(!groundable.contains(&Variable::new("sum")));
    }

    #[test]
    fn test_views_partition() {
        let list = AtomList::new(vec![
            parent("x", "y"),
            Atom::builtin(entail_vocab::swrlb::ADD, vec![]),
        ]);
        assert_eq!(list.builtins().len(), 1);
        assert_eq!(list.class_and_role_atoms().len(), 1);
    }
}
