//! Idempotent head commit
//!
//! One solution becomes ground facts: every head atom and every applicable
//! assertion is instantiated with the binding, grouped into a single
//! pattern, checked for existence with one ASK, and inserted with one
//! INSERT DATA only when absent. The ASK is what keeps repeated fixpoint
//! rounds from re-inserting existing facts; without it the engine would
//! never converge.

use entail_core::{Atom, AtomList, Bindings, Term, TripleStore};
use entail_sparql::{ask, ground_triple, insert_data};

use crate::error::{ReasonerError, Result};

/// Commit one binding's head (plus assertions) to the store.
///
/// Returns true iff the store changed. Head atoms must all be class/role
/// atoms: built-ins only constrain, they do not assert.
pub fn commit_head<S: TripleStore>(
    store: &S,
    head: &AtomList,
    binding: &Bindings,
    assertions: &[Atom],
) -> Result<bool> {
    let mut lines = Vec::with_capacity(head.len() + assertions.len());
    for atom in head.iter().chain(assertions.iter()) {
        if atom.is_builtin() {
            return Err(ReasonerError::Serialization(format!(
                "head atom is not store-serializable: {atom:?}"
            )));
        }
        let ground = ground_atom(atom, binding)?;
        lines.push(ground_triple(&ground)?);
    }
    let pattern = lines.join("\n");

    if store.ask(&ask(&pattern))? {
        return Ok(false);
    }
    store.update(&insert_data(&pattern))?;
    Ok(true)
}

/// Substitute every variable in `atom` with its bound value.
fn ground_atom(atom: &Atom, binding: &Bindings) -> Result<Atom> {
    match atom {
        Atom::Class { arg, class } => Ok(Atom::Class {
            arg: ground_term(arg, binding)?,
            class: class.clone(),
        }),
        Atom::IndividualProperty {
            arg1,
            property,
            arg2,
        } => Ok(Atom::IndividualProperty {
            arg1: ground_term(arg1, binding)?,
            property: property.clone(),
            arg2: ground_term(arg2, binding)?,
        }),
        Atom::DatavaluedProperty {
            arg1,
            property,
            arg2,
        } => Ok(Atom::DatavaluedProperty {
            arg1: ground_term(arg1, binding)?,
            property: property.clone(),
            arg2: ground_term(arg2, binding)?,
        }),
        Atom::Builtin { predicate, .. } => Err(ReasonerError::Serialization(format!(
            "built-in {predicate} cannot be instantiated as a fact"
        ))),
    }
}

fn ground_term(term: &Term, binding: &Bindings) -> Result<Term> {
    match term {
        Term::Value(_) => Ok(term.clone()),
        Term::Variable(var) => binding
            .get(var)
            .map(|value| Term::Value(value.clone()))
            .ok_or_else(|| {
                ReasonerError::UnboundVariable(format!(
                    "{var} has no binding at commit time"
                ))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entail_core::{Literal, TermValue, Variable};
    use entail_memory::MemoryStore;
    use entail_vocab::swrlb;

    fn res(name: &str) -> TermValue {
        TermValue::resource(format!("http://example.org/{name}"))
    }

    fn grandparent_head() -> AtomList {
        AtomList::new(vec![Atom::individual_property(
            Term::var("x"),
            "http://example.org/grandparent",
            Term::var("z"),
        )])
    }

    fn binding() -> Bindings {
        Bindings::new()
            .bind(Variable::new("x"), res("a"))
            .bind(Variable::new("z"), res("c"))
    }

    #[test]
    fn test_commit_is_idempotent() {
        let store = MemoryStore::new();

        let first = commit_head(&store, &grandparent_head(), &binding(), &[]).unwrap();
        assert!(first);
        let count = store.len();

        let second = commit_head(&store, &grandparent_head(), &binding(), &[]).unwrap();
        assert!(!second);
        assert_eq!(store.len(), count);

        assert!(store.contains(&res("a"), &res("grandparent"), &res("c")));
    }

    #[test]
    fn test_assertions_commit_with_the_head() {
        let store = MemoryStore::new();
        let assertion = Atom::class(Term::var("x"), "http://example.org/Ancestor");
        let changed =
            commit_head(&store, &grandparent_head(), &binding(), &[assertion]).unwrap();
        assert!(changed);
        assert!(store.contains(
            &res("a"),
            &TermValue::resource(entail_vocab::rdf::TYPE),
            &res("Ancestor")
        ));
    }

    #[test]
    fn test_builtin_head_is_rejected() {
        let store = MemoryStore::new();
        let head = AtomList::new(vec![Atom::builtin(
            swrlb::GREATER_THAN,
            vec![Term::var("x"), Term::var("z")],
        )]);
        let err = commit_head(&store, &head, &binding(), &[]).unwrap_err();
        assert!(matches!(err, ReasonerError::Serialization(_)));
    }

    #[test]
    fn test_missing_binding_is_fatal() {
        let store = MemoryStore::new();
        let partial = Bindings::new().bind(Variable::new("x"), res("a"));
        let err = commit_head(&store, &grandparent_head(), &partial, &[]).unwrap_err();
        assert!(matches!(err, ReasonerError::UnboundVariable(_)));
    }

    #[test]
    fn test_typed_literal_head_round_trips() {
        let store = MemoryStore::new();
        let head = AtomList::new(vec![Atom::datavalued_property(
            Term::var("x"),
            "http://example.org/nextAge",
            Term::var("sum"),
        )]);
        let binding = Bindings::new()
            .bind(Variable::new("x"), res("p"))
            .bind(
                Variable::new("sum"),
                TermValue::Literal(Literal::integer(31)),
            );

        assert!(commit_head(&store, &head, &binding, &[]).unwrap());
        // Re-committing the same literal value finds the existing triple.
        assert!(!commit_head(&store, &head, &binding, &[]).unwrap());
    }
}
