//! Body evaluation by store pushdown
//!
//! `find_candidates` issues exactly one read query per invocation: it
//! projects every variable of the plan, patterns the longest serializable
//! prefix, and subtracts one MINUS group per way each axiomatic assertion
//! could be contradicted. Rows come back positionally and are zipped against
//! the projection order into bindings.

use entail_core::{Atom, AtomList, Bindings, BuiltinRegistry, SolutionSet, TripleStore};
use entail_sparql::{longest_serializable_prefix, select, term_fragment, PatternBuilder};
use entail_vocab::{owl, rdf};

use crate::error::{ReasonerError, Result};

/// Retrieve candidate bindings for a plan from the store.
///
/// `assertions` are axiom heads applicable to the rule's variables; each
/// contributes contradiction sub-patterns that exclude candidate
/// combinations contradicting a known axiom.
pub fn find_candidates<S: TripleStore>(
    store: &S,
    plan: &AtomList,
    assertions: &[Atom],
    registry: &BuiltinRegistry,
) -> Result<SolutionSet> {
    let vars = plan.variables();
    if vars.is_empty() {
        return Err(ReasonerError::IllegalRule(
            "rule mentions no variables: nothing to bind, nothing to infer".into(),
        ));
    }

    let prefix = longest_serializable_prefix(plan.as_slice(), registry);
    let mut builder = PatternBuilder::new(registry);
    for atom in prefix {
        builder.push_atom(atom)?;
    }
    let pattern = builder.into_pattern();

    let mut minus_groups = Vec::new();
    for (index, assertion) in assertions.iter().enumerate() {
        minus_groups.extend(contradiction_patterns(assertion, index)?);
    }

    let query = select(&vars, &pattern, &minus_groups);
    tracing::trace!(variables = vars.len(), prefix = prefix.len(), "candidate query");

    let rows = store.query(&query)?;
    let mut candidates = SolutionSet::new();
    for row in rows {
        let mut binding = Bindings::new();
        for (var, cell) in vars.iter().zip(row) {
            if let Some(value) = cell {
                binding = binding.bind(var.clone(), value);
            }
        }
        candidates.insert(binding);
    }
    Ok(candidates)
}

/// The sub-patterns under which `assertion` would be contradicted.
///
/// Variables in the assertion correlate with the enclosing query's
/// variables of the same name, so each group knocks out exactly the
/// candidate combinations that clash with the axiom.
fn contradiction_patterns(assertion: &Atom, index: usize) -> Result<Vec<String>> {
    match assertion {
        // type(v, C) is contradicted when v is also typed with a class
        // declared disjoint with C, in either declaration direction.
        Atom::Class { arg, class } => {
            let arg = term_fragment(arg);
            let disjoint = format!("?disjoint{index}");
            Ok(vec![
                format!(
                    "{arg} <{}> {disjoint} .\n{disjoint} <{}> <{class}> .",
                    rdf::TYPE,
                    owl::DISJOINT_WITH
                ),
                format!(
                    "{arg} <{}> {disjoint} .\n<{class}> <{}> {disjoint} .",
                    rdf::TYPE,
                    owl::DISJOINT_WITH
                ),
            ])
        }
        // P(a, b) is contradicted when P tolerates only one value and a
        // differing one already exists: functional P, inverse-functional P,
        // or a maxCardinality-1 restriction on P typing the subject.
        Atom::IndividualProperty {
            arg1,
            property,
            arg2,
        } => {
            let subject = term_fragment(arg1);
            let object = term_fragment(arg2);
            let other = format!("?other{index}");
            let prior = format!("?prior{index}");
            let restriction = format!("?restriction{index}");
            Ok(vec![
                format!(
                    "<{property}> <{}> <{}> .\n{subject} <{property}> {other} .\nFILTER({other} != {object})",
                    rdf::TYPE,
                    owl::FUNCTIONAL_PROPERTY
                ),
                format!(
                    "<{property}> <{}> <{}> .\n{prior} <{property}> {object} .\nFILTER({prior} != {subject})",
                    rdf::TYPE,
                    owl::INVERSE_FUNCTIONAL_PROPERTY
                ),
                max_cardinality_pattern(&subject, property.as_str(), &object, &restriction, &other),
            ])
        }
        Atom::DatavaluedProperty {
            arg1,
            property,
            arg2,
        } => {
            let subject = term_fragment(arg1);
            let object = term_fragment(arg2);
            let other = format!("?other{index}");
            let restriction = format!("?restriction{index}");
            Ok(vec![
                format!(
                    "<{property}> <{}> <{}> .\n{subject} <{property}> {other} .\nFILTER({other} != {object})",
                    rdf::TYPE,
                    owl::FUNCTIONAL_PROPERTY
                ),
                max_cardinality_pattern(&subject, property.as_str(), &object, &restriction, &other),
            ])
        }
        Atom::Builtin { predicate, .. } => Err(ReasonerError::Serialization(format!(
            "built-in {predicate} cannot be used as an assertion"
        ))),
    }
}

fn max_cardinality_pattern(
    subject: &str,
    property: &str,
    object: &str,
    restriction: &str,
    other: &str,
) -> String {
    format!(
        "{subject} <{}> {restriction} .\n{restriction} <{}> <{property}> .\n{restriction} <{}> 1 .\n{subject} <{property}> {other} .\nFILTER({other} != {object})",
        rdf::TYPE,
        owl::ON_PROPERTY,
        owl::MAX_CARDINALITY
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::standard_registry;
    use entail_core::{Literal, Term, TermValue, Variable};
    use entail_memory::MemoryStore;
    use entail_vocab::swrlb;

    fn res(name: &str) -> TermValue {
        TermValue::resource(format!("http://example.org/{name}"))
    }

    fn parent(a: &str, b: &str) -> Atom {
        Atom::individual_property(Term::var(a), "http://example.org/parent", Term::var(b))
    }

    #[test]
    fn test_candidates_from_join() {
        let store = MemoryStore::new();
        store.insert(res("a"), res("parent"), res("b"));
        store.insert(res("b"), res("parent"), res("c"));

        let plan = AtomList::new(vec![parent("x", "y"), parent("y", "z")]);
        let candidates =
            find_candidates(&store, &plan, &[], &standard_registry()).unwrap();

        assert_eq!(candidates.len(), 1);
        let binding = candidates.iter().next().unwrap();
        assert_eq!(binding.get(&Variable::new("x")), Some(&res("a")));
        assert_eq!(binding.get(&Variable::new("z")), Some(&res("c")));
    }

    #[test]
    fn test_zero_variable_plan_is_illegal() {
        let store = MemoryStore::new();
        let plan = AtomList::new(vec![Atom::individual_property(
            Term::resource("http://example.org/a"),
            "http://example.org/parent",
            Term::resource("http://example.org/b"),
        )]);
        let err = find_candidates(&store, &plan, &[], &standard_registry()).unwrap_err();
        assert!(matches!(err, ReasonerError::IllegalRule(_)));
    }

    #[test]
    fn test_suffix_variables_stay_unbound() {
        let store = MemoryStore::new();
        store.insert(res("p"), res("age"), TermValue::Literal(Literal::integer(30)));

        let plan = AtomList::new(vec![
            Atom::datavalued_property(Term::var("x"), "http://example.org/age", Term::var("a")),
            Atom::builtin(
                swrlb::ADD,
                vec![
                    Term::var("sum"),
                    Term::var("a"),
                    Term::literal(Literal::integer(1)),
                ],
            ),
        ]);
        let candidates =
            find_candidates(&store, &plan, &[], &standard_registry()).unwrap();

        assert_eq!(candidates.len(), 1);
        let binding = candidates.iter().next().unwrap();
        assert_eq!(binding.get(&Variable::new("x")), Some(&res("p")));
        assert!(binding.get(&Variable::new("sum")).is_none());
    }

    #[test]
    fn test_disjoint_class_assertion_excludes_candidates() {
        let store = MemoryStore::new();
        store.insert(res("a"), res("parent"), res("b"));
        store.insert(res("c"), res("parent"), res("d"));
        // a is typed B, and A is declared disjoint with B
        store.insert(
            res("a"),
            TermValue::resource(rdf::TYPE),
            res("B"),
        );
        store.insert(
            res("A"),
            TermValue::resource(owl::DISJOINT_WITH),
            res("B"),
        );

        let plan = AtomList::new(vec![parent("x", "y")]);
        let assertion = Atom::class(Term::var("x"), "http://example.org/A");
        let candidates =
            find_candidates(&store, &plan, &[assertion], &standard_registry()).unwrap();

        // Only the c/d pair survives: typing a as A would contradict the
        // disjointness axiom.
        assert_eq!(candidates.len(), 1);
        let binding = candidates.iter().next().unwrap();
        assert_eq!(binding.get(&Variable::new("x")), Some(&res("c")));
    }

    #[test]
    fn test_functional_property_assertion_excludes_differing_value() {
        let store = MemoryStore::new();
        store.insert(res("x1"), res("knows"), res("b"));
        store.insert(
            res("spouse"),
            TermValue::resource(rdf::TYPE),
            TermValue::resource(owl::FUNCTIONAL_PROPERTY),
        );
        // x1 already has a spouse different from the asserted one
        store.insert(res("x1"), res("spouse"), res("w1"));

        let plan = AtomList::new(vec![Atom::individual_property(
            Term::var("x"),
            "http://example.org/knows",
            Term::var("y"),
        )]);
        let assertion = Atom::individual_property(
            Term::var("x"),
            "http://example.org/spouse",
            Term::resource("http://example.org/w2"),
        );
        let candidates =
            find_candidates(&store, &plan, &[assertion], &standard_registry()).unwrap();
        assert!(candidates.is_empty());
    }
}
