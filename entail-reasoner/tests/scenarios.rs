//! End-to-end inference scenarios against the in-memory store.

use entail_core::{Atom, AtomList, Literal, Rule, Term, TermValue};
use entail_memory::MemoryStore;
use entail_reasoner::{EngineOptions, EngineOutcome, InferenceEngine};
use entail_vocab::{owl, rdf};

fn res(name: &str) -> TermValue {
    TermValue::resource(format!("http://example.org/{name}"))
}

fn iri(name: &str) -> String {
    format!("http://example.org/{name}")
}

fn parent(a: &str, b: &str) -> Atom {
    Atom::individual_property(Term::var(a), iri("parent"), Term::var(b))
}

fn grandparent_rule() -> Rule {
    Rule::new(
        AtomList::new(vec![Atom::individual_property(
            Term::var("x"),
            iri("grandparent"),
            Term::var("z"),
        )]),
        AtomList::new(vec![parent("x", "y"), parent("y", "z")]),
    )
}

fn family_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert(res("a"), res("parent"), res("b"));
    store.insert(res("b"), res("parent"), res("c"));
    store
}

#[test]
fn transitive_derivation_converges_in_one_productive_round() {
    let store = family_store();
    let before = store.len();

    let mut engine = InferenceEngine::with_standard_builtins(
        store.clone(),
        vec![grandparent_rule()],
        EngineOptions::default(),
    );
    let diagnostics = engine.run().unwrap();

    assert_eq!(diagnostics.outcome, EngineOutcome::Converged);
    assert_eq!(diagnostics.facts_committed, 1);
    assert_eq!(store.len(), before + 1);
    assert!(store.contains(&res("a"), &res("grandparent"), &res("c")));

    // A second run finds everything already entailed.
    let mut engine = InferenceEngine::with_standard_builtins(
        store.clone(),
        vec![grandparent_rule()],
        EngineOptions::default(),
    );
    let diagnostics = engine.run().unwrap();
    assert_eq!(diagnostics.rounds, 1);
    assert_eq!(diagnostics.facts_committed, 0);
    assert_eq!(store.len(), before + 1);
}

fn next_age_rule(body: Vec<Atom>) -> Rule {
    Rule::new(
        AtomList::new(vec![Atom::datavalued_property(
            Term::var("x"),
            iri("hasNextAge"),
            Term::var("a2"),
        )]),
        AtomList::new(body),
    )
}

fn age_atoms() -> (Atom, Atom) {
    let has_age =
        Atom::datavalued_property(Term::var("x"), iri("hasAge"), Term::var("a"));
    let add = Atom::builtin(
        entail_vocab::swrlb::ADD,
        vec![
            Term::var("a2"),
            Term::var("a"),
            Term::literal(Literal::integer(1)),
        ],
    );
    (has_age, add)
}

#[test]
fn computation_builtin_binds_and_commits() {
    let store = MemoryStore::new();
    store.insert(
        res("p"),
        res("hasAge"),
        TermValue::Literal(Literal::integer(30)),
    );

    let (has_age, add) = age_atoms();
    let mut engine = InferenceEngine::with_standard_builtins(
        store.clone(),
        vec![next_age_rule(vec![has_age, add])],
        EngineOptions::default(),
    );
    let diagnostics = engine.run().unwrap();

    assert_eq!(diagnostics.outcome, EngineOutcome::Converged);
    assert!(store.contains(
        &res("p"),
        &res("hasNextAge"),
        &TermValue::Literal(Literal::integer(31))
    ));
}

#[test]
fn computation_builtin_is_insensitive_to_body_order() {
    let run = |body: Vec<Atom>| {
        let store = MemoryStore::new();
        store.insert(
            res("p"),
            res("hasAge"),
            TermValue::Literal(Literal::integer(30)),
        );
        let mut engine = InferenceEngine::with_standard_builtins(
            store.clone(),
            vec![next_age_rule(body)],
            EngineOptions::default(),
        );
        engine.run().unwrap();
        let mut triples = store.triples();
        triples.sort();
        triples
    };

    let (has_age, add) = age_atoms();
    let forward = run(vec![has_age.clone(), add.clone()]);
    let swapped = run(vec![add, has_age]);
    assert_eq!(forward, swapped);
}

#[test]
fn axiom_contradiction_excludes_candidates() {
    let store = MemoryStore::new();
    store.insert(res("a"), res("parent"), res("b"));
    store.insert(res("c"), res("parent"), res("d"));
    // a is typed B, and A is disjoint with B
    store.insert(res("a"), TermValue::resource(rdf::TYPE), res("B"));
    store.insert(res("A"), TermValue::resource(owl::DISJOINT_WITH), res("B"));

    // Axiom: type(?x, A) wherever ?x appears.
    let axiom = Rule::new(
        AtomList::new(vec![Atom::class(Term::var("x"), iri("A"))]),
        AtomList::empty(),
    );
    // Rule: parent(x, y) → Progenitor(x).
    let rule = Rule::new(
        AtomList::new(vec![Atom::class(Term::var("x"), iri("Progenitor"))]),
        AtomList::new(vec![parent("x", "y")]),
    );

    let mut engine = InferenceEngine::with_standard_builtins(
        store.clone(),
        vec![axiom, rule],
        EngineOptions::default(),
    );
    engine.run().unwrap();

    // The a/b candidate is excluded: typing a as A would contradict the
    // disjointness axiom. The c/d candidate commits head plus assertion.
    assert!(!store.contains(&res("a"), &TermValue::resource(rdf::TYPE), &res("Progenitor")));
    assert!(!store.contains(&res("a"), &TermValue::resource(rdf::TYPE), &res("A")));
    assert!(store.contains(&res("c"), &TermValue::resource(rdf::TYPE), &res("Progenitor")));
    assert!(store.contains(&res("c"), &TermValue::resource(rdf::TYPE), &res("A")));
}

#[test]
fn unproductive_rule_base_terminates_in_one_round() {
    let store = family_store();
    // parent(x, y) → parent(x, y): everything is already entailed.
    let identity = Rule::new(
        AtomList::new(vec![parent("x", "y")]),
        AtomList::new(vec![parent("x", "y")]),
    );
    let mut engine = InferenceEngine::with_standard_builtins(
        store.clone(),
        vec![identity],
        EngineOptions::default(),
    );
    let diagnostics = engine.run().unwrap();
    assert_eq!(diagnostics.rounds, 1);
    assert_eq!(diagnostics.facts_committed, 0);
    assert_eq!(diagnostics.outcome, EngineOutcome::Converged);
}

fn ancestor_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            AtomList::new(vec![Atom::individual_property(
                Term::var("x"),
                iri("ancestor"),
                Term::var("y"),
            )]),
            AtomList::new(vec![parent("x", "y")]),
        ),
        Rule::new(
            AtomList::new(vec![Atom::individual_property(
                Term::var("x"),
                iri("ancestor"),
                Term::var("z"),
            )]),
            AtomList::new(vec![
                parent("x", "y"),
                Atom::individual_property(Term::var("y"), iri("ancestor"), Term::var("z")),
            ]),
        ),
    ]
}

fn chain_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert(res("a"), res("parent"), res("b"));
    store.insert(res("b"), res("parent"), res("c"));
    store.insert(res("c"), res("parent"), res("d"));
    store
}

#[test]
fn ancestor_closure_reaches_fixpoint() {
    let store = chain_store();
    let mut engine = InferenceEngine::with_standard_builtins(
        store.clone(),
        ancestor_rules(),
        EngineOptions::default(),
    );
    let diagnostics = engine.run().unwrap();

    assert_eq!(diagnostics.outcome, EngineOutcome::Converged);
    assert_eq!(diagnostics.facts_committed, 6);
    assert!(store.contains(&res("a"), &res("ancestor"), &res("d")));
}

#[test]
fn round_limit_stops_early() {
    let store = chain_store();
    let mut engine = InferenceEngine::with_standard_builtins(
        store.clone(),
        ancestor_rules(),
        EngineOptions {
            max_rounds: 1,
            ..Default::default()
        },
    );
    let diagnostics = engine.run().unwrap();

    assert_eq!(diagnostics.rounds, 1);
    assert_eq!(diagnostics.outcome, EngineOutcome::RoundLimitReached);
    // The full closure needs another round.
    assert!(!store.contains(&res("a"), &res("ancestor"), &res("d")));
}

#[test]
fn plan_caching_persists_the_reordered_body() {
    let store = MemoryStore::new();
    store.insert(
        res("p"),
        res("hasAge"),
        TermValue::Literal(Literal::integer(30)),
    );

    let (has_age, add) = age_atoms();
    // Built-in first: planning must move it after the role atom.
    let mut engine = InferenceEngine::with_standard_builtins(
        store.clone(),
        vec![next_age_rule(vec![add.clone(), has_age.clone()])],
        EngineOptions {
            cache_plans: true,
            ..Default::default()
        },
    );
    engine.run().unwrap();

    let cached_body = engine.rules()[0].body();
    assert_eq!(cached_body.get(0).unwrap(), &has_age);
    assert_eq!(cached_body.get(1).unwrap(), &add);
    assert!(store.contains(
        &res("p"),
        &res("hasNextAge"),
        &TermValue::Literal(Literal::integer(31))
    ));
}
