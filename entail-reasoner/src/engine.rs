//! The inference engine: fixpoint orchestration over a rule base
//!
//! Each round plans every rule (or reuses a cached plan), fetches candidate
//! bindings through the store, refines them in memory, and commits each
//! solution's head. The loop ends when a round changes nothing or the
//! configured round limit is reached. A planning or evaluation failure on
//! any rule aborts the whole round: an unplannable rule is a configuration
//! defect, not an input-data condition.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use entail_core::{Atom, BuiltinRegistry, Rule, TripleStore, Variable};

use crate::builtins::standard_registry;
use crate::error::Result;
use crate::{commit, evaluate, plan, pushdown};

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Maximum number of fixpoint rounds; non-positive means unbounded.
    pub max_rounds: i32,
    /// Persist each rule's first successful plan as its new body, so later
    /// rounds skip planning.
    pub cache_plans: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_rounds: 0,
            cache_plans: false,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineOutcome {
    /// A round produced no change
    Converged,
    /// The configured round limit was reached with changes still occurring
    RoundLimitReached,
}

/// Diagnostics returned from a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineDiagnostics {
    /// Fixpoint rounds executed
    pub rounds: usize,
    /// Successful head commits (store mutations)
    pub facts_committed: usize,
    pub outcome: EngineOutcome,
}

/// Forward-chaining inference engine over one store handle.
pub struct InferenceEngine<S> {
    store: S,
    registry: BuiltinRegistry,
    rules: Vec<Rule>,
    planned: Vec<bool>,
    axioms: HashMap<Variable, Vec<Atom>>,
    options: EngineOptions,
}

impl<S: TripleStore> InferenceEngine<S> {
    /// Create an engine over a store, registry, rule base and options.
    ///
    /// Rules with an empty body are indexed as axioms by each head
    /// variable and are not run as rules; their heads feed contradiction
    /// checking and head commits wherever those variables appear.
    pub fn new(
        store: S,
        registry: BuiltinRegistry,
        rules: Vec<Rule>,
        options: EngineOptions,
    ) -> Self {
        let mut axioms: HashMap<Variable, Vec<Atom>> = HashMap::new();
        for rule in rules.iter().filter(|r| r.is_axiom()) {
            for atom in rule.head().iter() {
                for var in atom.variables() {
                    let entry = axioms.entry(var.clone()).or_default();
                    if !entry.contains(atom) {
                        entry.push(atom.clone());
                    }
                }
            }
        }
        let planned = vec![false; rules.len()];
        Self {
            store,
            registry,
            rules,
            planned,
            axioms,
            options,
        }
    }

    /// Create an engine with the standard built-in library.
    pub fn with_standard_builtins(store: S, rules: Vec<Rule>, options: EngineOptions) -> Self {
        Self::new(store, standard_registry(), rules, options)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Axioms applicable to a rule: every indexed atom mentioning one of
    /// the rule's variables, deduplicated.
    fn axioms_for(&self, rule: &Rule) -> Vec<Atom> {
        let mut assertions: Vec<Atom> = Vec::new();
        for var in rule.variables() {
            if let Some(atoms) = self.axioms.get(&var) {
                for atom in atoms {
                    if !assertions.contains(atom) {
                        assertions.push(atom.clone());
                    }
                }
            }
        }
        assertions
    }

    /// Run the rule base to fixpoint or the round limit.
    pub fn run(&mut self) -> Result<EngineDiagnostics> {
        let mut rounds = 0usize;
        let mut facts_committed = 0usize;

        loop {
            rounds += 1;
            let mut modified = false;

            for index in 0..self.rules.len() {
                if self.rules[index].is_axiom() {
                    continue;
                }

                let body = if self.options.cache_plans && self.planned[index] {
                    self.rules[index].body().clone()
                } else {
                    let planned = plan::reorder(self.rules[index].body(), &self.registry)?;
                    if self.options.cache_plans {
                        self.rules[index].set_body(planned.clone());
                        self.planned[index] = true;
                    }
                    planned
                };

                let assertions = self.axioms_for(&self.rules[index]);
                let candidates =
                    pushdown::find_candidates(&self.store, &body, &assertions, &self.registry)?;
                tracing::trace!(rule = index, candidates = candidates.len(), "rule evaluated");
                let solutions = evaluate::evaluate(&body, &candidates, &self.registry)?;

                for binding in solutions.iter() {
                    let changed = commit::commit_head(
                        &self.store,
                        self.rules[index].head(),
                        binding,
                        &assertions,
                    )?;
                    if changed {
                        facts_committed += 1;
                    }
                    modified |= changed;
                }
            }

            tracing::debug!(round = rounds, modified, "inference round complete");

            if !modified {
                return Ok(EngineDiagnostics {
                    rounds,
                    facts_committed,
                    outcome: EngineOutcome::Converged,
                });
            }
            if self.options.max_rounds > 0 && rounds >= self.options.max_rounds as usize {
                return Ok(EngineDiagnostics {
                    rounds,
                    facts_committed,
                    outcome: EngineOutcome::RoundLimitReached,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entail_core::{AtomList, Term};
    use entail_memory::MemoryStore;

    #[test]
    fn test_axiom_indexing_by_head_variable() {
        let axiom = Rule::new(
            AtomList::new(vec![Atom::class(Term::var("x"), "http://example.org/A")]),
            AtomList::empty(),
        );
        let rule = Rule::new(
            AtomList::new(vec![Atom::class(Term::var("x"), "http://example.org/B")]),
            AtomList::new(vec![Atom::individual_property(
                Term::var("x"),
                "http://example.org/p",
                Term::var("y"),
            )]),
        );
        let engine = InferenceEngine::with_standard_builtins(
            MemoryStore::new(),
            vec![axiom, rule.clone()],
            EngineOptions::default(),
        );

        let assertions = engine.axioms_for(&rule);
        assert_eq!(assertions.len(), 1);
        assert_eq!(
            assertions[0],
            Atom::class(Term::var("x"), "http://example.org/A")
        );

        // A rule over different variables picks up nothing.
        let other = Rule::new(
            AtomList::new(vec![Atom::class(Term::var("q"), "http://example.org/B")]),
            AtomList::new(vec![Atom::individual_property(
                Term::var("q"),
                "http://example.org/p",
                Term::var("r"),
            )]),
        );
        assert!(engine.axioms_for(&other).is_empty());
    }

    #[test]
    fn test_empty_rule_base_converges_immediately() {
        let mut engine = InferenceEngine::with_standard_builtins(
            MemoryStore::new(),
            Vec::new(),
            EngineOptions::default(),
        );
        let diagnostics = engine.run().unwrap();
        assert_eq!(diagnostics.rounds, 1);
        assert_eq!(diagnostics.facts_committed, 0);
        assert_eq!(diagnostics.outcome, EngineOutcome::Converged);
    }

    #[test]
    fn test_options_default() {
        let options = EngineOptions::default();
        assert_eq!(options.max_rounds, 0);
        assert!(!options.cache_plans);
    }
}
