//! The in-memory triple store and its query evaluator

use std::sync::Arc;

use hashbrown::HashSet;
use parking_lot::RwLock;

use entail_core::{Bindings, QueryRow, StoreError, TermValue, TripleStore, Variable};

use crate::parse::{parse, CompareOp, Filter, GroupPattern, PTerm, Query, TriplePattern};

/// One stored triple: subject, predicate, object.
pub type Triple = [TermValue; 3];

/// An in-memory triple store.
///
/// Cloning is cheap and shares the underlying triple set, so a test can keep
/// a handle for inspection while the engine owns another.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashSet<Triple>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Insert one triple directly (test seeding); returns false when the
    /// triple was already present.
    pub fn insert(&self, s: TermValue, p: TermValue, o: TermValue) -> bool {
        self.inner.write().insert([s, p, o])
    }

    pub fn contains(&self, s: &TermValue, p: &TermValue, o: &TermValue) -> bool {
        self.inner
            .read()
            .contains(&[s.clone(), p.clone(), o.clone()])
    }

    /// Snapshot of all triples, in no particular order.
    pub fn triples(&self) -> Vec<Triple> {
        self.inner.read().iter().cloned().collect()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("triples", &self.len())
            .finish()
    }
}

impl TripleStore for MemoryStore {
    fn query(&self, sparql: &str) -> Result<Vec<QueryRow>, StoreError> {
        let query = parse(sparql).map_err(|e| StoreError::query(e.to_string()))?;
        let Query::Select { vars, pattern } = query else {
            return Err(StoreError::query("expected a SELECT query"));
        };
        let triples = self.inner.read();
        let solutions = eval_group(&pattern, vec![Bindings::new()], &triples);
        Ok(solutions
            .iter()
            .map(|b| {
                vars.iter()
                    .map(|name| b.get(&Variable::new(name.as_str())).cloned())
                    .collect()
            })
            .collect())
    }

    fn ask(&self, sparql: &str) -> Result<bool, StoreError> {
        let query = parse(sparql).map_err(|e| StoreError::query(e.to_string()))?;
        let Query::Ask(pattern) = query else {
            return Err(StoreError::query("expected an ASK query"));
        };
        let triples = self.inner.read();
        Ok(!eval_group(&pattern, vec![Bindings::new()], &triples).is_empty())
    }

    fn update(&self, sparql: &str) -> Result<(), StoreError> {
        let query = parse(sparql).map_err(|e| StoreError::update(e.to_string()))?;
        let Query::InsertData(new_triples) = query else {
            return Err(StoreError::update("expected an INSERT DATA update"));
        };
        let mut triples = self.inner.write();
        for triple in new_triples {
            triples.insert(triple);
        }
        Ok(())
    }
}

/// Evaluate a group pattern: join the triple patterns over the seed
/// solutions, apply filters, then drop solutions any MINUS group matches.
fn eval_group(
    group: &GroupPattern,
    seed: Vec<Bindings>,
    triples: &HashSet<Triple>,
) -> Vec<Bindings> {
    let mut solutions = seed;
    for tp in &group.triples {
        let mut next = Vec::new();
        for binding in &solutions {
            for triple in triples {
                if let Some(extended) = match_triple(tp, triple, binding) {
                    next.push(extended);
                }
            }
        }
        solutions = next;
    }
    solutions.retain(|b| group.filters.iter().all(|f| eval_filter(f, b)));
    for minus in &group.minus {
        solutions.retain(|b| eval_group(minus, vec![b.clone()], triples).is_empty());
    }
    solutions
}

/// Match one triple against one pattern under a partial solution.
fn match_triple(tp: &TriplePattern, triple: &Triple, binding: &Bindings) -> Option<Bindings> {
    let mut current = binding.clone();
    for (pterm, value) in [
        (&tp.s, &triple[0]),
        (&tp.p, &triple[1]),
        (&tp.o, &triple[2]),
    ] {
        match pterm {
            PTerm::Value(expected) => {
                if expected != value {
                    return None;
                }
            }
            PTerm::Var(name) => {
                let var = Variable::new(name.as_str());
                match current.get(&var) {
                    Some(bound) => {
                        if bound != value {
                            return None;
                        }
                    }
                    None => current = current.bind(var, value.clone()),
                }
            }
        }
    }
    Some(current)
}

fn resolve(pterm: &PTerm, binding: &Bindings) -> Option<TermValue> {
    match pterm {
        PTerm::Value(v) => Some(v.clone()),
        PTerm::Var(name) => binding.get(&Variable::new(name.as_str())).cloned(),
    }
}

/// A filter over an unbound variable evaluates to false (SPARQL error
/// semantics: the solution is dropped).
fn eval_filter(filter: &Filter, binding: &Bindings) -> bool {
    let (Some(left), Some(right)) = (
        resolve(&filter.left, binding),
        resolve(&filter.right, binding),
    ) else {
        return false;
    };
    compare(&left, &right, filter.op)
}

/// Numeric comparison when both operands have a numeric view, structural
/// comparison otherwise.
fn compare(left: &TermValue, right: &TermValue, op: CompareOp) -> bool {
    if let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) {
        return match op {
            CompareOp::Eq => a == b,
            CompareOp::Ne => a != b,
            CompareOp::Lt => a < b,
            CompareOp::Le => a <= b,
            CompareOp::Gt => a > b,
            CompareOp::Ge => a >= b,
        };
    }
    match op {
        CompareOp::Eq => left == right,
        CompareOp::Ne => left != right,
        CompareOp::Lt => left < right,
        CompareOp::Le => left <= right,
        CompareOp::Gt => left > right,
        CompareOp::Ge => left >= right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entail_core::Literal;

    fn res(name: &str) -> TermValue {
        TermValue::resource(format!("http://example.org/{name}"))
    }

    fn int(value: i64) -> TermValue {
        TermValue::Literal(Literal::integer(value))
    }

    fn family_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert(res("a"), res("parent"), res("b"));
        store.insert(res("b"), res("parent"), res("c"));
        store
    }

    #[test]
    fn test_join_query() {
        let store = family_store();
        let rows = store
            .query(
                "SELECT ?x ?y ?z\nWHERE {\n  ?x <http://example.org/parent> ?y .\n  \
                 ?y <http://example.org/parent> ?z .\n}",
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            vec![Some(res("a")), Some(res("b")), Some(res("c"))]
        );
    }

    #[test]
    fn test_projection_of_unmentioned_variable() {
        let store = family_store();
        let rows = store
            .query("SELECT ?x ?w\nWHERE {\n  ?x <http://example.org/parent> ?y .\n}")
            .unwrap();
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert!(row[0].is_some());
            assert!(row[1].is_none());
        }
    }

    #[test]
    fn test_empty_pattern_yields_one_empty_solution() {
        let store = MemoryStore::new();
        let rows = store.query("SELECT ?x\nWHERE {\n}").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec![None]);
    }

    #[test]
    fn test_minus_removes_matching_solutions() {
        let store = family_store();
        store.insert(res("a"), res("blocked"), res("yes"));
        let rows = store
            .query(
                "SELECT ?x\nWHERE {\n  ?x <http://example.org/parent> ?y .\n  MINUS {\n    \
                 ?x <http://example.org/blocked> <http://example.org/yes> .\n  }\n}",
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec![Some(res("b"))]);
    }

    #[test]
    fn test_numeric_filter() {
        let store = MemoryStore::new();
        store.insert(res("p"), res("age"), int(30));
        store.insert(res("q"), res("age"), int(12));
        let rows = store
            .query(
                "SELECT ?x\nWHERE {\n  ?x <http://example.org/age> ?a .\n  FILTER(?a > 18)\n}",
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec![Some(res("p"))]);
    }

    #[test]
    fn test_dummy_variable_filter_equality() {
        let store = MemoryStore::new();
        store.insert(res("p"), res("age"), int(30));
        let rows = store
            .query(
                "SELECT ?x\nWHERE {\n  ?x <http://example.org/age> ?dummy0 .\n  \
                 FILTER(?dummy0 = 30)\n}",
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_ask_and_insert_idempotence() {
        let store = MemoryStore::new();
        let pattern = "<http://example.org/a> <http://example.org/p> <http://example.org/b> .";
        assert!(!store.ask(&format!("ASK {{\n  {pattern}\n}}")).unwrap());

        store
            .update(&format!("INSERT DATA {{\n  {pattern}\n}}"))
            .unwrap();
        assert!(store.ask(&format!("ASK {{\n  {pattern}\n}}")).unwrap());
        assert_eq!(store.len(), 1);

        store
            .update(&format!("INSERT DATA {{\n  {pattern}\n}}"))
            .unwrap();
        assert_eq!(store.len(), 1);
    }
}
