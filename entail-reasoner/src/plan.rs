//! Execution planning
//!
//! `reorder` turns a rule body into an evaluation order in which all
//! class/role atoms precede all built-ins, no built-in precedes another
//! built-in it depends on, and, subject to that, store-serializable
//! built-ins sit as far forward as possible (maximizing the prefix the body
//! evaluator can push into one store query).

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};

use entail_core::{Atom, AtomList, Builtin, BuiltinError, BuiltinRegistry, Variable};

use crate::error::{ReasonerError, Result};

/// Reorder a rule body into a valid evaluation plan.
pub fn reorder(body: &AtomList, registry: &BuiltinRegistry) -> Result<AtomList> {
    let builtin_atoms = body.builtins();
    if builtin_atoms.is_empty() {
        return Ok(body.clone());
    }

    let groundable = body.groundable_variables();
    let impls = resolve_impls(&builtin_atoms, registry)?;
    let computed = resolve_computed_variables(&builtin_atoms, &impls, &groundable);
    let arena = DependencyArena::build(&builtin_atoms, &groundable, &computed)?;
    arena.check_cycles()?;
    let mut order = arena.topological_order()?;
    bubble_serializable(&mut order, &arena, &impls);

    tracing::trace!(
        builtins = builtin_atoms.len(),
        computed = computed.len(),
        "planned rule body"
    );

    let mut atoms: Vec<Atom> = body
        .class_and_role_atoms()
        .into_iter()
        .cloned()
        .collect();
    atoms.extend(order.into_iter().map(|i| builtin_atoms[i].clone()));
    Ok(AtomList::new(atoms))
}

/// Resolve every built-in atom's implementation up front; a missing
/// registration is fatal to planning.
fn resolve_impls(
    atoms: &[&Atom],
    registry: &BuiltinRegistry,
) -> Result<Vec<Arc<dyn Builtin>>> {
    atoms
        .iter()
        .map(|atom| match atom {
            Atom::Builtin { predicate, .. } => {
                registry.lookup(predicate).cloned().ok_or_else(|| {
                    ReasonerError::Builtin(BuiltinError::evaluation(
                        predicate.to_string(),
                        "no registered implementation",
                    ))
                })
            }
            _ => unreachable!("builtins() returns only built-in atoms"),
        })
        .collect()
}

/// Variables of `atom` that are neither groundable nor claimed as another
/// atom's computed output. The atom's own claimed output stays free for it.
fn free_variables<'a>(
    atom: &'a Atom,
    groundable: &[Variable],
    computed: &HashMap<Variable, usize>,
    index: usize,
) -> Vec<&'a Variable> {
    let mut free: Vec<&Variable> = Vec::new();
    for v in atom.variables() {
        if groundable.contains(v) || free.contains(&v) {
            continue;
        }
        match computed.get(v) {
            Some(&owner) if owner != index => {}
            _ => free.push(v),
        }
    }
    free
}

fn has_claim(computed: &HashMap<Variable, usize>, index: usize) -> bool {
    computed.values().any(|&owner| owner == index)
}

/// Determine, by fixpoint iteration, which computation binds which
/// variable.
///
/// Forced claims (a computation down to a single free variable) are taken
/// first; when the iteration stalls with every remaining computation holding
/// several free variables, one speculative claim is made to break the stall
/// and the iteration continues. A stall like that is either a genuine
/// dependency cycle (caught downstream) or a rule with more outputs than
/// computations (caught as an unbound variable when edges are built).
fn resolve_computed_variables(
    atoms: &[&Atom],
    impls: &[Arc<dyn Builtin>],
    groundable: &[Variable],
) -> HashMap<Variable, usize> {
    let mut computed: HashMap<Variable, usize> = HashMap::new();
    loop {
        let mut changed = false;
        for (i, atom) in atoms.iter().enumerate() {
            if !impls[i].is_computation() || has_claim(&computed, i) {
                continue;
            }
            let free = free_variables(atom, groundable, &computed, i);
            if let [only] = free[..] {
                if !computed.contains_key(only) {
                    computed.insert(only.clone(), i);
                    changed = true;
                }
            }
        }
        if changed {
            continue;
        }

        let speculative = atoms.iter().enumerate().find_map(|(i, atom)| {
            if !impls[i].is_computation() || has_claim(&computed, i) {
                return None;
            }
            free_variables(atom, groundable, &computed, i)
                .into_iter()
                .find(|v| !computed.contains_key(*v))
                .map(|v| (i, v.clone()))
        });
        match speculative {
            Some((i, var)) => {
                computed.insert(var, i);
            }
            None => break,
        }
    }
    computed
}

/// Planner-internal dependency graph over built-in atoms.
///
/// Nodes are atom positions; forward and back edges are index sets. The
/// arena is built per planning call and discarded with it.
struct DependencyArena {
    /// `deps[i]`: atoms whose computed variable atom `i` consumes
    deps: Vec<HashSet<usize>>,
    /// `dependents[i]`: atoms that consume atom `i`'s computed variable
    dependents: Vec<HashSet<usize>>,
}

impl DependencyArena {
    fn build(
        atoms: &[&Atom],
        groundable: &[Variable],
        computed: &HashMap<Variable, usize>,
    ) -> Result<Self> {
        let n = atoms.len();
        let mut deps: Vec<HashSet<usize>> = vec![HashSet::new(); n];
        let mut dependents: Vec<HashSet<usize>> = vec![HashSet::new(); n];
        for (i, atom) in atoms.iter().enumerate() {
            for v in atom.variables() {
                if groundable.contains(v) {
                    continue;
                }
                match computed.get(v) {
                    Some(&owner) if owner == i => {}
                    Some(&owner) => {
                        deps[i].insert(owner);
                        dependents[owner].insert(i);
                    }
                    None => return Err(ReasonerError::unbound(v)),
                }
            }
        }
        Ok(DependencyArena { deps, dependents })
    }

    fn len(&self) -> usize {
        self.deps.len()
    }

    /// Depth-first search from every dependency-free node with a per-path
    /// visited set.
    fn check_cycles(&self) -> Result<()> {
        for root in (0..self.len()).filter(|&i| self.dependents[i].is_empty()) {
            let mut path = vec![false; self.len()];
            self.walk(root, &mut path)?;
        }
        Ok(())
    }

    fn walk(&self, node: usize, path: &mut [bool]) -> Result<()> {
        if path[node] {
            return Err(ReasonerError::CyclicDependency(
                "built-in computations revisit an atom on the current evaluation path".into(),
            ));
        }
        path[node] = true;
        for &dep in &self.deps[node] {
            self.walk(dep, path)?;
        }
        path[node] = false;
        Ok(())
    }

    /// Kahn's algorithm: an atom is scheduled only once all its
    /// dependencies are. Unschedulable leftovers are a rootless cycle,
    /// which the dependency-free DFS above cannot reach.
    fn topological_order(&self) -> Result<Vec<usize>> {
        let n = self.len();
        let mut order = Vec::with_capacity(n);
        let mut scheduled = vec![false; n];
        while order.len() < n {
            let next = (0..n)
                .find(|&i| !scheduled[i] && self.deps[i].iter().all(|&d| scheduled[d]));
            match next {
                Some(i) => {
                    scheduled[i] = true;
                    order.push(i);
                }
                None => {
                    return Err(ReasonerError::CyclicDependency(
                        "built-in computations form a dependency cycle".into(),
                    ))
                }
            }
        }
        Ok(order)
    }
}

/// Repeatedly swap adjacent pairs, pulling a serializable atom before a
/// non-serializable neighbour it does not depend on, to a fixpoint.
fn bubble_serializable(
    order: &mut [usize],
    arena: &DependencyArena,
    impls: &[Arc<dyn Builtin>],
) {
    loop {
        let mut swapped = false;
        for k in 1..order.len() {
            let (prev, cur) = (order[k - 1], order[k]);
            if impls[cur].is_store_serializable()
                && !impls[prev].is_store_serializable()
                && !arena.deps[cur].contains(&prev)
            {
                order.swap(k - 1, k);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}
