//! In-memory evaluation of the non-pushdown suffix
//!
//! Whatever the store query could not express is evaluated here: the suffix
//! of the plan after its longest serializable prefix. Computations enrich
//! each candidate binding recursively (one new variable per branch), then a
//! final pass filters by every built-in's predicate over the fully-bound
//! values. Only built-in atoms may appear in the suffix; anything else is a
//! planning defect.

use std::sync::Arc;

use entail_core::{
    Atom, AtomList, Bindings, Builtin, BuiltinError, BuiltinRegistry, SolutionSet, Term, Variable,
};
use entail_sparql::longest_serializable_prefix;

use crate::error::{ReasonerError, Result};

/// Refine store candidates against the plan's in-memory suffix.
pub fn evaluate(
    plan: &AtomList,
    candidates: &SolutionSet,
    registry: &BuiltinRegistry,
) -> Result<SolutionSet> {
    let prefix_len = longest_serializable_prefix(plan.as_slice(), registry).len();
    let suffix = &plan.as_slice()[prefix_len..];

    let mut enriched: Vec<Bindings> = Vec::new();
    for candidate in candidates.iter() {
        expand(suffix, candidate.clone(), registry, &mut enriched)?;
    }

    let mut solutions = SolutionSet::new();
    'next: for binding in enriched {
        for atom in suffix {
            let (builtin, args) = builtin_for(atom, registry)?;
            if !builtin.evaluate(args, &binding)? {
                continue 'next;
            }
        }
        solutions.insert(binding);
    }
    Ok(solutions)
}

/// Recursive binding enrichment over the suffix.
///
/// Base case: an empty suffix yields the binding as a complete solution.
/// A computation with one unbound argument branches on its solutions; a
/// predicate built-in passes through (it gates truth in the filter pass,
/// once everything is bound).
fn expand(
    suffix: &[Atom],
    binding: Bindings,
    registry: &BuiltinRegistry,
    out: &mut Vec<Bindings>,
) -> Result<()> {
    let Some((atom, rest)) = suffix.split_first() else {
        out.push(binding);
        return Ok(());
    };

    let (builtin, args) = builtin_for(atom, registry)?;
    if builtin.is_computation() {
        match unbound_variables(args, &binding)[..] {
            [] => expand(rest, binding, registry, out),
            [target] => {
                let target = target.clone();
                for solution in builtin.solve(args, &binding, &target)? {
                    expand(rest, solution, registry, out)?;
                }
                Ok(())
            }
            _ => Err(ReasonerError::unbound(unbound_variables(args, &binding)[1])),
        }
    } else {
        expand(rest, binding, registry, out)
    }
}

fn builtin_for<'a>(
    atom: &'a Atom,
    registry: &'a BuiltinRegistry,
) -> Result<(&'a Arc<dyn Builtin>, &'a [Term])> {
    let Atom::Builtin { predicate, args } = atom else {
        return Err(ReasonerError::InMemoryEvaluation(format!(
            "non-built-in atom reached the in-memory phase: {atom:?}"
        )));
    };
    let builtin = registry.lookup(predicate).ok_or_else(|| {
        ReasonerError::Builtin(BuiltinError::evaluation(
            predicate.to_string(),
            "no registered implementation",
        ))
    })?;
    Ok((builtin, args))
}

fn unbound_variables<'a>(args: &'a [Term], binding: &Bindings) -> Vec<&'a Variable> {
    let mut vars: Vec<&Variable> = Vec::new();
    for term in args {
        if let Term::Variable(v) = term {
            if !binding.contains(v) && !vars.contains(&v) {
                vars.push(v);
            }
        }
    }
    vars
}
