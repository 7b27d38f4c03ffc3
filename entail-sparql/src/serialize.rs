//! Atom serializability and graph-pattern construction

use entail_core::{Atom, BuiltinRegistry, Term, TermValue};

use crate::error::{Result, SparqlError};
use crate::term::{term_fragment, value_fragment};

/// Can this atom be translated into the store's query syntax?
///
/// Class and role atoms always can. A built-in atom can iff its registered
/// implementation declares the store-serializable capability; an unknown
/// built-in is treated as non-serializable (planning will reject it later,
/// with a better error).
pub fn is_serializable(atom: &Atom, registry: &BuiltinRegistry) -> bool {
    match atom {
        Atom::Class { .. } | Atom::IndividualProperty { .. } | Atom::DatavaluedProperty { .. } => {
            true
        }
        Atom::Builtin { predicate, .. } => registry
            .lookup(predicate)
            .is_some_and(|b| b.is_store_serializable()),
    }
}

/// The longest prefix of `atoms` in which every atom is serializable.
///
/// Scans from the first element and stops at (excluding) the first
/// non-serializable atom. Order-sensitive by design: the planner has already
/// pulled serializable atoms as far forward as dependencies allow, which is
/// what makes this prefix maximal.
pub fn longest_serializable_prefix<'a>(
    atoms: &'a [Atom],
    registry: &BuiltinRegistry,
) -> &'a [Atom] {
    let end = atoms
        .iter()
        .position(|a| !is_serializable(a, registry))
        .unwrap_or(atoms.len());
    &atoms[..end]
}

/// Render a fully-ground class/role atom as one triple line.
///
/// Used for ASK and INSERT DATA patterns, where every term is already a
/// value; typed literals render directly (no dummy-variable indirection).
pub fn ground_triple(atom: &Atom) -> Result<String> {
    match atom {
        Atom::Class { arg, class } => Ok(format!(
            "{} <{}> <{}> .",
            term_fragment(arg),
            entail_vocab::rdf::TYPE,
            class
        )),
        Atom::IndividualProperty {
            arg1,
            property,
            arg2,
        }
        | Atom::DatavaluedProperty {
            arg1,
            property,
            arg2,
        } => Ok(format!(
            "{} <{}> {} .",
            term_fragment(arg1),
            property,
            term_fragment(arg2)
        )),
        Atom::Builtin { predicate, .. } => Err(SparqlError::UnsupportedAtom(format!(
            "built-in {predicate} cannot appear in an assertion pattern"
        ))),
    }
}

/// Builds one conjunctive graph pattern from a sequence of atoms, in body
/// (candidate-retrieval) position.
///
/// Typed non-string literals in object position are replaced by a fresh
/// dummy variable constrained with `FILTER(?dummyN = <literal>)`, so literal
/// comparison uses the store's native type-aware equality rather than
/// lexical equality. Store-serializable built-ins render as comparison
/// FILTERs.
#[derive(Debug)]
pub struct PatternBuilder<'a> {
    registry: &'a BuiltinRegistry,
    lines: Vec<String>,
    filters: Vec<String>,
    dummies: usize,
}

impl<'a> PatternBuilder<'a> {
    pub fn new(registry: &'a BuiltinRegistry) -> Self {
        PatternBuilder {
            registry,
            lines: Vec::new(),
            filters: Vec::new(),
            dummies: 0,
        }
    }

    /// Render an object-position term, diverting typed non-string literals
    /// through a dummy variable + FILTER.
    fn object_fragment(&mut self, term: &Term) -> String {
        match term {
            Term::Value(TermValue::Literal(lit)) if !lit.is_string() && lit.lang().is_none() => {
                let dummy = format!("?dummy{}", self.dummies);
                self.dummies += 1;
                self.filters
                    .push(format!("FILTER({} = {})", dummy, value_fragment(&TermValue::Literal(lit.clone()))));
                dummy
            }
            _ => term_fragment(term),
        }
    }

    /// Append one atom's translation to the pattern.
    pub fn push_atom(&mut self, atom: &Atom) -> Result<()> {
        match atom {
            Atom::Class { arg, class } => {
                self.lines.push(format!(
                    "{} <{}> <{}> .",
                    term_fragment(arg),
                    entail_vocab::rdf::TYPE,
                    class
                ));
                Ok(())
            }
            Atom::IndividualProperty {
                arg1,
                property,
                arg2,
            } => {
                self.lines.push(format!(
                    "{} <{}> {} .",
                    term_fragment(arg1),
                    property,
                    term_fragment(arg2)
                ));
                Ok(())
            }
            Atom::DatavaluedProperty {
                arg1,
                property,
                arg2,
            } => {
                let object = self.object_fragment(arg2);
                self.lines.push(format!(
                    "{} <{}> {} .",
                    term_fragment(arg1),
                    property,
                    object
                ));
                Ok(())
            }
            Atom::Builtin { predicate, args } => {
                let builtin = self.registry.lookup(predicate).ok_or_else(|| {
                    SparqlError::UnserializableBuiltin(predicate.to_string())
                })?;
                let op = builtin.filter_operator().ok_or_else(|| {
                    SparqlError::UnserializableBuiltin(predicate.to_string())
                })?;
                if args.len() != 2 {
                    return Err(SparqlError::FilterArity {
                        builtin: predicate.to_string(),
                        actual: args.len(),
                    });
                }
                self.filters.push(format!(
                    "FILTER({} {} {})",
                    term_fragment(&args[0]),
                    op,
                    term_fragment(&args[1])
                ));
                Ok(())
            }
        }
    }

    /// True when no pattern lines or filters have been collected.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.filters.is_empty()
    }

    /// The pattern text: triple lines first, then filters.
    pub fn into_pattern(self) -> String {
        let mut parts = self.lines;
        parts.extend(self.filters);
        parts.join("\n")
    }
}
