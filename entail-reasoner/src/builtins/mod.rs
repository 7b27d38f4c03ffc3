//! Standard built-in library
//!
//! Built-ins are registered explicitly, once, at engine construction —
//! there is no runtime service discovery. The standard library covers the
//! SWRL built-in namespace's arithmetic computations, comparison predicates
//! and basic string operations.
//!
//! Arithmetic built-ins follow the swrlb convention: the first argument is
//! the result, e.g. `add(?sum, ?x, ?y)` holds when `?sum = ?x + ?y`. As
//! computations they can solve for any single free argument position by
//! algebraic inversion.

pub mod compare;
pub mod math;
pub mod string;

pub use compare::CompareBuiltin;
pub use math::ArithmeticBuiltin;
pub use string::{StringConcat, StringLength};

use std::sync::Arc;

use entail_core::{Bindings, BuiltinError, BuiltinRegistry, Term, TermValue};
use entail_vocab::swrlb;

/// The standard registry: all swrlb built-ins this crate implements.
pub fn standard_registry() -> BuiltinRegistry {
    let mut registry = BuiltinRegistry::new();

    registry.register(swrlb::ADD, Arc::new(ArithmeticBuiltin::add()));
    registry.register(swrlb::SUBTRACT, Arc::new(ArithmeticBuiltin::subtract()));
    registry.register(swrlb::MULTIPLY, Arc::new(ArithmeticBuiltin::multiply()));
    registry.register(swrlb::DIVIDE, Arc::new(ArithmeticBuiltin::divide()));
    registry.register(swrlb::MOD, Arc::new(ArithmeticBuiltin::modulus()));

    registry.register(swrlb::EQUAL, Arc::new(CompareBuiltin::equal()));
    registry.register(swrlb::NOT_EQUAL, Arc::new(CompareBuiltin::not_equal()));
    registry.register(swrlb::LESS_THAN, Arc::new(CompareBuiltin::less_than()));
    registry.register(
        swrlb::LESS_THAN_OR_EQUAL,
        Arc::new(CompareBuiltin::less_than_or_equal()),
    );
    registry.register(swrlb::GREATER_THAN, Arc::new(CompareBuiltin::greater_than()));
    registry.register(
        swrlb::GREATER_THAN_OR_EQUAL,
        Arc::new(CompareBuiltin::greater_than_or_equal()),
    );

    registry.register(swrlb::STRING_CONCAT, Arc::new(StringConcat));
    registry.register(swrlb::STRING_LENGTH, Arc::new(StringLength));

    registry
}

/// Resolve argument `index` to a ground value.
pub(crate) fn resolved(
    builtin: &str,
    args: &[Term],
    bindings: &Bindings,
    index: usize,
) -> Result<TermValue, BuiltinError> {
    let term = args.get(index).ok_or_else(|| {
        BuiltinError::arity(builtin, format!("at least {}", index + 1), args.len())
    })?;
    bindings
        .resolve(term)
        .ok_or_else(|| BuiltinError::evaluation(builtin, format!("argument {index} is unbound")))
}

/// Resolve argument `index` to a number.
pub(crate) fn numeric(
    builtin: &str,
    args: &[Term],
    bindings: &Bindings,
    index: usize,
) -> Result<f64, BuiltinError> {
    resolved(builtin, args, bindings, index)?
        .as_f64()
        .ok_or_else(|| {
            BuiltinError::evaluation(builtin, format!("argument {index} is not numeric"))
        })
}

/// Resolve argument `index` to a string literal's lexical form.
pub(crate) fn lexical(
    builtin: &str,
    args: &[Term],
    bindings: &Bindings,
    index: usize,
) -> Result<String, BuiltinError> {
    match resolved(builtin, args, bindings, index)? {
        TermValue::Literal(lit) => Ok(lit.lexical().to_string()),
        TermValue::Resource(_) => Err(BuiltinError::evaluation(
            builtin,
            format!("argument {index} is not a literal"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entail_core::Iri;

    #[test]
    fn test_standard_registry_contents() {
        let registry = standard_registry();
        assert_eq!(registry.len(), 13);

        let add = registry.lookup(&Iri::new(swrlb::ADD)).unwrap();
        assert!(add.is_computation());
        assert!(!add.is_store_serializable());

        let gt = registry.lookup(&Iri::new(swrlb::GREATER_THAN)).unwrap();
        assert!(!gt.is_computation());
        assert!(gt.is_store_serializable());
        assert_eq!(gt.filter_operator(), Some(">"));
    }
}
