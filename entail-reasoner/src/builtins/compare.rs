//! Comparison predicates
//!
//! All comparisons are store-serializable: the planner may push them into
//! the store query as `FILTER` clauses instead of evaluating them here.

use entail_core::{Bindings, Builtin, BuiltinError, Term, TermValue};

use super::resolved;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompareOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

/// A binary comparison built-in.
#[derive(Debug, Clone)]
pub struct CompareBuiltin {
    op: CompareOp,
    name: &'static str,
}

impl CompareBuiltin {
    pub fn equal() -> Self {
        Self {
            op: CompareOp::Equal,
            name: "swrlb:equal",
        }
    }

    pub fn not_equal() -> Self {
        Self {
            op: CompareOp::NotEqual,
            name: "swrlb:notEqual",
        }
    }

    pub fn less_than() -> Self {
        Self {
            op: CompareOp::LessThan,
            name: "swrlb:lessThan",
        }
    }

    pub fn less_than_or_equal() -> Self {
        Self {
            op: CompareOp::LessThanOrEqual,
            name: "swrlb:lessThanOrEqual",
        }
    }

    pub fn greater_than() -> Self {
        Self {
            op: CompareOp::GreaterThan,
            name: "swrlb:greaterThan",
        }
    }

    pub fn greater_than_or_equal() -> Self {
        Self {
            op: CompareOp::GreaterThanOrEqual,
            name: "swrlb:greaterThanOrEqual",
        }
    }

    fn compare(&self, left: &TermValue, right: &TermValue) -> bool {
        // Numeric comparison when both sides have a numeric view, structural
        // otherwise.
        if let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) {
            return match self.op {
                CompareOp::Equal => a == b,
                CompareOp::NotEqual => a != b,
                CompareOp::LessThan => a < b,
                CompareOp::LessThanOrEqual => a <= b,
                CompareOp::GreaterThan => a > b,
                CompareOp::GreaterThanOrEqual => a >= b,
            };
        }
        match self.op {
            CompareOp::Equal => left == right,
            CompareOp::NotEqual => left != right,
            CompareOp::LessThan => left < right,
            CompareOp::LessThanOrEqual => left <= right,
            CompareOp::GreaterThan => left > right,
            CompareOp::GreaterThanOrEqual => left >= right,
        }
    }
}

impl Builtin for CompareBuiltin {
    fn filter_operator(&self) -> Option<&'static str> {
        Some(match self.op {
            CompareOp::Equal => "=",
            CompareOp::NotEqual => "!=",
            CompareOp::LessThan => "<",
            CompareOp::LessThanOrEqual => "<=",
            CompareOp::GreaterThan => ">",
            CompareOp::GreaterThanOrEqual => ">=",
        })
    }

    fn evaluate(&self, args: &[Term], bindings: &Bindings) -> Result<bool, BuiltinError> {
        if args.len() != 2 {
            return Err(BuiltinError::arity(self.name, "exactly 2", args.len()));
        }
        let left = resolved(self.name, args, bindings, 0)?;
        let right = resolved(self.name, args, bindings, 1)?;
        Ok(self.compare(&left, &right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entail_core::Literal;

    fn int_term(value: i64) -> Term {
        Term::literal(Literal::integer(value))
    }

    #[test]
    fn test_numeric_comparison() {
        let gt = CompareBuiltin::greater_than();
        assert!(gt
            .evaluate(&[int_term(31), int_term(30)], &Bindings::new())
            .unwrap());
        assert!(!gt
            .evaluate(&[int_term(30), int_term(30)], &Bindings::new())
            .unwrap());
    }

    #[test]
    fn test_numeric_equality_across_lexical_forms() {
        let eq = CompareBuiltin::equal();
        let decimal = Term::literal(Literal::typed("30.0", entail_vocab::xsd::DECIMAL));
        assert!(eq.evaluate(&[int_term(30), decimal], &Bindings::new()).unwrap());
    }

    #[test]
    fn test_structural_comparison_for_resources() {
        let ne = CompareBuiltin::not_equal();
        let a = Term::resource("http://example.org/a");
        let b = Term::resource("http://example.org/b");
        assert!(ne.evaluate(&[a.clone(), b], &Bindings::new()).unwrap());
        assert!(!ne.evaluate(&[a.clone(), a], &Bindings::new()).unwrap());
    }

    #[test]
    fn test_unbound_argument_errors() {
        let eq = CompareBuiltin::equal();
        assert!(eq
            .evaluate(&[Term::var("x"), int_term(1)], &Bindings::new())
            .is_err());
    }
}
