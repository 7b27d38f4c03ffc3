//! String computations

use entail_core::{Bindings, Builtin, BuiltinError, Literal, SolutionSet, Term, TermValue, Variable};

use super::{lexical, numeric};

/// `swrlb:stringConcat(result, s1, s2, ...)`: the result is the
/// concatenation of the remaining arguments. Solves only its first
/// argument.
#[derive(Debug, Clone)]
pub struct StringConcat;

const CONCAT: &str = "swrlb:stringConcat";

impl StringConcat {
    fn concatenated(args: &[Term], bindings: &Bindings) -> Result<String, BuiltinError> {
        let mut out = String::new();
        for i in 1..args.len() {
            out.push_str(&lexical(CONCAT, args, bindings, i)?);
        }
        Ok(out)
    }
}

impl Builtin for StringConcat {
    fn is_computation(&self) -> bool {
        true
    }

    fn evaluate(&self, args: &[Term], bindings: &Bindings) -> Result<bool, BuiltinError> {
        if args.len() < 2 {
            return Err(BuiltinError::arity(CONCAT, "at least 2", args.len()));
        }
        let actual = lexical(CONCAT, args, bindings, 0)?;
        Ok(actual == Self::concatenated(args, bindings)?)
    }

    fn solve(
        &self,
        args: &[Term],
        bindings: &Bindings,
        target: &Variable,
    ) -> Result<SolutionSet, BuiltinError> {
        if args.len() < 2 {
            return Err(BuiltinError::arity(CONCAT, "at least 2", args.len()));
        }
        if args[0].as_variable() != Some(target) {
            return Err(BuiltinError::evaluation(
                CONCAT,
                format!("can only solve for the result argument, not {target}"),
            ));
        }
        let value = Self::concatenated(args, bindings)?;
        let mut solutions = SolutionSet::new();
        solutions.insert(bindings.bind(
            target.clone(),
            TermValue::Literal(Literal::string(value)),
        ));
        Ok(solutions)
    }
}

/// `swrlb:stringLength(length, string)`. Solves only its first argument.
#[derive(Debug, Clone)]
pub struct StringLength;

const LENGTH: &str = "swrlb:stringLength";

impl Builtin for StringLength {
    fn is_computation(&self) -> bool {
        true
    }

    fn evaluate(&self, args: &[Term], bindings: &Bindings) -> Result<bool, BuiltinError> {
        if args.len() != 2 {
            return Err(BuiltinError::arity(LENGTH, "exactly 2", args.len()));
        }
        let expected = lexical(LENGTH, args, bindings, 1)?.chars().count() as f64;
        Ok(numeric(LENGTH, args, bindings, 0)? == expected)
    }

    fn solve(
        &self,
        args: &[Term],
        bindings: &Bindings,
        target: &Variable,
    ) -> Result<SolutionSet, BuiltinError> {
        if args.len() != 2 {
            return Err(BuiltinError::arity(LENGTH, "exactly 2", args.len()));
        }
        if args[0].as_variable() != Some(target) {
            return Err(BuiltinError::evaluation(
                LENGTH,
                format!("can only solve for the length argument, not {target}"),
            ));
        }
        let length = lexical(LENGTH, args, bindings, 1)?.chars().count() as i64;
        let mut solutions = SolutionSet::new();
        solutions.insert(bindings.bind(
            target.clone(),
            TermValue::Literal(Literal::integer(length)),
        ));
        Ok(solutions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn str_term(value: &str) -> Term {
        Term::literal(Literal::string(value))
    }

    #[test]
    fn test_concat_solve() {
        let args = vec![Term::var("full"), str_term("Ada "), str_term("Lovelace")];
        let solutions = StringConcat
            .solve(&args, &Bindings::new(), &Variable::new("full"))
            .unwrap();
        let solution = solutions.iter().next().unwrap();
        let value = solution.get(&Variable::new("full")).unwrap();
        assert_eq!(value.as_literal().unwrap().lexical(), "Ada Lovelace");
    }

    #[test]
    fn test_concat_solve_wrong_position() {
        let args = vec![str_term("AdaB"), Term::var("tail"), str_term("B")];
        assert!(StringConcat
            .solve(&args, &Bindings::new(), &Variable::new("tail"))
            .is_err());
    }

    #[test]
    fn test_length_evaluate_and_solve() {
        let args = vec![Term::var("n"), str_term("hello")];
        let solutions = StringLength
            .solve(&args, &Bindings::new(), &Variable::new("n"))
            .unwrap();
        let solution = solutions.iter().next().unwrap();
        assert_eq!(
            solution.get(&Variable::new("n")).unwrap().as_f64(),
            Some(5.0)
        );

        let args = vec![Term::literal(Literal::integer(5)), str_term("hello")];
        assert!(StringLength.evaluate(&args, &Bindings::new()).unwrap());
    }
}
