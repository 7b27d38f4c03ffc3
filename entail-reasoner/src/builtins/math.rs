//! Arithmetic computations

use entail_core::{Bindings, Builtin, BuiltinError, Literal, SolutionSet, Term, TermValue, Variable};

use super::numeric;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Mod,
}

/// A swrlb arithmetic built-in: `op(result, operand1, operand2, ...)`.
///
/// `add` and `multiply` are variadic over their operands; `subtract`,
/// `divide` and `mod` are ternary. All are computations and can solve for
/// any single free argument position by inversion, except `mod`, which is
/// only invertible for its result position.
#[derive(Debug, Clone)]
pub struct ArithmeticBuiltin {
    op: ArithmeticOp,
    name: &'static str,
}

impl ArithmeticBuiltin {
    pub fn add() -> Self {
        Self {
            op: ArithmeticOp::Add,
            name: "swrlb:add",
        }
    }

    pub fn subtract() -> Self {
        Self {
            op: ArithmeticOp::Subtract,
            name: "swrlb:subtract",
        }
    }

    pub fn multiply() -> Self {
        Self {
            op: ArithmeticOp::Multiply,
            name: "swrlb:multiply",
        }
    }

    pub fn divide() -> Self {
        Self {
            op: ArithmeticOp::Divide,
            name: "swrlb:divide",
        }
    }

    pub fn modulus() -> Self {
        Self {
            op: ArithmeticOp::Mod,
            name: "swrlb:mod",
        }
    }

    fn check_arity(&self, args: &[Term]) -> Result<(), BuiltinError> {
        let ok = match self.op {
            ArithmeticOp::Add | ArithmeticOp::Multiply => args.len() >= 2,
            ArithmeticOp::Subtract | ArithmeticOp::Divide | ArithmeticOp::Mod => args.len() == 3,
        };
        if ok {
            Ok(())
        } else {
            Err(BuiltinError::arity(
                self.name,
                match self.op {
                    ArithmeticOp::Add | ArithmeticOp::Multiply => "at least 2".to_string(),
                    _ => "exactly 3".to_string(),
                },
                args.len(),
            ))
        }
    }

    /// Combine the operand values (everything after the result position).
    fn apply(&self, operands: &[f64]) -> Option<f64> {
        match self.op {
            ArithmeticOp::Add => Some(operands.iter().sum()),
            ArithmeticOp::Multiply => Some(operands.iter().product()),
            ArithmeticOp::Subtract => Some(operands[0] - operands[1]),
            ArithmeticOp::Divide => {
                if operands[1] == 0.0 {
                    None
                } else {
                    Some(operands[0] / operands[1])
                }
            }
            ArithmeticOp::Mod => {
                if operands[1] == 0.0 {
                    None
                } else {
                    Some(operands[0] % operands[1])
                }
            }
        }
    }

    /// Solve for the argument at `pos`, given every other argument's value.
    ///
    /// `values[i]` holds the value of argument `i` for every `i != pos`.
    /// Returns `None` when there is no (unique) solution, e.g. a zero
    /// divisor.
    fn invert(&self, values: &[Option<f64>], pos: usize) -> Result<Option<f64>, BuiltinError> {
        let value = |i: usize| values[i].expect("argument resolved");
        if pos == 0 {
            let operands: Vec<f64> = (1..values.len()).map(value).collect();
            return Ok(self.apply(&operands));
        }
        let result = value(0);
        match self.op {
            ArithmeticOp::Add => {
                let others: f64 = (1..values.len()).filter(|&i| i != pos).map(value).sum();
                Ok(Some(result - others))
            }
            ArithmeticOp::Multiply => {
                let others: f64 = (1..values.len())
                    .filter(|&i| i != pos)
                    .map(value)
                    .product();
                if others == 0.0 {
                    Ok(None)
                } else {
                    Ok(Some(result / others))
                }
            }
            ArithmeticOp::Subtract => {
                // result = a - b
                if pos == 1 {
                    Ok(Some(result + value(2)))
                } else {
                    Ok(Some(value(1) - result))
                }
            }
            ArithmeticOp::Divide => {
                // result = a / b
                if pos == 1 {
                    Ok(Some(result * value(2)))
                } else if result == 0.0 {
                    Ok(None)
                } else {
                    Ok(Some(value(1) / result))
                }
            }
            ArithmeticOp::Mod => Err(BuiltinError::evaluation(
                self.name,
                "cannot solve mod for an operand position",
            )),
        }
    }
}

impl Builtin for ArithmeticBuiltin {
    fn is_computation(&self) -> bool {
        true
    }

    fn evaluate(&self, args: &[Term], bindings: &Bindings) -> Result<bool, BuiltinError> {
        self.check_arity(args)?;
        let actual = numeric(self.name, args, bindings, 0)?;
        let operands: Vec<f64> = (1..args.len())
            .map(|i| numeric(self.name, args, bindings, i))
            .collect::<Result<_, _>>()?;
        match self.apply(&operands) {
            Some(expected) => Ok(approx_eq(actual, expected)),
            None => Ok(false),
        }
    }

    fn solve(
        &self,
        args: &[Term],
        bindings: &Bindings,
        target: &Variable,
    ) -> Result<SolutionSet, BuiltinError> {
        self.check_arity(args)?;
        let positions: Vec<usize> = args
            .iter()
            .enumerate()
            .filter(|(_, t)| t.as_variable() == Some(target))
            .map(|(i, _)| i)
            .collect();
        let [pos] = positions[..] else {
            return Err(BuiltinError::evaluation(
                self.name,
                format!("target {target} must appear in exactly one argument position"),
            ));
        };

        let mut values: Vec<Option<f64>> = Vec::with_capacity(args.len());
        for i in 0..args.len() {
            if i == pos {
                values.push(None);
            } else {
                values.push(Some(numeric(self.name, args, bindings, i)?));
            }
        }

        let mut solutions = SolutionSet::new();
        if let Some(value) = self.invert(&values, pos)? {
            solutions.insert(bindings.bind(
                target.clone(),
                TermValue::Literal(Literal::number(value)),
            ));
        }
        Ok(solutions)
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs()).max(1.0)
}
