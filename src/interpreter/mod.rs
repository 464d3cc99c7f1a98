//! Tree-walking evaluation of type-checked SLU-C programs.
//!
//! The interpreter walks the AST directly; there is no intermediate
//! representation. Each function call owns a fresh frame mapping names to
//! values, parameters are bound positionally and locals start out `Unset`.
//! Dispatch goes through a name-to-definition map built once up front.
//!
//! Evaluation assumes the type check pass already ran: operator and
//! assignment typing violations cannot occur in a checked program, so the
//! corresponding match arms only exist to keep evaluation total. `&&` and
//! `||` do not short-circuit; both operands are always evaluated.

mod value;

pub use value::Value;

use std::{
    collections::HashMap,
    error::Error,
    fmt::Display,
    io::{self, Write},
};

use crate::parser::ast::{
    BinaryOperator, Expression, FunctionDef, Program, Statement, UnaryOperator,
};
use crate::typechecker::Type;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RuntimeError {
    DivisionByZero { line: usize },
    UnknownFunction { name: String, line: usize },
    NonBooleanCondition { line: usize },
    UnassignedVariable { name: String, line: usize },
    InvalidOperands { operator: String, line: usize },
    NoEntryFunction,
    Output { message: String },
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeError::DivisionByZero { line } => {
                write!(f, "ERROR: Division by zero on line {line}")
            }
            RuntimeError::UnknownFunction { name, line } => {
                write!(f, "ERROR: Call to unknown function '{name}' on line {line}")
            }
            RuntimeError::NonBooleanCondition { line } => {
                write!(f, "ERROR: Condition is not a bool on line {line}")
            }
            RuntimeError::UnassignedVariable { name, line } => {
                write!(
                    f,
                    "ERROR: Variable '{name}' is used before it is assigned on line {line}"
                )
            }
            RuntimeError::InvalidOperands { operator, line } => {
                write!(f, "ERROR: Invalid operands for '{operator}' on line {line}")
            }
            RuntimeError::NoEntryFunction => {
                write!(f, "ERROR: Program has no 'main' function")
            }
            RuntimeError::Output { message } => {
                write!(f, "ERROR: Failed to write output: {message}")
            }
        }
    }
}

impl Error for RuntimeError {}

/// The per-call value environment. Born at function entry, dropped at
/// return; a callee can never observe or mutate its caller's frame.
#[derive(Debug, Default)]
struct Frame {
    values: HashMap<String, Value>,
}

pub struct Interpreter<'a, W> {
    functions: HashMap<&'a str, &'a FunctionDef<Type>>,
    output: W,
}

impl<'a> Interpreter<'a, io::Stdout> {
    pub fn new(program: &'a Program<Type>) -> Self {
        Self::with_output(program, io::stdout())
    }
}

impl<'a, W> Interpreter<'a, W>
where
    W: Write,
{
    pub fn with_output(program: &'a Program<Type>, output: W) -> Self {
        let functions = program
            .functions
            .iter()
            .map(|function| (function.name.as_str(), function))
            .collect();

        Self { functions, output }
    }

    /// Execute the program, starting at `main`.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        let Some(main) = self.functions.get("main").copied() else {
            return Err(RuntimeError::NoEntryFunction);
        };

        self.call(main, vec![])?;
        Ok(())
    }

    fn call(
        &mut self,
        function: &'a FunctionDef<Type>,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let mut frame = Frame::default();

        for (param, value) in function.params.iter().zip(args) {
            frame.values.insert(param.name.clone(), value);
        }
        for decl in &function.decls {
            frame.values.insert(decl.name.clone(), Value::Unset);
        }

        for statement in &function.statements {
            if let Some(value) = self.run_statement(statement, &mut frame)? {
                return Ok(value);
            }
        }

        // a function that never executes a `return` yields no value
        Ok(Value::Unset)
    }

    /// Execute a single statement. `Some(value)` means a `return` was hit
    /// and `value` must propagate out of the enclosing function.
    fn run_statement(
        &mut self,
        statement: &'a Statement<Type>,
        frame: &mut Frame,
    ) -> Result<Option<Value>, RuntimeError> {
        match statement {
            Statement::Assignment(assignment) => {
                let value = self.eval(&assignment.value, frame)?;
                frame.values.insert(assignment.ident.name.clone(), value);
                Ok(None)
            }
            Statement::If(if_stmt) => {
                let Value::Bool(condition) = self.eval(&if_stmt.condition, frame)? else {
                    return Err(RuntimeError::NonBooleanCondition { line: if_stmt.line });
                };

                if condition {
                    self.run_statement(&if_stmt.then_branch, frame)
                } else if let Some(else_branch) = &if_stmt.else_branch {
                    self.run_statement(else_branch, frame)
                } else {
                    Ok(None)
                }
            }
            Statement::While(while_stmt) => {
                loop {
                    let Value::Bool(condition) = self.eval(&while_stmt.condition, frame)? else {
                        return Err(RuntimeError::NonBooleanCondition {
                            line: while_stmt.line,
                        });
                    };
                    if !condition {
                        break;
                    }

                    if let Some(value) = self.run_statement(&while_stmt.body, frame)? {
                        return Ok(Some(value));
                    }
                }

                Ok(None)
            }
            Statement::Return(ret) => Ok(Some(self.eval(&ret.value, frame)?)),
            Statement::Print(print) => {
                for arg in &print.args {
                    let value = self.eval(arg, frame)?;
                    writeln!(self.output, "{value}").map_err(|err| RuntimeError::Output {
                        message: err.to_string(),
                    })?;
                }
                Ok(None)
            }
            Statement::Block(block) => {
                for statement in &block.statements {
                    if let Some(value) = self.run_statement(statement, frame)? {
                        return Ok(Some(value));
                    }
                }
                Ok(None)
            }
        }
    }

    fn eval(
        &mut self,
        expression: &'a Expression<Type>,
        frame: &mut Frame,
    ) -> Result<Value, RuntimeError> {
        match expression {
            Expression::IntLit(lit) => Ok(Value::Int(lit.value)),
            Expression::FloatLit(lit) => Ok(Value::Float(lit.value)),
            Expression::BoolLit(lit) => Ok(Value::Bool(lit.value)),
            Expression::StringLit(lit) => Ok(Value::Str(lit.value.clone())),
            Expression::Ident(ident) => match frame.values.get(&ident.name) {
                Some(Value::Unset) | None => Err(RuntimeError::UnassignedVariable {
                    name: ident.name.clone(),
                    line: ident.line,
                }),
                Some(value) => Ok(value.clone()),
            },
            Expression::Unary(unary) => {
                let inner = self.eval(&unary.inner, frame)?;
                match (unary.operator, inner) {
                    (UnaryOperator::Minus, Value::Int(value)) => Ok(Value::Int(-value)),
                    (UnaryOperator::Minus, Value::Float(value)) => Ok(Value::Float(-value)),
                    (UnaryOperator::Not, Value::Bool(value)) => Ok(Value::Bool(!value)),
                    _ => Err(RuntimeError::InvalidOperands {
                        operator: unary.operator.as_str().to_string(),
                        line: unary.line,
                    }),
                }
            }
            Expression::Binary(binary) => {
                // strict left-first evaluation; logical operators do not
                // short-circuit
                let left = self.eval(&binary.left, frame)?;
                let right = self.eval(&binary.right, frame)?;
                apply_binary(binary.operator, left, right, binary.line)
            }
            Expression::Call(call) => {
                let mut args = vec![];
                for arg in &call.args {
                    args.push(self.eval(arg, frame)?);
                }

                let Some(function) = self.functions.get(call.name.as_str()).copied() else {
                    return Err(RuntimeError::UnknownFunction {
                        name: call.name.clone(),
                        line: call.line,
                    });
                };

                self.call(function, args)
            }
        }
    }
}

fn apply_binary(
    operator: BinaryOperator,
    left: Value,
    right: Value,
    line: usize,
) -> Result<Value, RuntimeError> {
    use BinaryOperator::*;

    match operator {
        Add | Subtract | Multiply | Divide | Modulo => {
            apply_arithmetic(operator, left, right, line)
        }
        LessThan | LessOrEqual | GreaterThan | GreaterOrEqual => {
            apply_comparison(operator, left, right, line)
        }
        Equal | NotEqual => apply_equality(operator, left, right, line),
        And | Or => match (left, right) {
            (Value::Bool(left), Value::Bool(right)) => Ok(Value::Bool(match operator {
                And => left && right,
                _ => left || right,
            })),
            _ => Err(invalid_operands(operator, line)),
        },
    }
}

/// Int stays int (`7 / 2` is `3`); one float operand promotes the result
/// to float.
fn apply_arithmetic(
    operator: BinaryOperator,
    left: Value,
    right: Value,
    line: usize,
) -> Result<Value, RuntimeError> {
    use BinaryOperator::*;

    match (&left, &right) {
        (Value::Int(left), Value::Int(right)) => {
            let value = match operator {
                Add => left + right,
                Subtract => left - right,
                Multiply => left * right,
                Divide | Modulo => {
                    if *right == 0 {
                        return Err(RuntimeError::DivisionByZero { line });
                    }
                    // i64::MIN / -1 wraps rather than aborting
                    if operator == Divide {
                        left.wrapping_div(*right)
                    } else {
                        left.wrapping_rem(*right)
                    }
                }
                _ => return Err(invalid_operands(operator, line)),
            };
            Ok(Value::Int(value))
        }
        _ => {
            let (Some(left), Some(right)) = (left.as_f64(), right.as_f64()) else {
                return Err(invalid_operands(operator, line));
            };

            let value = match operator {
                Add => left + right,
                Subtract => left - right,
                Multiply => left * right,
                Divide | Modulo => {
                    if right == 0.0 {
                        return Err(RuntimeError::DivisionByZero { line });
                    }
                    if operator == Divide {
                        left / right
                    } else {
                        left % right
                    }
                }
                _ => return Err(invalid_operands(operator, line)),
            };
            Ok(Value::Float(value))
        }
    }
}

fn apply_comparison(
    operator: BinaryOperator,
    left: Value,
    right: Value,
    line: usize,
) -> Result<Value, RuntimeError> {
    use BinaryOperator::*;

    let result = match (&left, &right) {
        (Value::Int(left), Value::Int(right)) => match operator {
            LessThan => left < right,
            LessOrEqual => left <= right,
            GreaterThan => left > right,
            GreaterOrEqual => left >= right,
            _ => return Err(invalid_operands(operator, line)),
        },
        _ => {
            let (Some(left), Some(right)) = (left.as_f64(), right.as_f64()) else {
                return Err(invalid_operands(operator, line));
            };
            match operator {
                LessThan => left < right,
                LessOrEqual => left <= right,
                GreaterThan => left > right,
                GreaterOrEqual => left >= right,
                _ => return Err(invalid_operands(operator, line)),
            }
        }
    };

    Ok(Value::Bool(result))
}

fn apply_equality(
    operator: BinaryOperator,
    left: Value,
    right: Value,
    line: usize,
) -> Result<Value, RuntimeError> {
    let equal = match (&left, &right) {
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::Int(left), Value::Int(right)) => left == right,
        _ => {
            let (Some(left), Some(right)) = (left.as_f64(), right.as_f64()) else {
                return Err(invalid_operands(operator, line));
            };
            left == right
        }
    };

    Ok(Value::Bool(match operator {
        BinaryOperator::NotEqual => !equal,
        _ => equal,
    }))
}

fn invalid_operands(operator: BinaryOperator, line: usize) -> RuntimeError {
    RuntimeError::InvalidOperands {
        operator: operator.as_str().to_string(),
        line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use crate::typechecker::TypeChecker;

    fn run_source(input: &str) -> Result<String, RuntimeError> {
        let tokens = Lexer::new(input).lex().expect("input should lex");
        let program = Parser::new(tokens).parse().expect("input should parse");
        let program = TypeChecker::new(program)
            .check()
            .expect("input should type check");

        let mut output = Vec::new();
        Interpreter::with_output(&program, &mut output).run()?;

        Ok(String::from_utf8(output).expect("interpreter output should be UTF-8"))
    }

    #[test]
    fn test_arithmetic_precedence() {
        assert_eq!(
            Ok("7\n".to_string()),
            run_source("int main() { print(1 + 2 * 3); return 0; }")
        );
    }

    #[test]
    fn test_countdown_loop() {
        assert_eq!(
            Ok("5\n4\n3\n2\n1\n".to_string()),
            run_source(
                "int main() { int a; a = 5; while (a > 0) { print(a); a = a - 1; } return 0; }"
            )
        );
    }

    #[test]
    fn test_function_call() {
        assert_eq!(
            Ok("7\n".to_string()),
            run_source(
                "int add(int x, int y) { return x + y; } int main() { print(add(3, 4)); return 0; }"
            )
        );
    }

    #[test]
    fn test_if_else_prints_string_without_quotes() {
        assert_eq!(
            Ok("hi\n".to_string()),
            run_source("int main() { if (true) print(\"hi\"); else print(\"bye\"); return 0; }")
        );
    }

    #[test]
    fn test_scientific_float() {
        assert_eq!(
            Ok("150.0\n".to_string()),
            run_source("int main() { float f; f = 1.5e2; print(f); return 0; }")
        );
    }

    #[test]
    fn test_int_division_truncates() {
        assert_eq!(
            Ok("3\n".to_string()),
            run_source("int main() { print(7 / 2); return 0; }")
        );
    }

    #[test]
    fn test_float_operand_promotes_division() {
        assert_eq!(
            Ok("3.5\n".to_string()),
            run_source("int main() { print(7 / 2.0); return 0; }")
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            Err(RuntimeError::DivisionByZero { line: 1 }),
            run_source("int main() { print(1 / 0); return 0; }")
        );
    }

    #[test]
    fn test_modulo_by_zero() {
        assert_eq!(
            Err(RuntimeError::DivisionByZero { line: 1 }),
            run_source("int main() { print(1 % 0); return 0; }")
        );
    }

    #[test]
    fn test_unassigned_variable_read() {
        assert_eq!(
            Err(RuntimeError::UnassignedVariable {
                name: "a".to_string(),
                line: 1,
            }),
            run_source("int main() { int a; print(a); return 0; }")
        );
    }

    #[test]
    fn test_logical_operators_do_not_short_circuit() {
        // both calls must run even though the left operand decides the result
        assert_eq!(
            Ok("1\n2\n".to_string()),
            run_source(
                "int shout(int x) { print(x); return x; }\n\
                 int main() { bool b; b = shout(1) < 0 && shout(2) < 0; return 0; }"
            )
        );
    }

    #[test]
    fn test_return_skips_rest_of_function() {
        assert_eq!(
            Ok("1\n".to_string()),
            run_source("int main() { print(1); return 0; print(2); }")
        );
    }

    #[test]
    fn test_return_exits_loop() {
        assert_eq!(
            Ok("10\n".to_string()),
            run_source(
                "int first(int n) { while (true) { return n; } return 0; }\n\
                 int main() { print(first(10)); return 0; }"
            )
        );
    }

    #[test]
    fn test_callee_locals_do_not_leak() {
        assert_eq!(
            Ok("1\n".to_string()),
            run_source(
                "int poke(int x) { int a; a = 99; return x; }\n\
                 int main() { int a; int b; a = 1; b = poke(5); print(a); return 0; }"
            )
        );
    }

    #[test]
    fn test_recursion() {
        assert_eq!(
            Ok("55\n".to_string()),
            run_source(
                "int fib(int n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); }\n\
                 int main() { print(fib(10)); return 0; }"
            )
        );
    }

    #[test]
    fn test_bool_prints_as_keyword() {
        assert_eq!(
            Ok("true\nfalse\n".to_string()),
            run_source("int main() { print(true, 1 > 2); return 0; }")
        );
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(
            Ok("-5\ntrue\n".to_string()),
            run_source("int main() { print(-5, !false); return 0; }")
        );
    }

    #[test]
    fn test_each_print_arg_on_its_own_line() {
        assert_eq!(
            Ok("1\n2\n3\n".to_string()),
            run_source("int main() { print(1, 2, 3); return 0; }")
        );
    }

    #[test]
    fn test_nested_if_in_while() {
        assert_eq!(
            Ok("2\n4\n".to_string()),
            run_source(
                "int main() {\n\
                     int a;\n\
                     a = 0;\n\
                     while (a < 5) {\n\
                         if (a % 2 == 0 && a > 0) print(a);\n\
                         a = a + 1;\n\
                     }\n\
                     return 0;\n\
                 }"
            )
        );
    }

    #[test]
    fn test_int_variable_may_hold_float_value() {
        // int <-> float assignment is implicit; the value is stored as-is
        assert_eq!(
            Ok("1.5\n".to_string()),
            run_source("int main() { int a; a = 1.5; print(a); return 0; }")
        );
    }
}
