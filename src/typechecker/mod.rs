//! Type checking for SLU-C.
//!
//! The checker runs as its own pass between parsing and evaluation, so a
//! type error is reported before the program gets a chance to produce any
//! output. It transforms `Program<()>` into `Program<Type>`, attaching the
//! inferred semantic type to every expression.
//!
//! Checking happens in three stages: a shallow pass registers every
//! function signature (the function list is reordered so `main` comes
//! first, which means `main` is checked before the helpers it calls), a
//! deep pass checks each function body, and a final pass validates the
//! entry function.

mod context;
mod error;
mod scope;
mod types;

pub use self::error::{TypeCheckError, TypeResult};
pub use self::scope::{Scope, Signature};
pub use self::types::Type;

use crate::parser::ast::{
    Assignment, BinaryExpression, BinaryOperator, Block, BoolLit, CallExpression, Expression,
    FloatLit, FunctionDef, Ident, If, IntLit, Print, Program, Return, Statement, StringLit,
    UnaryExpression, UnaryOperator, While,
};

use self::context::{Context, CurrentFunction};

trait TypeCheckable {
    type Typed;

    fn check(self, ctx: &mut Context) -> TypeResult<Self::Typed>;
}

#[derive(Debug, Clone)]
pub struct TypeChecker {
    program: Program<()>,
    context: Context,
}

impl TypeChecker {
    pub fn new(program: Program<()>) -> TypeChecker {
        TypeChecker {
            program,
            context: Context::default(),
        }
    }

    /// Register every function signature before any body is checked.
    fn shallow_check(&mut self) {
        for function in &self.program.functions {
            self.context.scope.add_function(
                &function.name,
                Signature {
                    params: function
                        .params
                        .iter()
                        .map(|param| param.type_name.into())
                        .collect(),
                    return_type: function.return_type.into(),
                },
            );
        }
    }

    pub fn check(mut self) -> TypeResult<Program<Type>> {
        self.shallow_check();

        let functions = std::mem::take(&mut self.program.functions);

        let mut checked = vec![];
        for function in functions {
            checked.push(function.check(&mut self.context)?);
        }

        self.check_main_function(&checked)?;

        Ok(Program { functions: checked })
    }

    fn check_main_function(&self, functions: &[FunctionDef<Type>]) -> TypeResult<()> {
        let Some(main) = functions.iter().find(|function| function.name == "main") else {
            return Err(TypeCheckError::MissingMainFunction);
        };

        if !main.params.is_empty() {
            return Err(TypeCheckError::InvalidMainSignature { line: main.line });
        }

        Ok(())
    }
}

impl TypeCheckable for FunctionDef<()> {
    type Typed = FunctionDef<Type>;

    fn check(self, ctx: &mut Context) -> TypeResult<Self::Typed> {
        let FunctionDef {
            return_type,
            name,
            params,
            decls,
            statements,
            line,
        } = self;

        ctx.scope.enter_function();
        for param in &params {
            ctx.scope.add_variable(&param.name, param.type_name.into());
        }
        for decl in &decls {
            ctx.scope.add_variable(&decl.name, decl.type_name.into());
        }
        ctx.current_function = Some(CurrentFunction {
            name: name.clone(),
            return_type: return_type.into(),
        });

        let statements = statements
            .into_iter()
            .map(|statement| statement.check(ctx))
            .collect::<TypeResult<Vec<_>>>()?;

        Ok(FunctionDef {
            return_type,
            name,
            params,
            decls,
            statements,
            line,
        })
    }
}

impl TypeCheckable for Statement<()> {
    type Typed = Statement<Type>;

    fn check(self, ctx: &mut Context) -> TypeResult<Self::Typed> {
        match self {
            Statement::Assignment(assignment) => {
                let Assignment { ident, value, line } = assignment;

                let value = value.check(ctx)?;
                let Some(expected) = ctx.scope.resolve_variable(&ident.name) else {
                    return Err(TypeCheckError::UndefinedVariable {
                        name: ident.name,
                        line,
                    });
                };

                let actual = value.get_info();
                if !actual.is_assignable_to(expected) {
                    return Err(TypeCheckError::AssignmentMismatch {
                        name: ident.name,
                        expected,
                        actual,
                        line,
                    });
                }

                Ok(Statement::Assignment(Assignment {
                    ident: Ident {
                        name: ident.name,
                        info: expected,
                        line: ident.line,
                    },
                    value,
                    line,
                }))
            }
            Statement::If(if_stmt) => {
                let If {
                    condition,
                    then_branch,
                    else_branch,
                    line,
                } = *if_stmt;

                let condition = condition.check(ctx)?;
                if condition.get_info() != Type::Boolean {
                    return Err(TypeCheckError::NonBooleanCondition {
                        actual: condition.get_info(),
                        line,
                    });
                }

                let then_branch = then_branch.check(ctx)?;
                let else_branch = else_branch
                    .map(|else_branch| else_branch.check(ctx))
                    .transpose()?;

                Ok(Statement::If(Box::new(If {
                    condition,
                    then_branch,
                    else_branch,
                    line,
                })))
            }
            Statement::While(while_stmt) => {
                let While {
                    condition,
                    body,
                    line,
                } = *while_stmt;

                let condition = condition.check(ctx)?;
                if condition.get_info() != Type::Boolean {
                    return Err(TypeCheckError::NonBooleanCondition {
                        actual: condition.get_info(),
                        line,
                    });
                }

                let body = body.check(ctx)?;

                Ok(Statement::While(Box::new(While {
                    condition,
                    body,
                    line,
                })))
            }
            Statement::Return(ret) => {
                let Return { value, line } = ret;

                let value = value.check(ctx)?;
                let Some(current) = ctx.current_function.clone() else {
                    unreachable!("return statement outside of a function");
                };

                let actual = value.get_info();
                if !actual.is_assignable_to(current.return_type) {
                    return Err(TypeCheckError::ReturnMismatch {
                        function: current.name,
                        expected: current.return_type,
                        actual,
                        line,
                    });
                }

                Ok(Statement::Return(Return { value, line }))
            }
            Statement::Print(print) => {
                let Print { args, line } = print;

                let args = args
                    .into_iter()
                    .map(|arg| arg.check(ctx))
                    .collect::<TypeResult<Vec<_>>>()?;

                Ok(Statement::Print(Print { args, line }))
            }
            Statement::Block(block) => {
                let Block { statements, line } = block;

                let statements = statements
                    .into_iter()
                    .map(|statement| statement.check(ctx))
                    .collect::<TypeResult<Vec<_>>>()?;

                Ok(Statement::Block(Block { statements, line }))
            }
        }
    }
}

impl TypeCheckable for Expression<()> {
    type Typed = Expression<Type>;

    fn check(self, ctx: &mut Context) -> TypeResult<Self::Typed> {
        match self {
            Expression::IntLit(IntLit { value, line, .. }) => Ok(Expression::IntLit(IntLit {
                value,
                info: Type::Integer,
                line,
            })),
            Expression::FloatLit(FloatLit { value, line, .. }) => {
                Ok(Expression::FloatLit(FloatLit {
                    value,
                    info: Type::Float,
                    line,
                }))
            }
            Expression::BoolLit(BoolLit { value, line, .. }) => Ok(Expression::BoolLit(BoolLit {
                value,
                info: Type::Boolean,
                line,
            })),
            Expression::StringLit(StringLit { value, line, .. }) => {
                Ok(Expression::StringLit(StringLit {
                    value,
                    info: Type::String,
                    line,
                }))
            }
            Expression::Ident(Ident { name, line, .. }) => {
                let Some(type_id) = ctx.scope.resolve_variable(&name) else {
                    return Err(TypeCheckError::UndefinedVariable { name, line });
                };

                Ok(Expression::Ident(Ident {
                    name,
                    info: type_id,
                    line,
                }))
            }
            Expression::Unary(unary) => {
                let UnaryExpression {
                    operator,
                    inner,
                    line,
                    ..
                } = *unary;

                let inner = inner.check(ctx)?;
                let actual = inner.get_info();
                let info = match operator {
                    UnaryOperator::Minus if actual.is_numeric() => actual,
                    UnaryOperator::Not if actual == Type::Boolean => Type::Boolean,
                    _ => {
                        return Err(TypeCheckError::InvalidUnaryOperand {
                            operator,
                            actual,
                            line,
                        })
                    }
                };

                Ok(Expression::Unary(Box::new(UnaryExpression {
                    operator,
                    inner,
                    info,
                    line,
                })))
            }
            Expression::Binary(binary) => {
                let BinaryExpression {
                    operator,
                    left,
                    right,
                    line,
                    ..
                } = *binary;

                let left = left.check(ctx)?;
                let right = right.check(ctx)?;
                let info =
                    binary_result_type(operator, left.get_info(), right.get_info(), line)?;

                Ok(Expression::Binary(Box::new(BinaryExpression {
                    operator,
                    left,
                    right,
                    info,
                    line,
                })))
            }
            Expression::Call(call) => {
                let CallExpression {
                    name, args, line, ..
                } = call;

                let Some(signature) = ctx.scope.resolve_function(&name).cloned() else {
                    return Err(TypeCheckError::UndefinedFunction { name, line });
                };

                if signature.params.len() != args.len() {
                    return Err(TypeCheckError::ArgumentCount {
                        function: name,
                        expected: signature.params.len(),
                        actual: args.len(),
                        line,
                    });
                }

                let mut checked_args = vec![];
                for (arg, expected) in args.into_iter().zip(signature.params.iter().copied()) {
                    let arg = arg.check(ctx)?;
                    let actual = arg.get_info();
                    if !actual.is_assignable_to(expected) {
                        return Err(TypeCheckError::ArgumentMismatch {
                            function: name.clone(),
                            expected,
                            actual,
                            line: arg.line(),
                        });
                    }
                    checked_args.push(arg);
                }

                Ok(Expression::Call(CallExpression {
                    name,
                    args: checked_args,
                    info: signature.return_type,
                    line,
                }))
            }
        }
    }
}

/// The operator typing table, as a single exhaustive match.
fn binary_result_type(
    operator: BinaryOperator,
    left: Type,
    right: Type,
    line: usize,
) -> TypeResult<Type> {
    use BinaryOperator::*;

    let result = match operator {
        Add | Subtract | Multiply | Divide | Modulo => {
            if left.is_numeric() && right.is_numeric() {
                if left == Type::Float || right == Type::Float {
                    Some(Type::Float)
                } else {
                    Some(Type::Integer)
                }
            } else {
                None
            }
        }
        LessThan | LessOrEqual | GreaterThan | GreaterOrEqual => {
            (left.is_numeric() && right.is_numeric()).then_some(Type::Boolean)
        }
        Equal | NotEqual => (left.is_numeric() && right.is_numeric()
            || left == Type::Boolean && right == Type::Boolean)
            .then_some(Type::Boolean),
        And | Or => (left == Type::Boolean && right == Type::Boolean).then_some(Type::Boolean),
    };

    result.ok_or(TypeCheckError::InvalidOperands {
        operator,
        left,
        right,
        line,
    })
}
