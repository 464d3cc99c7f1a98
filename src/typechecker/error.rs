use std::{error::Error, fmt::Display};

use crate::parser::ast::{BinaryOperator, UnaryOperator};

use super::types::Type;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TypeCheckError {
    InvalidOperands {
        operator: BinaryOperator,
        left: Type,
        right: Type,
        line: usize,
    },
    InvalidUnaryOperand {
        operator: UnaryOperator,
        actual: Type,
        line: usize,
    },
    AssignmentMismatch {
        name: String,
        expected: Type,
        actual: Type,
        line: usize,
    },
    ReturnMismatch {
        function: String,
        expected: Type,
        actual: Type,
        line: usize,
    },
    ArgumentMismatch {
        function: String,
        expected: Type,
        actual: Type,
        line: usize,
    },
    ArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
        line: usize,
    },
    NonBooleanCondition {
        actual: Type,
        line: usize,
    },
    UndefinedVariable {
        name: String,
        line: usize,
    },
    UndefinedFunction {
        name: String,
        line: usize,
    },
    MissingMainFunction,
    InvalidMainSignature {
        line: usize,
    },
}

pub type TypeResult<T> = Result<T, TypeCheckError>;

impl Display for TypeCheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeCheckError::InvalidOperands {
                operator,
                left,
                right,
                line,
            } => write!(
                f,
                "ERROR: Invalid operands of type {left} and {right} for '{operator}' on line {line}"
            ),
            TypeCheckError::InvalidUnaryOperand {
                operator,
                actual,
                line,
            } => write!(
                f,
                "ERROR: Invalid operand of type {actual} for '{operator}' on line {line}"
            ),
            TypeCheckError::AssignmentMismatch {
                name,
                expected,
                actual,
                line,
            } => write!(
                f,
                "ERROR: Cannot assign {actual} to '{name}' of type {expected} on line {line}"
            ),
            TypeCheckError::ReturnMismatch {
                function,
                expected,
                actual,
                line,
            } => write!(
                f,
                "ERROR: '{function}' returns {expected} but the return value has type {actual} on line {line}"
            ),
            TypeCheckError::ArgumentMismatch {
                function,
                expected,
                actual,
                line,
            } => write!(
                f,
                "ERROR: '{function}' expects an argument of type {expected} but got {actual} on line {line}"
            ),
            TypeCheckError::ArgumentCount {
                function,
                expected,
                actual,
                line,
            } => write!(
                f,
                "ERROR: '{function}' takes {expected} arguments but got {actual} on line {line}"
            ),
            TypeCheckError::NonBooleanCondition { actual, line } => write!(
                f,
                "ERROR: Condition must be bool but has type {actual} on line {line}"
            ),
            TypeCheckError::UndefinedVariable { name, line } => {
                write!(f, "ERROR: Undefined variable '{name}' on line {line}")
            }
            TypeCheckError::UndefinedFunction { name, line } => {
                write!(f, "ERROR: Undefined function '{name}' on line {line}")
            }
            TypeCheckError::MissingMainFunction => {
                write!(f, "ERROR: Program has no 'main' function")
            }
            TypeCheckError::InvalidMainSignature { line } => {
                write!(f, "ERROR: 'main' must not take parameters on line {line}")
            }
        }
    }
}

impl Error for TypeCheckError {}
