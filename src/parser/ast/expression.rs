use std::fmt::Display;

/// All binary operators of the expression grammar, in no particular order.
/// Precedence lives in the parser; evaluation and typing rules match on
/// these variants exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterOrEqual => ">=",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UnaryOperator {
    Minus,
    Not,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "!",
        }
    }
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expression, parameterized over the attached information: `()` after
/// parsing, the inferred semantic type after the type-check pass.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Expression<T> {
    Binary(Box<BinaryExpression<T>>),
    Unary(Box<UnaryExpression<T>>),
    IntLit(IntLit<T>),
    FloatLit(FloatLit<T>),
    BoolLit(BoolLit<T>),
    StringLit(StringLit<T>),
    Ident(Ident<T>),
    Call(CallExpression<T>),
}

impl<T> Expression<T>
where
    T: Clone,
{
    pub fn line(&self) -> usize {
        match self {
            Expression::Binary(inner) => inner.line,
            Expression::Unary(inner) => inner.line,
            Expression::IntLit(IntLit { line, .. })
            | Expression::FloatLit(FloatLit { line, .. })
            | Expression::BoolLit(BoolLit { line, .. })
            | Expression::StringLit(StringLit { line, .. })
            | Expression::Ident(Ident { line, .. })
            | Expression::Call(CallExpression { line, .. }) => *line,
        }
    }

    pub fn get_info(&self) -> T {
        match self {
            Expression::Binary(inner) => inner.info.clone(),
            Expression::Unary(inner) => inner.info.clone(),
            Expression::IntLit(IntLit { info, .. })
            | Expression::FloatLit(FloatLit { info, .. })
            | Expression::BoolLit(BoolLit { info, .. })
            | Expression::StringLit(StringLit { info, .. })
            | Expression::Ident(Ident { info, .. })
            | Expression::Call(CallExpression { info, .. }) => info.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BinaryExpression<T> {
    pub operator: BinaryOperator,
    pub left: Expression<T>,
    pub right: Expression<T>,
    pub info: T,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnaryExpression<T> {
    pub operator: UnaryOperator,
    pub inner: Expression<T>,
    pub info: T,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IntLit<T> {
    pub value: i64,
    pub info: T,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FloatLit<T> {
    pub value: f64,
    pub info: T,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoolLit<T> {
    pub value: bool,
    pub info: T,
    pub line: usize,
}

/// A string literal print argument. `value` holds the text without the
/// surrounding quotes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StringLit<T> {
    pub value: String,
    pub info: T,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ident<T> {
    pub name: String,
    pub info: T,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CallExpression<T> {
    pub name: String,
    pub args: Vec<Expression<T>>,
    pub info: T,
    pub line: usize,
}
