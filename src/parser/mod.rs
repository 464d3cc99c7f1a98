//! Recursive descent parser for SLU-C.
//!
//! Each non-terminal of the grammar corresponds to one method on
//! [`Parser`]. While parsing, the parser keeps two symbol tables: a
//! per-function table of declared names (parameters plus locals, used for
//! duplicate-declaration and reference-before-assignment checks) and a
//! global function signature table that makes call sites recognizable and
//! lets the type checker resolve calls later.

pub mod ast;
mod stream;

pub use self::stream::*;

use std::{collections::HashMap, error::Error, fmt::Display};

use crate::lexer::{Token, TokenKind};

use self::ast::{
    Assignment, BinaryExpression, BinaryOperator, Block, BoolLit, CallExpression, Declaration,
    Expression, FloatLit, FunctionDef, Ident, If, IntLit, Param, Print, Program, Return, Statement,
    StringLit, TypeName, UnaryExpression, UnaryOperator, While,
};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ParseError {
    Syntax { message: String, line: usize },
    InvalidType { line: usize },
    DuplicateReference { name: String, line: usize },
    ReferenceBeforeAssignment { name: String, line: usize },
}

pub type ParseResult<T> = Result<T, ParseError>;

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Syntax { message, line } => {
                write!(f, "ERROR: {message} on line {line}")
            }
            ParseError::InvalidType { line } => {
                write!(f, "ERROR: Invalid type on line {line}")
            }
            ParseError::DuplicateReference { name, line } => {
                write!(f, "ERROR: '{name}' on line {line} is already declared")
            }
            ParseError::ReferenceBeforeAssignment { name, line } => {
                write!(
                    f,
                    "ERROR: '{name}' is referenced before assignment on line {line}"
                )
            }
        }
    }
}

impl Error for ParseError {}

/// Parameter and return types of a parsed function, as recorded in the
/// signature table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FunctionSignature {
    pub params: Vec<TypeName>,
    pub return_type: TypeName,
}

type DeclTable = HashMap<String, TypeName>;

pub struct Parser {
    stream: TokenStream,
    signatures: HashMap<String, FunctionSignature>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            signatures: HashMap::new(),
        }
    }

    /// Parse a whole program. The function list is reordered afterwards so
    /// that `main` (if present) sits at index 0, the entry convention the
    /// interpreter relies on.
    pub fn parse(mut self) -> ParseResult<Program<()>> {
        let mut functions = vec![];

        while !self.stream.at(TokenKind::Eof) {
            functions.push(self.function_def()?);
        }

        if let Some(index) = functions.iter().position(|f| f.name == "main") {
            let main = functions.remove(index);
            functions.insert(0, main);
        }

        Ok(Program { functions })
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.stream.at(kind) {
            Ok(self.stream.next())
        } else {
            Err(ParseError::Syntax {
                message: message.to_string(),
                line: self.stream.peek().line,
            })
        }
    }

    /// The type the next token names, if it is a type keyword.
    fn peek_type_name(&self) -> Option<TypeName> {
        let token = self.stream.peek();
        if token.kind == TokenKind::Keyword {
            TypeName::from_keyword(&token.lexeme)
        } else {
            None
        }
    }

    fn type_name(&mut self) -> ParseResult<TypeName> {
        match self.peek_type_name() {
            Some(type_name) => {
                self.stream.next();
                Ok(type_name)
            }
            None => Err(ParseError::InvalidType {
                line: self.stream.peek().line,
            }),
        }
    }

    fn declare(
        decls: &mut DeclTable,
        name: &str,
        type_name: TypeName,
        line: usize,
    ) -> ParseResult<()> {
        if decls.insert(name.to_string(), type_name).is_some() {
            return Err(ParseError::DuplicateReference {
                name: name.to_string(),
                line,
            });
        }

        Ok(())
    }

    /// Reference-before-assignment check: an identifier must name a local,
    /// a parameter, or a known function when it appears.
    fn check_known(&self, decls: &DeclTable, name: &str, line: usize) -> ParseResult<()> {
        if decls.contains_key(name) || self.signatures.contains_key(name) {
            Ok(())
        } else {
            Err(ParseError::ReferenceBeforeAssignment {
                name: name.to_string(),
                line,
            })
        }
    }

    fn function_def(&mut self) -> ParseResult<FunctionDef<()>> {
        let return_type = self.type_name()?;

        let name_token = self.stream.peek().clone();
        let name = match name_token.kind {
            TokenKind::Id => self.stream.next().lexeme,
            // `main` lexes as a keyword but still names the entry function
            TokenKind::Keyword if name_token.lexeme == "main" => self.stream.next().lexeme,
            _ => {
                return Err(ParseError::Syntax {
                    message: "Missing function name".to_string(),
                    line: name_token.line,
                })
            }
        };

        let mut decl_table = DeclTable::new();

        self.expect(TokenKind::LParen, "Missing left parenthesis")?;
        let params = self.params(&mut decl_table)?;
        self.expect(TokenKind::RParen, "Missing right parenthesis")?;

        // the signature is visible from here on, so the body may call the
        // function recursively
        self.signatures.insert(
            name.clone(),
            FunctionSignature {
                params: params.iter().map(|param| param.type_name).collect(),
                return_type,
            },
        );

        self.expect(TokenKind::LBrace, "Missing left brace")?;
        let decls = self.declarations(&mut decl_table)?;
        let statements = self.statements(&decl_table)?;
        self.expect(TokenKind::RBrace, "Missing right brace")?;

        Ok(FunctionDef {
            return_type,
            name,
            params,
            decls,
            statements,
            line: name_token.line,
        })
    }

    fn params(&mut self, decls: &mut DeclTable) -> ParseResult<Vec<Param>> {
        let mut params = vec![];

        if self.peek_type_name().is_none() {
            return Ok(params);
        }

        loop {
            let type_name = self.type_name()?;
            let token = self.expect(TokenKind::Id, "Missing parameter name")?;
            Self::declare(decls, &token.lexeme, type_name, token.line)?;
            params.push(Param {
                type_name,
                name: token.lexeme,
                line: token.line,
            });

            if self.stream.at(TokenKind::Comma) {
                self.stream.next();
            } else {
                break;
            }
        }

        Ok(params)
    }

    fn declarations(&mut self, decls: &mut DeclTable) -> ParseResult<Vec<Declaration>> {
        let mut declarations = vec![];

        while self.peek_type_name().is_some() {
            let type_name = self.type_name()?;
            let token = self.expect(TokenKind::Id, "Missing declaration name")?;
            Self::declare(decls, &token.lexeme, type_name, token.line)?;
            self.expect(TokenKind::Semicolon, "Missing semicolon")?;
            declarations.push(Declaration {
                type_name,
                name: token.lexeme,
                line: token.line,
            });
        }

        Ok(declarations)
    }

    fn statements(&mut self, decls: &DeclTable) -> ParseResult<Vec<Statement<()>>> {
        let mut statements = vec![];

        loop {
            let token = self.stream.peek();
            let starts_statement = match token.kind {
                TokenKind::Semicolon | TokenKind::LBrace | TokenKind::Id => true,
                TokenKind::Keyword => {
                    // declarations cannot follow statements
                    if TypeName::from_keyword(&token.lexeme).is_some() || token.lexeme == "char" {
                        return Err(ParseError::InvalidType { line: token.line });
                    }
                    matches!(token.lexeme.as_str(), "print" | "return" | "if" | "while")
                }
                _ => false,
            };

            if !starts_statement {
                break;
            }

            statements.push(self.statement(decls)?);
        }

        Ok(statements)
    }

    fn statement(&mut self, decls: &DeclTable) -> ParseResult<Statement<()>> {
        let token = self.stream.peek().clone();
        match token.kind {
            TokenKind::Semicolon => {
                self.stream.next();
                Ok(Statement::Block(Block {
                    statements: vec![],
                    line: token.line,
                }))
            }
            TokenKind::LBrace => self.block(decls),
            TokenKind::Id => self.assignment(decls),
            TokenKind::Keyword => match token.lexeme.as_str() {
                "print" => self.print_stmt(decls),
                "return" => self.return_stmt(decls),
                "if" => self.if_stmt(decls),
                "while" => self.while_stmt(decls),
                "int" | "float" | "bool" | "char" => {
                    Err(ParseError::InvalidType { line: token.line })
                }
                _ => Err(ParseError::Syntax {
                    message: format!("Unexpected token '{}'", token.lexeme),
                    line: token.line,
                }),
            },
            _ => Err(ParseError::Syntax {
                message: format!("Unexpected token '{}'", token.lexeme),
                line: token.line,
            }),
        }
    }

    fn block(&mut self, decls: &DeclTable) -> ParseResult<Statement<()>> {
        let brace = self.expect(TokenKind::LBrace, "Missing left brace")?;
        let statements = self.statements(decls)?;
        self.expect(TokenKind::RBrace, "Missing right brace")?;

        Ok(Statement::Block(Block {
            statements,
            line: brace.line,
        }))
    }

    fn assignment(&mut self, decls: &DeclTable) -> ParseResult<Statement<()>> {
        let token = self.stream.next();
        self.check_known(decls, &token.lexeme, token.line)?;

        if !self.stream.at(TokenKind::Assignment) {
            return Err(ParseError::Syntax {
                message: "Invalid assignment statement".to_string(),
                line: self.stream.peek().line,
            });
        }
        self.stream.next();

        let value = self.expression(decls)?;
        self.expect(TokenKind::Semicolon, "Missing semicolon")?;

        Ok(Statement::Assignment(Assignment {
            ident: Ident {
                name: token.lexeme,
                info: (),
                line: token.line,
            },
            value,
            line: token.line,
        }))
    }

    fn if_stmt(&mut self, decls: &DeclTable) -> ParseResult<Statement<()>> {
        let keyword = self.stream.next();

        self.expect(TokenKind::LParen, "Missing left parenthesis")?;
        let condition = self.expression(decls)?;
        self.expect(TokenKind::RParen, "Missing right parenthesis")?;

        let then_branch = self.statement(decls)?;

        let else_branch = if self.stream.peek().is_keyword("else") {
            self.stream.next();
            Some(self.statement(decls)?)
        } else {
            None
        };

        Ok(Statement::If(Box::new(If {
            condition,
            then_branch,
            else_branch,
            line: keyword.line,
        })))
    }

    fn while_stmt(&mut self, decls: &DeclTable) -> ParseResult<Statement<()>> {
        let keyword = self.stream.next();

        self.expect(TokenKind::LParen, "Missing left parenthesis")?;
        let condition = self.expression(decls)?;
        self.expect(TokenKind::RParen, "Missing right parenthesis")?;

        let body = self.statement(decls)?;

        Ok(Statement::While(Box::new(While {
            condition,
            body,
            line: keyword.line,
        })))
    }

    fn return_stmt(&mut self, decls: &DeclTable) -> ParseResult<Statement<()>> {
        let keyword = self.stream.next();

        let value = self.expression(decls)?;
        self.expect(TokenKind::Semicolon, "Missing semicolon")?;

        Ok(Statement::Return(Return {
            value,
            line: keyword.line,
        }))
    }

    fn print_stmt(&mut self, decls: &DeclTable) -> ParseResult<Statement<()>> {
        let keyword = self.stream.next();

        self.expect(TokenKind::LParen, "Missing left parenthesis")?;

        let mut args = vec![self.print_arg(decls)?];
        while self.stream.at(TokenKind::Comma) {
            self.stream.next();
            args.push(self.print_arg(decls)?);
        }

        self.expect(TokenKind::RParen, "Missing right parenthesis")?;
        self.expect(TokenKind::Semicolon, "Missing semicolon")?;

        Ok(Statement::Print(Print {
            args,
            line: keyword.line,
        }))
    }

    /// PrintArg → Expression | stringlit. String literals only exist as
    /// print arguments, so they are handled here instead of in `primary`.
    fn print_arg(&mut self, decls: &DeclTable) -> ParseResult<Expression<()>> {
        let token = self.stream.peek().clone();
        if token.kind == TokenKind::StringLit {
            self.stream.next();
            let value = token.lexeme[1..token.lexeme.len() - 1].to_string();
            return Ok(Expression::StringLit(StringLit {
                value,
                info: (),
                line: token.line,
            }));
        }

        self.expression(decls)
    }

    fn binary(
        operator: BinaryOperator,
        left: Expression<()>,
        right: Expression<()>,
        line: usize,
    ) -> Expression<()> {
        Expression::Binary(Box::new(BinaryExpression {
            operator,
            left,
            right,
            info: (),
            line,
        }))
    }

    fn expression(&mut self, decls: &DeclTable) -> ParseResult<Expression<()>> {
        let mut left = self.conjunction(decls)?;

        while self.stream.at(TokenKind::Or) {
            let line = self.stream.next().line;
            let right = self.conjunction(decls)?;
            left = Self::binary(BinaryOperator::Or, left, right, line);
        }

        Ok(left)
    }

    fn conjunction(&mut self, decls: &DeclTable) -> ParseResult<Expression<()>> {
        let mut left = self.equality(decls)?;

        while self.stream.at(TokenKind::And) {
            let line = self.stream.next().line;
            let right = self.equality(decls)?;
            left = Self::binary(BinaryOperator::And, left, right, line);
        }

        Ok(left)
    }

    /// Equality is non-associative: at most one operator is consumed.
    fn equality(&mut self, decls: &DeclTable) -> ParseResult<Expression<()>> {
        let left = self.relation(decls)?;

        let operator = match self.stream.peek().kind {
            TokenKind::Equality => BinaryOperator::Equal,
            TokenKind::NotEqual => BinaryOperator::NotEqual,
            _ => return Ok(left),
        };

        let line = self.stream.next().line;
        let right = self.relation(decls)?;
        Ok(Self::binary(operator, left, right, line))
    }

    /// Relation is non-associative: at most one operator is consumed.
    fn relation(&mut self, decls: &DeclTable) -> ParseResult<Expression<()>> {
        let left = self.addition(decls)?;

        let operator = match self.stream.peek().kind {
            TokenKind::LessThan => BinaryOperator::LessThan,
            TokenKind::LessThanEqual => BinaryOperator::LessOrEqual,
            TokenKind::GreaterThan => BinaryOperator::GreaterThan,
            TokenKind::GreaterThanEqual => BinaryOperator::GreaterOrEqual,
            _ => return Ok(left),
        };

        let line = self.stream.next().line;
        let right = self.addition(decls)?;
        Ok(Self::binary(operator, left, right, line))
    }

    fn addition(&mut self, decls: &DeclTable) -> ParseResult<Expression<()>> {
        let mut left = self.term(decls)?;

        loop {
            let operator = match self.stream.peek().kind {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            let line = self.stream.next().line;
            let right = self.term(decls)?;
            left = Self::binary(operator, left, right, line);
        }

        Ok(left)
    }

    fn term(&mut self, decls: &DeclTable) -> ParseResult<Expression<()>> {
        let mut left = self.factor(decls)?;

        loop {
            let operator = match self.stream.peek().kind {
                TokenKind::Mult => BinaryOperator::Multiply,
                TokenKind::Divide => BinaryOperator::Divide,
                TokenKind::Mod => BinaryOperator::Modulo,
                _ => break,
            };

            let line = self.stream.next().line;
            let right = self.factor(decls)?;
            left = Self::binary(operator, left, right, line);
        }

        Ok(left)
    }

    fn factor(&mut self, decls: &DeclTable) -> ParseResult<Expression<()>> {
        let operator = match self.stream.peek().kind {
            TokenKind::Minus => Some(UnaryOperator::Minus),
            TokenKind::Not => Some(UnaryOperator::Not),
            _ => None,
        };

        let Some(operator) = operator else {
            return self.primary(decls);
        };

        let line = self.stream.next().line;
        let inner = self.primary(decls)?;

        Ok(Expression::Unary(Box::new(UnaryExpression {
            operator,
            inner,
            info: (),
            line,
        })))
    }

    fn primary(&mut self, decls: &DeclTable) -> ParseResult<Expression<()>> {
        let token = self.stream.peek().clone();

        match token.kind {
            TokenKind::LParen => {
                self.stream.next();
                let inner = self.expression(decls)?;
                self.expect(TokenKind::RParen, "Missing right parenthesis")?;
                Ok(inner)
            }
            TokenKind::IntLit => {
                self.stream.next();
                let value = token.lexeme.replace('_', "").parse::<i64>().map_err(|_| {
                    ParseError::Syntax {
                        message: format!("Invalid integer literal '{}'", token.lexeme),
                        line: token.line,
                    }
                })?;
                Ok(Expression::IntLit(IntLit {
                    value,
                    info: (),
                    line: token.line,
                }))
            }
            TokenKind::Float => {
                self.stream.next();
                let value = token.lexeme.replace('_', "").parse::<f64>().map_err(|_| {
                    ParseError::Syntax {
                        message: format!("Invalid float literal '{}'", token.lexeme),
                        line: token.line,
                    }
                })?;
                Ok(Expression::FloatLit(FloatLit {
                    value,
                    info: (),
                    line: token.line,
                }))
            }
            TokenKind::Keyword if token.lexeme == "true" || token.lexeme == "false" => {
                self.stream.next();
                Ok(Expression::BoolLit(BoolLit {
                    value: token.lexeme == "true",
                    info: (),
                    line: token.line,
                }))
            }
            TokenKind::Id => {
                self.stream.next();
                self.check_known(decls, &token.lexeme, token.line)?;

                // one token of lookahead distinguishes a call from a
                // plain identifier
                if self.stream.at(TokenKind::LParen) {
                    self.stream.next();
                    let args = self.call_args(decls)?;
                    Ok(Expression::Call(CallExpression {
                        name: token.lexeme,
                        args,
                        info: (),
                        line: token.line,
                    }))
                } else {
                    Ok(Expression::Ident(Ident {
                        name: token.lexeme,
                        info: (),
                        line: token.line,
                    }))
                }
            }
            _ => Err(ParseError::Syntax {
                message: format!("Unexpected token '{}'", token.lexeme),
                line: token.line,
            }),
        }
    }

    fn call_args(&mut self, decls: &DeclTable) -> ParseResult<Vec<Expression<()>>> {
        let mut args = vec![];

        if self.stream.at(TokenKind::RParen) {
            self.stream.next();
            return Ok(args);
        }

        loop {
            args.push(self.expression(decls)?);
            if self.stream.at(TokenKind::Comma) {
                self.stream.next();
            } else {
                break;
            }
        }

        self.expect(TokenKind::RParen, "Missing right parenthesis")?;
        Ok(args)
    }
}
