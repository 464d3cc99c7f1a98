use std::fmt::Display;

/// The closed set of token classifications. Operator and delimiter tokens
/// are identified by their kind alone; for `Keyword` tokens the lexeme
/// distinguishes which keyword was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TokenKind {
    Plus,
    Minus,
    Mult,
    Divide,
    Mod,
    Or,
    And,
    Equality,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    Assignment,
    Not,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
    IntLit,
    Float,
    StringLit,
    Id,
    Keyword,
    Eof,
}

/// A single lexeme together with its classification and the physical line
/// (starting at 1) it was read from.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Token {
    pub lexeme: String,
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, kind: TokenKind, line: usize) -> Token {
        Token {
            lexeme: lexeme.into(),
            kind,
            line,
        }
    }

    /// The end-of-input marker. Carries the number of the last physical
    /// line so diagnostics about unexpected EOF still point somewhere.
    pub fn eof(line: usize) -> Token {
        Token::new("EOF", TokenKind::Eof, line)
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme == keyword
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lexeme)
    }
}
