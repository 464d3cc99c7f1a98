//! Lexical analysis for SLU-C.
//!
//! The lexer walks the source line by line. A single compiled master
//! pattern matches everything that acts as a delimiter (whitespace,
//! comments, string literals, scientific-notation floats and the operator
//! set); the fragments left between matches are classified afterwards as
//! keywords, numeric literals or identifiers. Anything that survives
//! neither route is invalid syntax.

mod token;

pub use token::*;

use std::{error::Error, fmt::Display};

use once_cell::sync::Lazy;
use regex::Regex;

/// Everything the splitter treats as a delimiter. Scientific-notation
/// floats are matched here (guarded by word boundaries) so that a negative
/// exponent is not torn apart at its minus sign. Multi-character operators
/// are listed before their single-character prefixes.
static SPLIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"//.*"#,
        r#"|"[^"]*""#,
        r"|\b[0-9][0-9_]*(?:\.[0-9][0-9_]*)?e-?[0-9][0-9_]*\b",
        r"|==|!=|<=|>=|\|\||&&",
        r"|[-+*/%<>=!(){};,]",
        r"|\s+",
    ))
    .expect("master lex pattern must compile")
});

static INT_LIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9](?:[0-9_]*[0-9])?$").expect("int pattern must compile"));

static DECIMAL_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9](?:[0-9_]*[0-9])?\.[0-9](?:[0-9_]*[0-9])?$")
        .expect("float pattern must compile")
});

static SCIENTIFIC_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9](?:[0-9_]*[0-9])?(?:\.[0-9](?:[0-9_]*[0-9])?)?e-?[0-9](?:[0-9_]*[0-9])?$")
        .expect("scientific float pattern must compile")
});

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[_A-Za-z][_A-Za-z0-9]*$").expect("identifier pattern must compile"));

const KEYWORDS: [&str; 12] = [
    "if", "else", "while", "return", "print", "true", "false", "int", "float", "bool", "char",
    "main",
];

fn operator_kind(lexeme: &str) -> Option<TokenKind> {
    let kind = match lexeme {
        "+" => TokenKind::Plus,
        "-" => TokenKind::Minus,
        "*" => TokenKind::Mult,
        "/" => TokenKind::Divide,
        "%" => TokenKind::Mod,
        "||" => TokenKind::Or,
        "&&" => TokenKind::And,
        "==" => TokenKind::Equality,
        "!=" => TokenKind::NotEqual,
        "<" => TokenKind::LessThan,
        ">" => TokenKind::GreaterThan,
        "<=" => TokenKind::LessThanEqual,
        ">=" => TokenKind::GreaterThanEqual,
        "=" => TokenKind::Assignment,
        "!" => TokenKind::Not,
        "(" => TokenKind::LParen,
        ")" => TokenKind::RParen,
        "{" => TokenKind::LBrace,
        "}" => TokenKind::RBrace,
        ";" => TokenKind::Semicolon,
        "," => TokenKind::Comma,
        _ => return None,
    };

    Some(kind)
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LexError {
    pub lexeme: String,
    pub line: usize,
}

pub type LexResult<T> = Result<T, LexError>;

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ERROR: Invalid syntax '{}' on line {}",
            self.lexeme, self.line
        )
    }
}

impl Error for LexError {}

pub struct Lexer<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            tokens: vec![],
            line: 0,
        }
    }

    /// Tokenize the whole input. The returned stream always ends with a
    /// single `Eof` token whose line number is the physical line count.
    pub fn lex(mut self) -> LexResult<Vec<Token>> {
        let input = self.input;
        for line in input.lines() {
            self.line += 1;
            self.lex_line(line)?;
        }

        self.tokens.push(Token::eof(self.line));
        Ok(self.tokens)
    }

    fn lex_line(&mut self, line: &str) -> LexResult<()> {
        let mut cursor = 0;

        for piece in SPLIT_PATTERN.find_iter(line) {
            if piece.start() > cursor {
                self.classify(&line[cursor..piece.start()])?;
            }
            cursor = piece.end();

            let lexeme = piece.as_str();
            if lexeme.chars().all(char::is_whitespace) || lexeme.starts_with("//") {
                continue;
            }

            if lexeme.starts_with('"') {
                self.push(lexeme, TokenKind::StringLit);
            } else if let Some(kind) = operator_kind(lexeme) {
                self.push(lexeme, kind);
            } else {
                // a scientific-notation candidate; run it through the
                // strict numeric rules to reject stray underscores
                self.classify(lexeme)?;
            }
        }

        if cursor < line.len() {
            self.classify(&line[cursor..])?;
        }

        Ok(())
    }

    /// Classification cascade for non-delimiter fragments: keyword table,
    /// numeric rules, identifier rule.
    fn classify(&mut self, fragment: &str) -> LexResult<()> {
        if KEYWORDS.contains(&fragment) {
            self.push(fragment, TokenKind::Keyword);
        } else if INT_LIT.is_match(fragment) {
            self.push(fragment, TokenKind::IntLit);
        } else if DECIMAL_FLOAT.is_match(fragment) || SCIENTIFIC_FLOAT.is_match(fragment) {
            self.push(fragment, TokenKind::Float);
        } else if IDENTIFIER.is_match(fragment) {
            self.push(fragment, TokenKind::Id);
        } else {
            return Err(LexError {
                lexeme: fragment.to_string(),
                line: self.line,
            });
        }

        Ok(())
    }

    fn push(&mut self, lexeme: &str, kind: TokenKind) {
        self.tokens.push(Token::new(lexeme, kind, self.line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .lex()
            .expect("input should lex")
            .iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_lex_identifier() {
        let tokens = Lexer::new("letter").lex();

        assert_eq!(
            Ok(vec![
                Token::new("letter", TokenKind::Id, 1),
                Token::eof(1)
            ]),
            tokens
        );
    }

    #[test]
    fn test_lex_keywords() {
        let tokens = Lexer::new("if else while return print").lex().unwrap();

        assert!(tokens[..5]
            .iter()
            .all(|token| token.kind == TokenKind::Keyword));
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = Lexer::new("iffy whiles printer").lex().unwrap();

        assert!(tokens[..3].iter().all(|token| token.kind == TokenKind::Id));
    }

    #[test]
    fn test_lex_int_literals() {
        let tokens = Lexer::new("0 42 1_000_000").lex().unwrap();

        assert!(tokens[..3]
            .iter()
            .all(|token| token.kind == TokenKind::IntLit));
        assert_eq!("1_000_000", tokens[2].lexeme);
    }

    #[test]
    fn test_lex_float_literals() {
        let tokens = Lexer::new("1.5 3.141_592 1.5e2 1e3 1.5e-2 12_0.5e10").lex().unwrap();

        assert!(tokens[..6].iter().all(|token| token.kind == TokenKind::Float));
        assert_eq!("1.5e-2", tokens[4].lexeme);
    }

    #[test]
    fn test_trailing_underscore_is_invalid() {
        assert!(Lexer::new("5_").lex().is_err());
        assert!(Lexer::new("5_.5").lex().is_err());
    }

    #[test]
    fn test_leading_underscore_is_identifier() {
        let tokens = Lexer::new("_5 _foo").lex().unwrap();

        assert!(tokens[..2].iter().all(|token| token.kind == TokenKind::Id));
    }

    #[test]
    fn test_exponent_adjacent_to_identifier() {
        // `x1e5` must stay a single identifier, not `x` followed by a float
        let tokens = Lexer::new("x1e5").lex().unwrap();

        assert_eq!(Token::new("x1e5", TokenKind::Id, 1), tokens[0]);
    }

    #[test]
    fn test_multi_char_operators_win() {
        assert_eq!(
            vec![
                TokenKind::Equality,
                TokenKind::NotEqual,
                TokenKind::LessThanEqual,
                TokenKind::GreaterThanEqual,
                TokenKind::Or,
                TokenKind::And,
                TokenKind::Eof
            ],
            kinds("== != <= >= || &&")
        );
    }

    #[test]
    fn test_operators_without_whitespace() {
        assert_eq!(
            vec![
                TokenKind::Id,
                TokenKind::LessThanEqual,
                TokenKind::IntLit,
                TokenKind::Eof
            ],
            kinds("a<=5")
        );
    }

    #[test]
    fn test_lex_string_literal() {
        let tokens = Lexer::new("print(\"hi there\");").lex().unwrap();

        assert_eq!(
            Token::new("\"hi there\"", TokenKind::StringLit, 1),
            tokens[2]
        );
    }

    #[test]
    fn test_comment_is_dropped() {
        assert_eq!(
            vec![TokenKind::IntLit, TokenKind::Eof],
            kinds("1 // + 2 none of this is lexed")
        );
    }

    #[test]
    fn test_line_numbers() {
        let tokens = Lexer::new("int\n\nfoo").lex().unwrap();

        assert_eq!(1, tokens[0].line);
        assert_eq!(3, tokens[1].line);
    }

    #[test]
    fn test_eof_carries_line_count() {
        let tokens = Lexer::new("int a;\na = 5;\n").lex().unwrap();
        let eof = tokens.last().unwrap();

        assert_eq!(TokenKind::Eof, eof.kind);
        assert_eq!(2, eof.line);
    }

    #[test]
    fn test_single_eof_for_empty_input() {
        assert_eq!(Ok(vec![Token::eof(0)]), Lexer::new("").lex());
    }

    #[test]
    fn test_invalid_lexeme() {
        assert_eq!(
            Err(LexError {
                lexeme: "@".to_string(),
                line: 1,
            }),
            Lexer::new("int a @ b;").lex()
        );
    }

    #[test]
    fn test_invalid_number_identifier_mix() {
        assert!(Lexer::new("12abc").lex().is_err());
    }

    #[test]
    fn test_full_statement() {
        let tokens = Lexer::new("int main() { print(1 + 2); }").lex().unwrap();

        assert_eq!(
            vec![
                TokenKind::Keyword,
                TokenKind::Keyword,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::Keyword,
                TokenKind::LParen,
                TokenKind::IntLit,
                TokenKind::Plus,
                TokenKind::IntLit,
                TokenKind::RParen,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Eof
            ],
            tokens.iter().map(|token| token.kind).collect::<Vec<_>>()
        );
    }
}
