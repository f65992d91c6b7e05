//! Parser for the notations produced by [`crate::display`].
//!
//! Grammar (lowest precedence first, all binary connectives left-associative):
//!
//! ```text
//! or    := xor (OR xor)*
//! xor   := and ((XOR | XNOR) and)*
//! and   := unary (AND? unary)*        // juxtaposition `a b` means `a⋅b`
//! unary := NOT unary | atom
//! atom  := IDENT | 0 | 1 | '(' or ')'
//! ```
//!
//! Accepted symbols:
//!
//! - NOT: `~` `!` `¬`
//! - AND: `⋅` `·` `*` `&` `&&` `∧`
//! - OR: `+` `|` `||` `∨`
//! - XOR: `⊕` `^`
//! - XNOR: `⊙` `↔` `==`

use std::iter::Peekable;
use std::str::CharIndices;
use std::str::FromStr;

use thiserror::Error;

use crate::expr::{Expr, Op};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected character `{found}` at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("invalid constant `{found}` at offset {offset}")]
    InvalidConstant { found: String, offset: usize },

    #[error("unexpected {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unexpected end of input")]
    UnexpectedEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Const(bool),
    Not,
    Op(Op),
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Ident(name) => format!("identifier `{}`", name),
            Token::Const(value) => format!("constant `{}`", u8::from(*value)),
            Token::Not => "negation".to_string(),
            Token::Op(op) => format!("operator {:?}", op),
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
        }
    }

    /// Whether this token can start an operand (used for implicit AND).
    fn starts_operand(&self) -> bool {
        matches!(self, Token::Ident(_) | Token::Const(_) | Token::Not | Token::LParen)
    }
}

struct Lexer<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
        }
    }

    fn take_while(&mut self, start: usize, pred: impl Fn(char) -> bool) -> &'a str {
        let mut end = self.text.len();
        while let Some(&(i, c)) = self.chars.peek() {
            if !pred(c) {
                end = i;
                break;
            }
            self.chars.next();
        }
        &self.text[start..end]
    }

    /// Consume `second` if it is the next character.
    fn eat(&mut self, second: char) -> bool {
        if matches!(self.chars.peek(), Some(&(_, c)) if c == second) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn tokenize(mut self) -> Result<Vec<(usize, Token)>, ParseError> {
        let mut tokens = Vec::new();

        while let Some((offset, c)) = self.chars.next() {
            let token = match c {
                c if c.is_whitespace() => continue,
                '(' => Token::LParen,
                ')' => Token::RParen,
                '~' | '!' | '¬' => Token::Not,
                '⋅' | '·' | '*' | '∧' => Token::Op(Op::And),
                '&' => {
                    self.eat('&');
                    Token::Op(Op::And)
                }
                '+' | '∨' => Token::Op(Op::Or),
                '|' => {
                    self.eat('|');
                    Token::Op(Op::Or)
                }
                '⊕' | '^' => Token::Op(Op::Xor),
                '⊙' | '↔' => Token::Op(Op::Xnor),
                '=' => {
                    if !self.eat('=') {
                        return Err(ParseError::UnexpectedChar { found: c, offset });
                    }
                    Token::Op(Op::Xnor)
                }
                c if c.is_ascii_digit() => {
                    let digits = self.take_while(offset, |c| c.is_ascii_digit());
                    match digits {
                        "0" => Token::Const(false),
                        "1" => Token::Const(true),
                        _ => {
                            return Err(ParseError::InvalidConstant {
                                found: digits.to_string(),
                                offset,
                            })
                        }
                    }
                }
                c if c.is_alphabetic() || c == '_' => {
                    let name = self.take_while(offset, |c| c.is_alphanumeric() || c == '_');
                    Token::Ident(name.to_string())
                }
                _ => return Err(ParseError::UnexpectedChar { found: c, offset }),
            };
            tokens.push((offset, token));
        }

        Ok(tokens)
    }
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn next(&mut self) -> Option<(usize, Token)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn unexpected(offset: usize, token: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            found: token.describe(),
            offset,
        }
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_xor()?;
        while let Some(Token::Op(Op::Or)) = self.peek() {
            self.pos += 1;
            let rhs = self.parse_xor()?;
            lhs = Expr::or(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_xor(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_and()?;
        while let Some(&Token::Op(op @ (Op::Xor | Op::Xnor))) = self.peek() {
            self.pos += 1;
            let rhs = self.parse_and()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let explicit = matches!(self.peek(), Some(Token::Op(Op::And)));
            if explicit {
                self.pos += 1;
            } else if !self.peek().is_some_and(Token::starts_operand) {
                break;
            }
            let rhs = self.parse_unary()?;
            lhs = Expr::and(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(Token::Not) = self.peek() {
            self.pos += 1;
            let inner = self.parse_unary()?;
            return Ok(Expr::not(inner));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        match self.next() {
            Some((_, Token::Ident(name))) => Ok(Expr::var(name)),
            Some((_, Token::Const(value))) => Ok(Expr::constant(value)),
            Some((_, Token::LParen)) => {
                let inner = self.parse_or()?;
                match self.next() {
                    Some((_, Token::RParen)) => Ok(inner),
                    Some((offset, token)) => Err(Self::unexpected(offset, &token)),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            Some((offset, token)) => Err(Self::unexpected(offset, &token)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

/// Parse an expression.
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    let tokens = Lexer::new(text).tokenize()?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or()?;
    match parser.next() {
        None => Ok(expr),
        Some((offset, token)) => Err(Parser::unexpected(offset, &token)),
    }
}

impl FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
