//! Recursive-descent parser turning a formula string into a `Poly` tree.
//!
//! Grammar (in terms of the tokens produced by [`lexer`]):
//!
//! ```text
//! expression := summand (('+' | '-') summand)*
//! summand    := factor ('*' factor)*
//! factor     := atomic ('^' Int)?
//! atomic     := Num | Z | W | I | '-' atomic | '(' expression ')'
//! ```
//!
//! Each production's semantic action calls straight into the `core::poly`
//! smart constructors, so the tree that comes out of parsing is already
//! constant-folded and identity-simplified.

pub mod lexer;

use crate::core::error::{DrawError, Span};
use crate::core::poly::{self, Poly};
use lexer::{lex, LocatedToken, Token};
use num_complex::Complex64;

struct Parser {
    tokens: Vec<LocatedToken>,
    pos: usize,
    depth: u32,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos].token
    }

    fn peek_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].token.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token) -> Result<(), DrawError> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(DrawError::syntax_at(format!("expected {expected:?}, found {:?}", self.peek()), self.peek_span()))
        }
    }

    fn parse_expression(&mut self) -> Result<Poly, DrawError> {
        let negate_first = matches!(self.peek(), Token::Minus);
        if negate_first {
            self.advance();
        }
        let mut lhs = self.parse_summand()?;
        if negate_first {
            lhs = poly::neg(lhs);
        }
        loop {
            match self.peek() {
                Token::Plus => {
                    self.advance();
                    let rhs = self.parse_summand()?;
                    lhs = poly::add(lhs, rhs);
                }
                Token::Minus => {
                    self.advance();
                    let rhs = self.parse_summand()?;
                    lhs = poly::sub(lhs, rhs);
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn parse_summand(&mut self) -> Result<Poly, DrawError> {
        let mut lhs = self.parse_factor()?;
        while matches!(self.peek(), Token::Star) {
            self.advance();
            let rhs = self.parse_factor()?;
            lhs = poly::mul(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_factor(&mut self) -> Result<Poly, DrawError> {
        let base = self.parse_atomic()?;
        if matches!(self.peek(), Token::Caret) {
            self.advance();
            let span = self.peek_span();
            match self.advance() {
                Token::Int(k) => Ok(poly::pow(base, k)),
                other => Err(DrawError::syntax_at(format!("expected integer exponent, found {other:?}"), span)),
            }
        } else {
            Ok(base)
        }
    }

    fn parse_atomic(&mut self) -> Result<Poly, DrawError> {
        let span = self.peek_span();
        match self.advance() {
            Token::Z => Ok(poly::arg()),
            Token::W => Ok(poly::val()),
            Token::I => Ok(poly::num(Complex64::new(0.0, 1.0))),
            Token::Int(v) => Ok(poly::num(Complex64::new(f64::from(v), 0.0))),
            Token::Float(v) => Ok(poly::num(Complex64::new(v, 0.0))),
            Token::LParen => {
                let inner = self.with_depth_guard(span, Self::parse_expression)?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            other => Err(DrawError::syntax_at(format!("unexpected token {other:?}"), span)),
        }
    }

    fn with_depth_guard(
        &mut self,
        span: Span,
        f: impl FnOnce(&mut Self) -> Result<Poly, DrawError>,
    ) -> Result<Poly, DrawError> {
        self.depth += 1;
        if self.depth > crate::MAX_PARSE_DEPTH {
            return Err(DrawError::syntax_at("expression nested too deeply", span));
        }
        let result = f(self);
        self.depth -= 1;
        result
    }
}

/// Parse a formula string into a `Poly` tree.
///
/// # Errors
///
/// Returns `DrawError::SyntaxError` if the input is lexically invalid,
/// grammatically malformed, or has trailing tokens after a complete
/// expression.
pub fn parse(input: &str) -> Result<Poly, DrawError> {
    let tokens = lex(input)?;
    let mut parser = Parser { tokens, pos: 0, depth: 0 };
    let root = parser.parse_expression()?;
    if parser.peek() != &Token::EndOfData {
        return Err(DrawError::syntax_at(
            format!("unexpected trailing token {:?}", parser.peek()),
            parser.peek_span(),
        ));
    }
    Ok(root)
}
