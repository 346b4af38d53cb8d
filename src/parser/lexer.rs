//! Tokenizer for formula strings.
//!
//! A single left-to-right pass over the input bytes, classifying each
//! character (or run of digits) into a `Token`. Whitespace is skipped
//! silently; anything else unrecognized becomes `Token::Unknown` and is
//! reported as a syntax error by the caller, with the offending byte's
//! position attached as a `Span`.

use crate::core::error::{DrawError, Span};

/// A single lexical token, tagged with the byte span it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedToken {
    /// The token kind.
    pub token: Token,
    /// Its byte span in the source formula.
    pub span: Span,
}

/// The token kinds recognized by the grammar in §4.2.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `+`.
    Plus,
    /// `-`.
    Minus,
    /// `*`.
    Star,
    /// `^`.
    Caret,
    /// `(`.
    LParen,
    /// `)`.
    RParen,
    /// The plane coordinate `z`.
    Z,
    /// The unknown `w`.
    W,
    /// The imaginary unit `i`.
    I,
    /// An unsigned integer literal (used as a `Pow` exponent).
    Int(u16),
    /// A floating point literal.
    Float(f64),
    /// The sentinel marking the end of the input.
    EndOfData,
}

/// Tokenize `input` into a vector of located tokens, terminated by `EndOfData`.
///
/// # Errors
///
/// Returns `DrawError::SyntaxError` if an unrecognized character is found or
/// a numeric literal cannot be parsed.
pub fn lex(input: &str) -> Result<Vec<LocatedToken>, DrawError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    while pos < bytes.len() {
        let c = bytes[pos] as char;

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        let (token, consumed) = match c {
            '+' => (Token::Plus, 1),
            '-' => (Token::Minus, 1),
            '*' => (Token::Star, 1),
            '^' => (Token::Caret, 1),
            '(' => (Token::LParen, 1),
            ')' => (Token::RParen, 1),
            'z' => (Token::Z, 1),
            'w' => (Token::W, 1),
            'i' => (Token::I, 1),
            '0'..='9' | '.' => lex_number(&input[pos..], pos)?,
            _ => {
                return Err(DrawError::syntax_at(
                    format!("unexpected character '{c}'"),
                    Span::at(pos),
                ))
            }
        };

        tokens.push(LocatedToken { token, span: Span::new(pos, pos + consumed) });
        pos += consumed;
    }

    tokens.push(LocatedToken { token: Token::EndOfData, span: Span::at(pos) });
    Ok(tokens)
}

/// Consumes `e`/`E`, an optional sign, and one or more digits from the start
/// of `rest`. Returns `None` (consuming nothing) if no digit follows the
/// sign, leaving the `e` to be re-examined as a separate, invalid token.
fn lex_exponent(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return None;
    }
    let mut len = 1;
    if matches!(bytes.get(len), Some(b'+' | b'-')) {
        len += 1;
    }

    let digits = bytes[len..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    Some(len + digits)
}

fn lex_number(rest: &str, start: usize) -> Result<(Token, usize), DrawError> {
    let mut end = 0usize;
    let mut saw_dot = false;
    for c in rest.chars() {
        if c.is_ascii_digit() {
            end += 1;
        } else if c == '.' && !saw_dot {
            saw_dot = true;
            end += 1;
        } else {
            break;
        }
    }

    if saw_dot && let Some(exponent_len) = lex_exponent(&rest[end..]) {
        end += exponent_len;
    }

    let text = &rest[..end];
    if saw_dot {
        text.parse::<f64>()
            .map(|v| (Token::Float(v), end))
            .map_err(|_| DrawError::syntax_at(format!("invalid number '{text}'"), Span::new(start, start + end)))
    } else {
        text.parse::<u16>()
            .map(|v| (Token::Int(v), end))
            .or_else(|_| {
                text.parse::<f64>()
                    .map(|v| (Token::Float(v), end))
                    .map_err(|_| DrawError::syntax_at(format!("invalid number '{text}'"), Span::new(start, start + end)))
            })
    }
}
