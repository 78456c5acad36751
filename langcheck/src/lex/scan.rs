// langcheck - a syntax checker for a minimal imperative language.
// Copyright (C) 2025 Free Software Foundation, Inc.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! Scanning.
//!
//! The scanner makes a single left-to-right pass over a string, classifying
//! characters into [Token]s with at most one character of lookahead.  It never
//! fails: a character that cannot start any token is skipped, and reported as
//! a [ScanError] to callers that care.

use log::debug;
use thiserror::Error as ThisError;

use crate::message::Point;

use super::token::{COMMENT_LEXEME, Token, TokenKind};

/// A character that the scanner skipped.
#[derive(ThisError, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScanError {
    /// Unexpected character.
    #[error("Unexpected character {character:?} in input.")]
    UnexpectedChar {
        /// The skipped character.
        character: char,

        /// Where it was.
        point: Point,
    },
}

fn take(input: &str) -> (Option<char>, &str) {
    let mut iter = input.chars();
    (iter.next(), iter.as_str())
}

fn may_start_id(c: char) -> bool {
    c.is_alphabetic()
}

fn may_continue_id(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit()
}

/// Returns the length in bytes of the numeric literal at the start of
/// `input`, which must begin with a digit, and whether it is a float.
fn number_len(input: &str) -> (usize, bool) {
    let int_len = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    match input[int_len..].strip_prefix('.') {
        Some(fraction) => {
            let frac_len = fraction
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(fraction.len());
            (int_len + 1 + frac_len, true)
        }
        None => (int_len, false),
    }
}

/// Lazy lexical analyzer for strings.
///
/// Given a string, [Scanner] provides iteration over tokens and
/// [ScanError]s.  Use [tokenize] to get just the tokens.
pub struct Scanner<'a> {
    input: &'a str,
    point: Point,
}

impl<'a> Scanner<'a> {
    /// Creates a new [Scanner] for `input`, starting at line 1, column 1.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            point: Point::default(),
        }
    }

    /// Returns the position of the next character that will be scanned.
    pub fn point(&self) -> Point {
        self.point
    }

    /// Consumes `len` bytes of input and returns them.
    fn consume(&mut self, len: usize) -> &'a str {
        let (s, rest) = self.input.split_at(len);
        self.point = self.point.advance(s);
        self.input = rest;
        s
    }

    fn token(&mut self, kind: TokenKind, len: usize) -> Token {
        let point = self.point;
        Token::new(kind, self.consume(len), point)
    }

    /// Scans one- or two-character operator `c`, which is followed by `rest`:
    /// if `rest` starts with `second`, the result is `double`, otherwise
    /// `single` (which may be `None` if `c` means nothing by itself).
    fn digraph(
        &mut self,
        rest: &str,
        second: char,
        double: TokenKind,
        single: Option<TokenKind>,
    ) -> Option<Token> {
        if rest.starts_with(second) {
            Some(self.token(double, 2))
        } else {
            single.map(|single| self.token(single, 1))
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (Some(c), rest) = take(self.input) else {
                return None;
            };
            let token = match c {
                c if c.is_whitespace() => {
                    self.consume(c.len_utf8());
                    continue;
                }
                '#' => {
                    let point = self.point;
                    let len = self.input.find('\n').unwrap_or(self.input.len());
                    self.consume(len);
                    Some(Token::new(TokenKind::Comment, COMMENT_LEXEME, point))
                }
                c if may_start_id(c) => {
                    let len = self
                        .input
                        .find(|c: char| !may_continue_id(c))
                        .unwrap_or(self.input.len());
                    let kind =
                        TokenKind::keyword(&self.input[..len]).unwrap_or(TokenKind::Identifier);
                    Some(self.token(kind, len))
                }
                '0'..='9' => {
                    let (len, is_float) = number_len(self.input);
                    let kind = if is_float {
                        TokenKind::Float
                    } else {
                        TokenKind::Integer
                    };
                    Some(self.token(kind, len))
                }
                '<' => self.digraph(rest, '=', TokenKind::Le, Some(TokenKind::Lt)),
                '>' => self.digraph(rest, '=', TokenKind::Ge, Some(TokenKind::Gt)),
                '=' => self.digraph(rest, '=', TokenKind::EqEq, Some(TokenKind::Assign)),
                '!' => self.digraph(rest, '=', TokenKind::Ne, None),
                '&' => self.digraph(rest, '&', TokenKind::And, None),
                '+' => Some(self.token(TokenKind::Plus, 1)),
                '-' => Some(self.token(TokenKind::Minus, 1)),
                '*' => Some(self.token(TokenKind::Asterisk, 1)),
                '/' => Some(self.token(TokenKind::Slash, 1)),
                ',' => Some(self.token(TokenKind::Comma, 1)),
                ';' => Some(self.token(TokenKind::Semicolon, 1)),
                '(' => Some(self.token(TokenKind::LParen, 1)),
                ')' => Some(self.token(TokenKind::RParen, 1)),
                '{' => Some(self.token(TokenKind::LCurly, 1)),
                '}' => Some(self.token(TokenKind::RCurly, 1)),
                _ => None,
            };
            return Some(match token {
                Some(token) => Ok(token),
                None => {
                    let point = self.point;
                    self.consume(c.len_utf8());
                    debug!("{point}: skipping unexpected character {c:?}");
                    Err(ScanError::UnexpectedChar {
                        character: c,
                        point,
                    })
                }
            });
        }
    }
}

/// Returns the tokens in `source`, silently skipping characters that do not
/// belong to any token.
pub fn tokenize(source: &str) -> impl Iterator<Item = Token> + '_ {
    Scanner::new(source).filter_map(Result::ok)
}
