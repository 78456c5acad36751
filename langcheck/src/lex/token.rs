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

use std::fmt::{Display, Formatter, Result as FmtResult};

use enum_iterator::Sequence;
use enum_map::Enum;
use serde::Serialize;

use crate::message::Point;

/// The lexeme given to every [TokenKind::Comment] token.
///
/// Comment contents carry no meaning, so they are not kept.
pub const COMMENT_LEXEME: &str = "# comment";

/// The classification of a lexeme.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enum, Sequence, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Identifier, e.g. `x` or `total2`.
    Identifier,

    /// Integer literal, e.g. `42`.
    Integer,

    /// Float literal, e.g. `4.5`.
    Float,

    /// `=`.
    Assign,

    /// `+`.
    Plus,

    /// `-`.
    Minus,

    /// `*`.
    Asterisk,

    /// `/`.
    Slash,

    /// `>`.
    Gt,

    /// `>=`.
    Ge,

    /// `<`.
    Lt,

    /// `<=`.
    Le,

    /// `==`.
    EqEq,

    /// `!=`.
    Ne,

    /// `&&`.
    And,

    /// `(`.
    LParen,

    /// `)`.
    RParen,

    /// `{`.
    LCurly,

    /// `}`.
    RCurly,

    /// `,`.
    Comma,

    /// `;`.
    Semicolon,

    /// `int`.
    IntType,

    /// `float`.
    FloatType,

    /// `if`.
    If,

    /// `else`.
    Else,

    /// `while`.
    While,

    /// `print`.
    Print,

    /// `#` through the end of the line.
    Comment,
}

impl TokenKind {
    /// Returns the keyword token kind for `s`, if `s` is a keyword.
    pub fn keyword(s: &str) -> Option<Self> {
        match s {
            "int" => Some(Self::IntType),
            "float" => Some(Self::FloatType),
            "if" => Some(Self::If),
            "else" => Some(Self::Else),
            "while" => Some(Self::While),
            "print" => Some(Self::Print),
            _ => None,
        }
    }

    /// Returns the fixed lexeme for this kind, or `None` for kinds whose
    /// lexemes vary (identifiers, literals, comments).
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Self::Identifier | Self::Integer | Self::Float | Self::Comment => None,
            Self::Assign => Some("="),
            Self::Plus => Some("+"),
            Self::Minus => Some("-"),
            Self::Asterisk => Some("*"),
            Self::Slash => Some("/"),
            Self::Gt => Some(">"),
            Self::Ge => Some(">="),
            Self::Lt => Some("<"),
            Self::Le => Some("<="),
            Self::EqEq => Some("=="),
            Self::Ne => Some("!="),
            Self::And => Some("&&"),
            Self::LParen => Some("("),
            Self::RParen => Some(")"),
            Self::LCurly => Some("{"),
            Self::RCurly => Some("}"),
            Self::Comma => Some(","),
            Self::Semicolon => Some(";"),
            Self::IntType => Some("int"),
            Self::FloatType => Some("float"),
            Self::If => Some("if"),
            Self::Else => Some("else"),
            Self::While => Some("while"),
            Self::Print => Some("print"),
        }
    }

    /// Type or control keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::IntType | Self::FloatType | Self::If | Self::Else | Self::While | Self::Print
        )
    }

    /// One of `>`, `>=`, `<`, `<=`, `==`, `!=`.
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            Self::Gt | Self::Ge | Self::Lt | Self::Le | Self::EqEq | Self::Ne
        )
    }

    /// One of `+`, `-`, `*`, `/`.
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Self::Plus | Self::Minus | Self::Asterisk | Self::Slash)
    }

    /// Integer or float literal.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Something that can stand for a value: an identifier or a numeric
    /// literal.
    pub fn is_operand(&self) -> bool {
        *self == Self::Identifier || self.is_numeric()
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Identifier => write!(f, "identifier"),
            Self::Integer => write!(f, "integer literal"),
            Self::Float => write!(f, "float literal"),
            Self::Comment => write!(f, "comment"),
            _ => write!(f, "`{}`", self.as_str().unwrap_or_default()),
        }
    }
}

/// A token produced by the [scanner](super::scan).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The token's classification.
    pub kind: TokenKind,

    /// The source text that was scanned to form this token, except that
    /// comments all get [COMMENT_LEXEME].
    pub lexeme: String,

    /// Where the token starts.
    pub point: Point,
}

impl Token {
    /// Constructs a new token.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, point: Point) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            point,
        }
    }

    /// Returns the point just past the end of this token.
    pub fn end(&self) -> Point {
        self.point.advance(&self.lexeme)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.lexeme)
    }
}

#[cfg(test)]
mod test {
    use enum_iterator::all;

    use super::TokenKind;

    #[test]
    fn keywords_round_trip() {
        for kind in all::<TokenKind>().filter(TokenKind::is_keyword) {
            assert_eq!(TokenKind::keyword(kind.as_str().unwrap()), Some(kind));
        }
        assert_eq!(TokenKind::keyword("If"), None);
        assert_eq!(TokenKind::keyword("iff"), None);
    }

    #[test]
    fn display() {
        assert_eq!(TokenKind::Ge.to_string(), "`>=`");
        assert_eq!(TokenKind::While.to_string(), "`while`");
        assert_eq!(TokenKind::Float.to_string(), "float literal");
    }
}
