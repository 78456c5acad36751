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

//! Symbol table.
//!
//! A [SymbolTable] records the kind of each identifier and keyword lexeme in a
//! program, in order of first appearance.  Validation does not consult it.

use std::{
    borrow::Borrow,
    fmt::{Display, Formatter, Result as FmtResult},
};

use indexmap::IndexMap;
use serde::Serialize;

use crate::lex::{Token, TokenKind};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolTable(IndexMap<String, TokenKind>);

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from the identifiers and keywords among `tokens`.
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<Token>,
    {
        let mut table = Self::new();
        for token in tokens {
            let token = token.borrow();
            if token.kind == TokenKind::Identifier || token.kind.is_keyword() {
                table.insert(token.lexeme.clone(), token.kind);
            }
        }
        table
    }

    /// Binds `lexeme` to `kind`, returning its previous kind, if any.  A
    /// lexeme that is already present keeps its original position.
    pub fn insert(&mut self, lexeme: impl Into<String>, kind: TokenKind) -> Option<TokenKind> {
        self.0.insert(lexeme.into(), kind)
    }

    pub fn get(&self, lexeme: &str) -> Option<TokenKind> {
        self.0.get(lexeme).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TokenKind)> {
        self.0.iter().map(|(lexeme, kind)| (lexeme.as_str(), *kind))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (lexeme, kind) in self.iter() {
            writeln!(f, "Lexeme: {lexeme}, Token: {}", kind_name(kind))?;
        }
        Ok(())
    }
}

/// Names `kind` without the backticks that [TokenKind]'s `Display` adds.
fn kind_name(kind: TokenKind) -> String {
    match kind.as_str() {
        Some(s) => format!("{s} keyword"),
        None => kind.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::lex::{TokenKind, scan::tokenize};

    use super::SymbolTable;

    #[test]
    fn identifiers_and_keywords() {
        let table = SymbolTable::from_tokens(tokenize(
            "int x; x = y + 5; # note\nif (x > 1.5) { print x; }",
        ));
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            [
                ("int", TokenKind::IntType),
                ("x", TokenKind::Identifier),
                ("y", TokenKind::Identifier),
                ("if", TokenKind::If),
                ("print", TokenKind::Print),
            ]
        );
        assert_eq!(table.get("x"), Some(TokenKind::Identifier));
        assert_eq!(table.get("5"), None);
        assert_eq!(table.get("# comment"), None);
    }

    #[test]
    fn later_bindings_replace_earlier_ones() {
        let mut table = SymbolTable::new();
        assert!(table.is_empty());
        assert_eq!(table.insert("a", TokenKind::Identifier), None);
        assert_eq!(table.insert("b", TokenKind::Identifier), None);
        assert_eq!(
            table.insert("a", TokenKind::Integer),
            Some(TokenKind::Identifier)
        );
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            [("a", TokenKind::Integer), ("b", TokenKind::Identifier)]
        );
    }

    #[test]
    fn display() {
        let table = SymbolTable::from_tokens(tokenize("while (n < 10) { }"));
        assert_eq!(
            table.to_string(),
            "Lexeme: while, Token: while keyword\nLexeme: n, Token: identifier\n"
        );
    }

    #[test]
    fn json() {
        let table = SymbolTable::from_tokens(tokenize("float f;"));
        assert_eq!(
            serde_json::to_string(&table).unwrap(),
            r#"{"float":"float_type","f":"identifier"}"#
        );
    }
}
