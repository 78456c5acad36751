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

pub mod grammar;
pub mod lex;
pub mod message;
pub mod symbols;
pub mod validate;

pub use grammar::Grammar;
pub use lex::{
    Token, TokenKind,
    scan::{Scanner, tokenize},
    source::SourceFile,
};
pub use message::Diagnostic;
pub use symbols::SymbolTable;
pub use validate::{Rejection, Validator, Verdict, validate};

/// Scans and validates `source`.
///
/// Characters that do not begin any token are skipped.  Use a [Scanner]
/// directly to find out about them.
pub fn check(source: &str) -> Verdict {
    validate(tokenize(source))
}
