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

//! Lexical analysis.
//!
//! Lexical analysis has two parts:
//!
//! 1. Reading source text into memory, implemented in the [source] module.
//!    This recodes the input into UTF-8 and remembers where lines start, so
//!    that diagnostics can quote them.
//!
//! 2. Scanning, implemented in the [scan] module.  This transforms a string
//!    into [Token]s.

// Warn about missing docs, but not for items declared with `#[cfg(test)]`.
#![cfg_attr(not(test), warn(missing_docs))]

pub mod scan;
pub mod source;
mod token;
pub use token::{COMMENT_LEXEME, Token, TokenKind};
