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

//! Validation.
//!
//! The [Validator] is a pushdown automaton: it follows the [Grammar]'s
//! transition table one token at a time, and keeps a stack of [ControlFrame]s
//! for the blocks that are open, so that each `}` resumes the construct that
//! its `{` opened, however deeply blocks nest.

use std::{
    borrow::Borrow,
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

use itertools::Itertools;
use log::{debug, trace};
use serde::Serialize;

use crate::{
    grammar::{ConstructKind, Grammar, ParserState, Transition},
    lex::{Token, TokenKind},
    message::Point,
};

/// An open block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ControlFrame {
    /// The state to resume when the block closes.
    pub return_state: ParserState,

    /// What opened the block.
    pub construct: ConstructKind,

    /// Where the block's `{` is.
    pub opened_at: Point,
}

/// Why a program was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cause {
    /// A token that the grammar does not allow in the current state.
    UnexpectedToken,

    /// A `}` with no open block.
    UnmatchedClose,

    /// The input ended in the middle of a statement or with a block open.
    UnexpectedEnd,
}

/// A syntax error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub cause: Cause,

    /// The offending token's position, or for [Cause::UnexpectedEnd], the
    /// position just past the last token.
    pub point: Point,

    /// The kind of the offending token, or `None` at end of input.
    pub found: Option<TokenKind>,

    /// The offending token's lexeme, or an empty string at end of input.
    pub lexeme: String,

    /// The automaton's state when it rejected.
    pub state: ParserState,

    /// The token kinds that would have been accepted instead.
    pub expected: Vec<TokenKind>,

    /// The number of blocks that were open.
    pub depth: usize,

    /// The innermost open block, if any.
    pub innermost: Option<ControlFrame>,
}

/// Formats `kinds` as an English list, e.g. "`;`, `=`, or `,`".
fn english_list(kinds: &[TokenKind]) -> String {
    match kinds {
        [] => String::from("nothing"),
        [kind] => kind.to_string(),
        [a, b] => format!("{a} or {b}"),
        [most @ .., last] => format!("{}, or {last}", most.iter().join(", ")),
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.cause {
            Cause::UnexpectedToken => {
                write!(f, "expected {}, found ", english_list(&self.expected))?;
                match self.found {
                    Some(kind) if kind.as_str().is_none() => {
                        write!(f, "{kind} `{}`", self.lexeme)
                    }
                    Some(kind) => write!(f, "{kind}"),
                    None => write!(f, "end of input"),
                }
            }
            Cause::UnmatchedClose => write!(f, "found `}}` with no open block to close"),
            Cause::UnexpectedEnd => match self.innermost {
                Some(frame) if self.state.is_statement_boundary() => write!(
                    f,
                    "expected `}}` to close {} block opened at {}, found end of input",
                    frame.construct, frame.opened_at
                ),
                _ => write!(
                    f,
                    "expected {}, found end of input",
                    english_list(&self.expected)
                ),
            },
        }
    }
}

impl Error for Rejection {}

/// The outcome of validating a program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The program is syntactically valid.
    Accepted,

    /// The program is not syntactically valid.
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accepted => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Accepted => write!(f, "valid"),
            Self::Rejected(_) => write!(f, "invalid"),
        }
    }
}

/// Streaming validator.
///
/// Feed tokens to [Validator::push] in order, then call [Validator::finish]
/// to get the verdict.  Comment tokens are ignored.
pub struct Validator {
    grammar: &'static Grammar,
    state: ParserState,
    stack: Vec<ControlFrame>,

    /// Just past the last token pushed, for reporting unexpected end of
    /// input.
    end: Point,

    rejection: Option<Rejection>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self {
            grammar: Grammar::get(),
            state: ParserState::Start,
            stack: Vec::new(),
            end: Point::default(),
            rejection: None,
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Returns the number of open blocks.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the token kinds acceptable next.
    pub fn expected(&self) -> Vec<TokenKind> {
        let mut expected = self.grammar.expected(self.state);
        if self.stack.is_empty() {
            expected.retain(|kind| {
                self.grammar.transition(self.state, *kind) != Some(Transition::Pop)
            });
        }
        expected
    }

    /// Consumes `token`.  Once this returns an error, every later call returns
    /// the same error.
    pub fn push(&mut self, token: &Token) -> Result<(), Rejection> {
        if let Some(rejection) = &self.rejection {
            return Err(rejection.clone());
        }
        if token.kind == TokenKind::Comment {
            trace!("{}: skipping comment", token.point);
            return Ok(());
        }

        self.end = token.end();
        match self.grammar.transition(self.state, token.kind) {
            Some(Transition::Goto(next)) => {
                trace!("{}: {:?} --{:?}--> {:?}", token.point, self.state, token.kind, next);
                self.state = next;
                Ok(())
            }
            Some(Transition::PushAndGoto(construct, inner)) => {
                self.stack.push(ControlFrame {
                    return_state: construct.resume_state(),
                    construct,
                    opened_at: token.point,
                });
                debug!(
                    "{}: open {construct} block (depth {})",
                    token.point,
                    self.stack.len()
                );
                self.state = inner;
                Ok(())
            }
            Some(Transition::Pop) => match self.stack.last().copied() {
                Some(frame) if frame.construct.closed_by(token.kind) => {
                    debug!(
                        "{}: close {} block opened at {} (depth {})",
                        token.point,
                        frame.construct,
                        frame.opened_at,
                        self.stack.len()
                    );
                    self.state = frame.return_state;
                    self.stack.pop();
                    Ok(())
                }
                _ => Err(self.reject(token, Cause::UnmatchedClose)),
            },
            None => Err(self.reject(token, Cause::UnexpectedToken)),
        }
    }

    fn reject(&mut self, token: &Token, cause: Cause) -> Rejection {
        let rejection = Rejection {
            cause,
            point: token.point,
            found: Some(token.kind),
            lexeme: token.lexeme.clone(),
            state: self.state,
            expected: self.expected(),
            depth: self.stack.len(),
            innermost: self.stack.last().copied(),
        };
        debug!("{}: rejected: {rejection}", token.point);
        self.state = ParserState::Error;
        self.rejection = Some(rejection.clone());
        rejection
    }

    /// Declares the end of input and returns the verdict.
    pub fn finish(self) -> Verdict {
        if let Some(rejection) = self.rejection {
            return Verdict::Rejected(rejection);
        }
        if self.state.is_statement_boundary() && self.stack.is_empty() {
            return Verdict::Accepted;
        }
        let rejection = Rejection {
            cause: Cause::UnexpectedEnd,
            point: self.end,
            found: None,
            lexeme: String::new(),
            state: self.state,
            expected: self.expected(),
            depth: self.stack.len(),
            innermost: self.stack.last().copied(),
        };
        debug!("{}: rejected: {rejection}", self.end);
        Verdict::Rejected(rejection)
    }
}

/// Validates `tokens`, stopping at the first rejection.
///
/// An empty sequence of tokens is a valid (empty) program.
pub fn validate<I>(tokens: I) -> Verdict
where
    I: IntoIterator,
    I::Item: Borrow<Token>,
{
    let mut validator = Validator::new();
    for token in tokens {
        if validator.push(token.borrow()).is_err() {
            break;
        }
    }
    validator.finish()
}
