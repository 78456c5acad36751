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

//! The grammar, as a state transition table.
//!
//! A program is a sequence of zero or more statements.  Each statement is one
//! of the following, where _operand_ is an identifier or a numeric literal and
//! _condition_ is `operand relop operand`, optionally followed by `&&` and
//! another condition:
//!
//! - Declaration: `int x;`, `float y = 1.5;`, `int a, b = c;`.
//!
//! - Assignment: `x = operand;` or `x = operand op operand op ...;` where each
//!   `op` is one of `+ - * /`.
//!
//! - Print: `print operand;` or `print(operand);`.
//!
//! - Conditional: `if (condition) { statements }`, optionally followed by
//!   `else { statements }` or `else if ...`.
//!
//! - Loop: `while (condition) { statements }`.
//!
//! - Block: `{ statements }`.
//!
//! The [Grammar] maps each `(state, token kind)` pair to a [Transition].  The
//! table is flat; nesting is the job of the
//! [Validator](crate::validate::Validator), which keeps a stack of the blocks
//! that [Transition::PushAndGoto] opens and [Transition::Pop] closes.

use std::{
    collections::HashMap,
    fmt::{Display, Formatter, Result as FmtResult},
    sync::LazyLock,
};

use enum_iterator::{Sequence, all};
use enum_map::EnumMap;
use serde::Serialize;

use crate::lex::TokenKind;

/// A statement form that introduces a block, which must be closed by a
/// matching `}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructKind {
    /// `if (...) {`.
    If,

    /// `else {`.
    Else,

    /// `while (...) {`.
    While,

    /// A bare `{`.
    Block,
}

impl ConstructKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::Block => "block",
        }
    }

    /// The state to resume after this construct's block closes.
    ///
    /// Only an `if` block may be followed by `else`.
    pub fn resume_state(&self) -> ParserState {
        match self {
            Self::If => ParserState::AfterIfBlock,
            Self::Else | Self::While | Self::Block => ParserState::Start,
        }
    }

    /// Returns true if a token of the given `kind` closes this construct's
    /// block.
    pub fn closed_by(&self, kind: TokenKind) -> bool {
        kind == TokenKind::RCurly
    }
}

impl Display for ConstructKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Progress through the `(condition)` that follows `if` or `while`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionStep {
    /// After the keyword.
    Keyword,

    /// After `(` or `&&`.
    Open,

    /// After the left operand of a comparison.
    Left,

    /// After the relational operator.
    Operator,

    /// After the right operand of a comparison.
    Right,

    /// After the closing `)`.
    Close,
}

/// A state of the validation automaton.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserState {
    /// Between statements.  This is the initial state, and the only final
    /// state apart from [ParserState::AfterIfBlock].
    Start,

    /// Between statements, just after an `if` block closed, so that `else` may
    /// follow.
    AfterIfBlock,

    /// After `int` or `float`, or after `,` in a declaration.
    DeclType,

    /// After the name in a declaration.
    DeclName,

    /// After `=` in a declaration.
    DeclInit,

    /// After a declaration's initial value.
    DeclValue,

    /// After the identifier that starts an assignment.
    AssignTarget,

    /// After `=` in an assignment.
    AssignValue,

    /// After an operand in an assignment.
    AssignOperand,

    /// After an arithmetic operator in an assignment.
    AssignOperator,

    /// After `print`.
    PrintKeyword,

    /// After `print(`.
    PrintOpen,

    /// After `print(operand`.
    PrintArgument,

    /// After `print operand` or `print(operand)`.
    PrintEnd,

    /// Inside the condition of an `if` or `while`.
    Condition(ConstructKind, ConditionStep),

    /// After `else`.
    ElseKeyword,

    /// After a rejection.  No token leaves this state.
    Error,
}

impl ParserState {
    /// Returns true if a complete program may end in this state (given that
    /// no blocks remain open).
    pub fn is_statement_boundary(&self) -> bool {
        matches!(self, Self::Start | Self::AfterIfBlock)
    }

    /// Returns every state.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::Start,
            Self::AfterIfBlock,
            Self::DeclType,
            Self::DeclName,
            Self::DeclInit,
            Self::DeclValue,
            Self::AssignTarget,
            Self::AssignValue,
            Self::AssignOperand,
            Self::AssignOperator,
            Self::PrintKeyword,
            Self::PrintOpen,
            Self::PrintArgument,
            Self::PrintEnd,
        ]
        .into_iter()
        .chain(
            [ConstructKind::If, ConstructKind::While]
                .into_iter()
                .flat_map(|construct| {
                    all::<ConditionStep>().map(move |step| Self::Condition(construct, step))
                }),
        )
        .chain([Self::ElseKeyword, Self::Error])
    }
}

impl Display for ParserState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Start | Self::AfterIfBlock => write!(f, "expects statement"),
            Self::DeclType => write!(f, "expects name in declaration"),
            Self::DeclName => write!(f, "expects `;`, `=`, or `,` after declared name"),
            Self::DeclInit => write!(f, "expects operand after `=` in declaration"),
            Self::DeclValue => write!(f, "expects `;` or `,` after initial value"),
            Self::AssignTarget => write!(f, "expects `=` after identifier"),
            Self::AssignValue => write!(f, "expects operand after `=`"),
            Self::AssignOperand => write!(f, "expects `;` or arithmetic operator after operand"),
            Self::AssignOperator => write!(f, "expects operand after arithmetic operator"),
            Self::PrintKeyword => write!(f, "expects `(` or operand after `print`"),
            Self::PrintOpen => write!(f, "expects operand after `print(`"),
            Self::PrintArgument => write!(f, "expects `)` after `print` argument"),
            Self::PrintEnd => write!(f, "expects `;` after `print` statement"),
            Self::Condition(construct, step) => match step {
                ConditionStep::Keyword => write!(f, "expects `(` after `{construct}`"),
                ConditionStep::Open => write!(f, "expects operand in `{construct}` condition"),
                ConditionStep::Left => {
                    write!(f, "expects relational operator in `{construct}` condition")
                }
                ConditionStep::Operator => {
                    write!(f, "expects operand after relational operator")
                }
                ConditionStep::Right => {
                    write!(f, "expects `)` or `&&` after comparison")
                }
                ConditionStep::Close => write!(f, "expects `{{` after `{construct}` condition"),
            },
            Self::ElseKeyword => write!(f, "expects `{{` or `if` after `else`"),
            Self::Error => write!(f, "rejected"),
        }
    }
}

/// What the automaton does upon a token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Go to the given state.
    Goto(ParserState),

    /// Open a block for the given construct and go to the given state inside
    /// it.
    PushAndGoto(ConstructKind, ParserState),

    /// Close the innermost open block and resume the state saved when it was
    /// opened.
    Pop,
}

type Row = EnumMap<TokenKind, Option<Transition>>;

/// The state transition table.
#[derive(Debug)]
pub struct Grammar {
    rows: HashMap<ParserState, Row>,
}

static GRAMMAR: LazyLock<Grammar> = LazyLock::new(Grammar::new);

fn operands() -> impl Iterator<Item = TokenKind> {
    all::<TokenKind>().filter(TokenKind::is_operand)
}

impl Grammar {
    /// Returns the grammar, which is built the first time it is needed and
    /// then shared.
    pub fn get() -> &'static Self {
        &GRAMMAR
    }

    fn new() -> Self {
        use ParserState::*;
        use TokenKind as K;
        use Transition::*;

        let mut grammar = Self {
            rows: HashMap::new(),
        };

        for state in [Start, AfterIfBlock] {
            grammar.add(state, [K::IntType, K::FloatType], Goto(DeclType));
            grammar.add(state, [K::Identifier], Goto(AssignTarget));
            grammar.add(state, [K::Print], Goto(PrintKeyword));
            grammar.add(
                state,
                [K::If],
                Goto(Condition(ConstructKind::If, ConditionStep::Keyword)),
            );
            grammar.add(
                state,
                [K::While],
                Goto(Condition(ConstructKind::While, ConditionStep::Keyword)),
            );
            grammar.add(state, [K::LCurly], PushAndGoto(ConstructKind::Block, Start));
            grammar.add(state, [K::RCurly], Pop);
        }
        grammar.add(AfterIfBlock, [K::Else], Goto(ElseKeyword));

        grammar.add(DeclType, [K::Identifier], Goto(DeclName));
        grammar.add(DeclName, [K::Semicolon], Goto(Start));
        grammar.add(DeclName, [K::Assign], Goto(DeclInit));
        grammar.add(DeclName, [K::Comma], Goto(DeclType));
        grammar.add(DeclInit, operands(), Goto(DeclValue));
        grammar.add(DeclValue, [K::Semicolon], Goto(Start));
        grammar.add(DeclValue, [K::Comma], Goto(DeclType));

        grammar.add(AssignTarget, [K::Assign], Goto(AssignValue));
        grammar.add(AssignValue, operands(), Goto(AssignOperand));
        grammar.add(AssignOperand, [K::Semicolon], Goto(Start));
        grammar.add(
            AssignOperand,
            all::<TokenKind>().filter(TokenKind::is_arithmetic),
            Goto(AssignOperator),
        );
        grammar.add(AssignOperator, operands(), Goto(AssignOperand));

        grammar.add(PrintKeyword, [K::LParen], Goto(PrintOpen));
        grammar.add(PrintKeyword, operands(), Goto(PrintEnd));
        grammar.add(PrintOpen, operands(), Goto(PrintArgument));
        grammar.add(PrintArgument, [K::RParen], Goto(PrintEnd));
        grammar.add(PrintEnd, [K::Semicolon], Goto(Start));

        for construct in [ConstructKind::If, ConstructKind::While] {
            let step = |step| Condition(construct, step);
            grammar.add(
                step(ConditionStep::Keyword),
                [K::LParen],
                Goto(step(ConditionStep::Open)),
            );
            grammar.add(
                step(ConditionStep::Open),
                operands(),
                Goto(step(ConditionStep::Left)),
            );
            grammar.add(
                step(ConditionStep::Left),
                all::<TokenKind>().filter(TokenKind::is_relational),
                Goto(step(ConditionStep::Operator)),
            );
            grammar.add(
                step(ConditionStep::Operator),
                operands(),
                Goto(step(ConditionStep::Right)),
            );
            grammar.add(
                step(ConditionStep::Right),
                [K::RParen],
                Goto(step(ConditionStep::Close)),
            );
            grammar.add(
                step(ConditionStep::Right),
                [K::And],
                Goto(step(ConditionStep::Open)),
            );
            grammar.add(
                step(ConditionStep::Close),
                [K::LCurly],
                PushAndGoto(construct, Start),
            );
        }

        grammar.add(ElseKeyword, [K::LCurly], PushAndGoto(ConstructKind::Else, Start));
        grammar.add(
            ElseKeyword,
            [K::If],
            Goto(Condition(ConstructKind::If, ConditionStep::Keyword)),
        );

        grammar
    }

    fn add<I>(&mut self, state: ParserState, kinds: I, transition: Transition)
    where
        I: IntoIterator<Item = TokenKind>,
    {
        let row = self.rows.entry(state).or_default();
        for kind in kinds {
            debug_assert!(row[kind].is_none(), "duplicate transition for {state:?} {kind:?}");
            row[kind] = Some(transition);
        }
    }

    /// Returns what to do upon a token of the given `kind` in `state`, or
    /// `None` if such a token is a syntax error there.
    pub fn transition(&self, state: ParserState, kind: TokenKind) -> Option<Transition> {
        self.rows.get(&state).and_then(|row| row[kind])
    }

    /// Returns the token kinds that have a transition from `state`, in the
    /// order that [TokenKind] declares them.
    pub fn expected(&self, state: ParserState) -> Vec<TokenKind> {
        all::<TokenKind>()
            .filter(|kind| self.transition(state, *kind).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use enum_iterator::all;

    use crate::lex::TokenKind;

    use super::{ConditionStep, ConstructKind, Grammar, ParserState, Transition};

    #[test]
    fn every_state_but_error_has_a_way_out() {
        let grammar = Grammar::get();
        for state in ParserState::all() {
            let expected = grammar.expected(state);
            assert_eq!(expected.is_empty(), state == ParserState::Error, "{state:?}");
        }
    }

    #[test]
    fn every_state_is_reachable() {
        let grammar = Grammar::get();
        let mut reached = HashSet::from([ParserState::Start]);
        let mut queue = vec![ParserState::Start];
        while let Some(state) = queue.pop() {
            for kind in all::<TokenKind>() {
                let next = match grammar.transition(state, kind) {
                    Some(Transition::Goto(next)) | Some(Transition::PushAndGoto(_, next)) => {
                        vec![next]
                    }
                    Some(Transition::Pop) => {
                        all::<ConstructKind>().map(|c| c.resume_state()).collect()
                    }
                    None => Vec::new(),
                };
                for next in next {
                    if reached.insert(next) {
                        queue.push(next);
                    }
                }
            }
        }
        for state in ParserState::all().filter(|state| *state != ParserState::Error) {
            assert!(reached.contains(&state), "{state:?} is unreachable");
        }
    }

    #[test]
    fn comments_are_never_in_the_table() {
        let grammar = Grammar::get();
        for state in ParserState::all() {
            assert_eq!(grammar.transition(state, TokenKind::Comment), None);
        }
    }

    #[test]
    fn else_only_after_if_block() {
        let grammar = Grammar::get();
        assert_eq!(grammar.transition(ParserState::Start, TokenKind::Else), None);
        assert_eq!(
            grammar.transition(ParserState::AfterIfBlock, TokenKind::Else),
            Some(Transition::Goto(ParserState::ElseKeyword))
        );
        assert_eq!(ConstructKind::If.resume_state(), ParserState::AfterIfBlock);
        assert_eq!(ConstructKind::While.resume_state(), ParserState::Start);
        assert_eq!(ConstructKind::Else.resume_state(), ParserState::Start);
    }

    #[test]
    fn blocks_push_and_pop() {
        let grammar = Grammar::get();
        assert_eq!(
            grammar.transition(
                ParserState::Condition(ConstructKind::While, ConditionStep::Close),
                TokenKind::LCurly
            ),
            Some(Transition::PushAndGoto(
                ConstructKind::While,
                ParserState::Start
            ))
        );
        assert_eq!(
            grammar.transition(ParserState::Start, TokenKind::RCurly),
            Some(Transition::Pop)
        );
    }

    #[test]
    fn expected_after_assign() {
        assert_eq!(
            Grammar::get().expected(ParserState::AssignValue),
            [TokenKind::Identifier, TokenKind::Integer, TokenKind::Float]
        );
        assert_eq!(
            ParserState::AssignValue.to_string(),
            "expects operand after `=`"
        );
    }

    #[test]
    fn expected_after_comparison() {
        assert_eq!(
            Grammar::get().expected(ParserState::Condition(
                ConstructKind::If,
                ConditionStep::Right
            )),
            [TokenKind::And, TokenKind::RParen]
        );
    }
}
