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

//! Diagnostic messages.
//!
//! A [Diagnostic] is what the command-line front end shows for a rejected
//! program or a skipped character: a location, a severity, a line of text,
//! and an excerpt of the source with the offending lexeme underlined.

use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    ops::Range,
    sync::Arc,
};

use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    lex::{scan::ScanError, source::SourceFile},
    validate::Rejection,
};

/// A line number and column number within a source file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Point {
    /// Line number, starting from 1.
    pub line: i32,

    /// Column number, starting from 1.
    ///
    /// Columns count characters, so a tab or a CJK character each advance the
    /// column by one.
    pub column: i32,
}

impl Default for Point {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl Point {
    pub const fn new(line: i32, column: i32) -> Self {
        Self { line, column }
    }

    /// Returns the point just past `text`, if `text` starts at `self`.
    pub fn advance(&self, text: &str) -> Self {
        text.chars().fold(*self, |point, c| point.advance_char(c))
    }

    /// Returns the point just past `c`, if `c` is at `self`.
    pub fn advance_char(&self, c: char) -> Self {
        if c == '\n' {
            Self::new(self.line + 1, 1)
        } else {
            Self::new(self.line, self.column + 1)
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Location relevant to a diagnostic message.
#[derive(Clone, Debug, Default)]
pub struct Location {
    pub file_name: Option<Arc<String>>,

    /// Starting and ending point, if any.  The end is exclusive.
    pub span: Option<Range<Point>>,
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if let Some(file_name) = &self.file_name {
            write!(f, "{file_name}")?;
        }

        if let Some(span) = &self.span {
            if self.file_name.is_some() {
                write!(f, ":")?;
            }
            let (l1, c1) = (span.start.line, span.start.column);
            let (l2, c2) = (span.end.line, span.end.column);
            if l2 > l1 {
                write!(f, "{l1}.{c1}-{l2}.{}", c2 - 1)?;
            } else if c2 - 1 > c1 {
                write!(f, "{l1}.{c1}-{}", c2 - 1)?;
            } else {
                write!(f, "{l1}.{c1}")?;
            }
        }
        Ok(())
    }
}

impl Location {
    pub fn is_empty(&self) -> bool {
        self.file_name.is_none() && self.span.is_none()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

pub struct Diagnostic {
    pub severity: Severity,
    pub location: Location,

    /// Source lines to show beneath the message, as `(line_number, line)`.
    pub source: Vec<(i32, String)>,
    pub text: String,
}

impl Diagnostic {
    /// Returns a diagnostic that explains `rejection`, quoting from `file`.
    pub fn for_rejection(rejection: &Rejection, file: &SourceFile) -> Self {
        let start = rejection.point;
        let end = start.advance(&rejection.lexeme);
        let end = if end == start { start.advance_char(' ') } else { end };
        Self::new(Severity::Error, file, start..end, rejection.to_string())
    }

    /// Returns a warning for a character that the scanner skipped.
    pub fn for_scan_error(error: &ScanError, file: &SourceFile) -> Self {
        let ScanError::UnexpectedChar { character, point } = error;
        Self::new(
            Severity::Warning,
            file,
            *point..point.advance_char(*character),
            error.to_string(),
        )
    }

    fn new(severity: Severity, file: &SourceFile, span: Range<Point>, text: String) -> Self {
        let source = (span.start.line..=span.end.line)
            .filter_map(|line_number| {
                file.get_line(line_number)
                    .map(|line| (line_number, String::from(line)))
            })
            .collect();
        Self {
            severity,
            location: Location {
                file_name: file.file_name().cloned(),
                span: Some(span),
            },
            source,
            text,
        }
    }
}

/// Returns the display width of the first `column - 1` characters of `line`.
fn display_column(line: &str, column: i32) -> usize {
    line.chars()
        .take(column.saturating_sub(1).max(0) as usize)
        .map(|c| if c == '\t' { 1 } else { c.width().unwrap_or(0) })
        .sum()
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if !self.location.is_empty() {
            write!(f, "{}: ", self.location)?;
        }
        write!(f, "{}: {}", self.severity, self.text)?;

        let Some(Range { start, end }) = &self.location.span else {
            return Ok(());
        };
        for (line_number, line) in &self.source {
            let line = line.replace('\t', " ");
            write!(f, "\n{line_number:5} | {line}")?;

            let c0 = if *line_number == start.line {
                display_column(&line, start.column)
            } else {
                0
            };
            let c1 = if *line_number == end.line {
                display_column(&line, end.column)
            } else {
                line.width()
            };
            write!(f, "\n      | ")?;
            for _ in 0..c0 {
                f.write_str(" ")?;
            }
            if *line_number == start.line {
                f.write_str("^")?;
                for _ in c0 + 1..c1 {
                    f.write_str("~")?;
                }
            } else {
                for _ in c0..c1 {
                    f.write_str("~")?;
                }
            }
        }
        Ok(())
    }
}

impl Debug for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::{check, lex::source::SourceFile, validate::Verdict};

    use super::{Diagnostic, Location, Point};

    #[test]
    fn advance() {
        let point = Point::default();
        assert_eq!(point.advance("abc"), Point::new(1, 4));
        assert_eq!(point.advance("ab\nc"), Point::new(2, 2));
        assert_eq!(point.advance("\n\n"), Point::new(3, 1));
        assert_eq!(point.advance("\tx"), Point::new(1, 3));
    }

    #[test]
    fn location_display() {
        let location = Location {
            file_name: None,
            span: Some(Point::new(3, 5)..Point::new(3, 8)),
        };
        assert_eq!(location.to_string(), "3.5-7");

        let location = Location {
            file_name: Some(String::from("prog.txt").into()),
            span: Some(Point::new(1, 2)..Point::new(1, 3)),
        };
        assert_eq!(location.to_string(), "prog.txt:1.2");
    }

    #[test]
    fn rejection_diagnostic() {
        let source = "int x;\nx = ;\n";
        let file = SourceFile::for_string(String::from(source));
        let Verdict::Rejected(rejection) = check(source) else {
            panic!("expected rejection");
        };
        let diagnostic = Diagnostic::for_rejection(&rejection, &file);
        assert_eq!(
            diagnostic.to_string(),
            "2.5: error: expected identifier, integer literal, or float literal, \
             found `;`\n    2 | x = ;\n      |     ^"
        );
    }

    #[test]
    fn underline_spans_lexeme() {
        let source = "whilex = 1;\nwhile (a > b) { } }";
        let file = SourceFile::for_string(String::from(source));
        let Verdict::Rejected(rejection) = check(source) else {
            panic!("expected rejection");
        };
        let diagnostic = Diagnostic::for_rejection(&rejection, &file);
        assert!(
            diagnostic
                .to_string()
                .ends_with("    2 | while (a > b) { } }\n      |                   ^"),
            "{diagnostic}"
        );
    }
}
