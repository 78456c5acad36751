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

use std::{
    io::{Write, stdout},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Result;
use clap::Args;
use encoding_rs::Encoding;
use langcheck::{
    Diagnostic, Scanner, Verdict,
    lex::{Token, scan::ScanError},
    validate,
};
use log::info;
use serde::Serialize;

use crate::{Format, parse_encoding, read_source};

/// Check whether a program is syntactically valid.
///
/// Prints `valid` or `invalid`, and for an invalid program a diagnostic that
/// points at the problem.  The exit status is nonzero for an invalid program.
#[derive(Args, Clone, Debug)]
pub struct Check {
    /// Program to check, or `-` for standard input.
    input: PathBuf,

    /// The encoding to use for reading the input (if omitted, it is guessed).
    #[arg(short = 'e', long, value_parser = parse_encoding)]
    encoding: Option<&'static Encoding>,

    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: Format,

    /// Warn about characters that were skipped because they do not begin any
    /// token.
    #[arg(short = 'w', long)]
    warn_skipped: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    file: Option<&'a str>,
    valid: bool,
    result: &'a Verdict,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

impl Check {
    pub fn run(self) -> Result<ExitCode> {
        let file = read_source(&self.input, self.encoding)?;

        let mut tokens = Vec::<Token>::new();
        let mut skipped = Vec::<ScanError>::new();
        for result in Scanner::new(file.contents()) {
            match result {
                Ok(token) => tokens.push(token),
                Err(error) => skipped.push(error),
            }
        }
        let verdict = validate(&tokens);
        info!(
            "{}: {verdict} ({} tokens, {} skipped characters)",
            self.input.display(),
            tokens.len(),
            skipped.len()
        );

        let warnings = if self.warn_skipped {
            skipped
                .iter()
                .map(|error| Diagnostic::for_scan_error(error, &file).to_string())
                .collect()
        } else {
            Vec::new()
        };

        let mut stdout = stdout().lock();
        match self.format {
            Format::Text => {
                for warning in &warnings {
                    writeln!(stdout, "{warning}")?;
                }
                writeln!(stdout, "{verdict}")?;
                if let Some(rejection) = verdict.rejection() {
                    writeln!(stdout, "{}", Diagnostic::for_rejection(rejection, &file))?;
                }
            }
            Format::Json => {
                let report = Report {
                    file: file.file_name().map(|name| name.as_str()),
                    valid: verdict.is_accepted(),
                    result: &verdict,
                    warnings,
                };
                serde_json::to_writer_pretty(&mut stdout, &report)?;
                writeln!(stdout)?;
            }
        }

        Ok(if verdict.is_accepted() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}
