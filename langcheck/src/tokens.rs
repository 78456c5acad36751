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
use langcheck::{SymbolTable, Token, tokenize};
use serde::Serialize;

use crate::{Format, parse_encoding, read_source};

/// List the tokens in a program.
#[derive(Args, Clone, Debug)]
pub struct Tokens {
    /// Program to scan, or `-` for standard input.
    input: PathBuf,

    /// The encoding to use for reading the input (if omitted, it is guessed).
    #[arg(short = 'e', long, value_parser = parse_encoding)]
    encoding: Option<&'static Encoding>,

    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: Format,

    /// Also print the symbol table.
    #[arg(short = 's', long)]
    symbols: bool,
}

#[derive(Serialize)]
struct Listing<'a> {
    tokens: &'a [Token],
    #[serde(skip_serializing_if = "Option::is_none")]
    symbols: Option<SymbolTable>,
}

impl Tokens {
    pub fn run(self) -> Result<ExitCode> {
        let file = read_source(&self.input, self.encoding)?;
        let tokens = tokenize(file.contents()).collect::<Vec<_>>();
        let symbols = self.symbols.then(|| SymbolTable::from_tokens(&tokens));

        let mut stdout = stdout().lock();
        match self.format {
            Format::Text => {
                for token in &tokens {
                    let kind = format!("{:?}", token.kind);
                    writeln!(stdout, "{kind:<12} {:<12} {}", token.lexeme, token.point)?;
                }
                if let Some(symbols) = &symbols {
                    writeln!(stdout)?;
                    write!(stdout, "{symbols}")?;
                }
            }
            Format::Json => {
                let listing = Listing {
                    tokens: &tokens,
                    symbols,
                };
                serde_json::to_writer_pretty(&mut stdout, &listing)?;
                writeln!(stdout)?;
            }
        }
        Ok(ExitCode::SUCCESS)
    }
}
