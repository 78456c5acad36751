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
    io::{Read, stdin},
    path::Path,
    process::ExitCode,
};

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use encoding_rs::Encoding;
use langcheck::lex::source::{SourceError, SourceFile, encoding_for_label};

use crate::{check::Check, tokens::Tokens};

mod check;
mod tokens;

/// Checks the syntax of programs in a minimal imperative language.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Debug)]
enum Command {
    Check(Check),
    Tokens(Tokens),
}

impl Command {
    fn run(self) -> Result<ExitCode> {
        match self {
            Command::Check(check) => check.run(),
            Command::Tokens(tokens) => tokens.run(),
        }
    }
}

/// Output format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human-readable text.
    Text,

    /// JSON.
    Json,
}

fn parse_encoding(arg: &str) -> Result<&'static Encoding, SourceError> {
    encoding_for_label(arg)
}

/// Reads `input`, or standard input if `input` is `-`.
fn read_source(input: &Path, encoding: Option<&'static Encoding>) -> Result<SourceFile> {
    if input == Path::new("-") {
        let mut bytes = Vec::new();
        stdin()
            .read_to_end(&mut bytes)
            .map_err(|error| anyhow!("reading standard input failed ({error})"))?;
        Ok(SourceFile::for_bytes(&bytes, None, encoding))
    } else {
        Ok(SourceFile::for_file(input, encoding)?)
    }
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    Cli::parse().command.run()
}
