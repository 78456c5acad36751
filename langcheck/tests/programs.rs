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

use langcheck::{
    Diagnostic, SourceFile, SymbolTable, TokenKind, Verdict, check, tokenize,
    validate::Cause,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

const PROGRAM: &str = "\
# Computes a few things.
int teste, teste2 = 3;
float taxa = 2.32;
fator = 4.5;
if (4.5 > fator && taxa <= 2.32) {
    teste = teste2 * 2 + 1;
    print teste;
} else if (teste != 0) {
    while (teste > 0) {
        teste = teste - 1;
    }
} else {
    print(taxa);
}
";

#[test]
fn full_program() {
    assert_eq!(check(PROGRAM), Verdict::Accepted);
}

#[test]
fn full_program_with_error() {
    let source = PROGRAM.replace("teste - 1;", "teste - ;");
    let Verdict::Rejected(rejection) = check(&source) else {
        panic!("expected rejection");
    };
    assert_eq!(rejection.cause, Cause::UnexpectedToken);
    assert_eq!(rejection.point.line, 10);
    assert_eq!(rejection.depth, 2);

    let file = SourceFile::new(source, Some(String::from("prog.txt")), encoding_rs::UTF_8);
    let diagnostic = Diagnostic::for_rejection(&rejection, &file).to_string();
    assert!(
        diagnostic.starts_with("prog.txt:10.25: error: expected identifier"),
        "{diagnostic}"
    );
}

#[test]
fn symbol_table() {
    let table = SymbolTable::from_tokens(tokenize(PROGRAM));
    assert_eq!(table.get("teste"), Some(TokenKind::Identifier));
    assert_eq!(table.get("while"), Some(TokenKind::While));
    assert_eq!(table.get("2.32"), None);
    assert_eq!(
        table.iter().map(|(lexeme, _)| lexeme).collect::<Vec<_>>(),
        [
            "int", "teste", "teste2", "float", "taxa", "fator", "if", "print", "else", "while"
        ]
    );
}

/// Appends to `out` a random statement list nested no more than `depth` deep.
fn random_statements(rng: &mut StdRng, depth: usize, out: &mut String) {
    for _ in 0..rng.random_range(0..4) {
        let choice = if depth == 0 {
            rng.random_range(0..3)
        } else {
            rng.random_range(0..6)
        };
        match choice {
            0 => out.push_str("int a, b = 1;\n"),
            1 => out.push_str("a = a * 2 + b;\n"),
            2 => out.push_str("print(a);\n"),
            3 => {
                out.push_str("if (a < 10 && b >= 1) {\n");
                random_statements(rng, depth - 1, out);
                out.push_str("}\n");
                if rng.random_bool(0.5) {
                    out.push_str("else {\n");
                    random_statements(rng, depth - 1, out);
                    out.push_str("}\n");
                }
            }
            4 => {
                out.push_str("while (a != b) {\n");
                random_statements(rng, depth - 1, out);
                out.push_str("}\n");
            }
            _ => {
                out.push_str("{\n");
                random_statements(rng, depth - 1, out);
                out.push_str("}\n");
            }
        }
    }
}

#[test]
fn random_programs() {
    let mut rng = StdRng::seed_from_u64(0x1a2b);
    for _ in 0..200 {
        let mut program = String::new();
        random_statements(&mut rng, 4, &mut program);
        assert_eq!(check(&program), Verdict::Accepted, "{program}");

        // Truncating a valid program just before its final `}` leaves a block
        // open.
        if let Some(index) = program.rfind('}') {
            let truncated = &program[..index];
            assert!(!check(truncated).is_accepted(), "{truncated}");
        }
    }
}
