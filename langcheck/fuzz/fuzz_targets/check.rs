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

#![no_main]

use libfuzzer_sys::fuzz_target;
use langcheck::{Diagnostic, SourceFile, Validator, Verdict, tokenize};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut validator = Validator::new();
        for token in tokenize(input) {
            if validator.push(&token).is_err() {
                break;
            }
        }
        if let Verdict::Rejected(rejection) = validator.finish() {
            let file = SourceFile::for_string(String::from(input));
            let _ = Diagnostic::for_rejection(&rejection, &file).to_string();
        }
    }
});
