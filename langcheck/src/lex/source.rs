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

//! Source files.

use std::{fs, io::Error as IoError, iter::once, path::Path, sync::Arc};

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use log::debug;
use thiserror::Error as ThisError;

/// Error reading a [SourceFile].
#[derive(ThisError, Debug)]
pub enum SourceError {
    /// The file could not be read.
    #[error("{file_name}: read failed ({error})")]
    Read {
        /// Name of the file.
        file_name: String,

        /// Underlying error.
        #[source]
        error: IoError,
    },

    /// An encoding label named no encoding.
    #[error("{0}: unknown encoding")]
    UnknownEncoding(String),
}

/// Returns the encoding with the given `label`, e.g. `utf-8` or `latin1`.
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, SourceError> {
    Encoding::for_label_no_replacement(label.as_bytes())
        .ok_or_else(|| SourceError::UnknownEncoding(String::from(label)))
}

/// A program's source text, held in memory as UTF-8, together with its file
/// name and the byte offset where each line starts.
pub struct SourceFile {
    /// `None` if this file was not read from a named file.
    file_name: Option<Arc<String>>,

    /// The encoding `contents` was decoded from.
    encoding: &'static Encoding,

    contents: String,

    /// Byte offsets into `contents` of starts of lines.  The first element is
    /// 0.
    lines: Vec<usize>,
}

impl SourceFile {
    /// Returns a `SourceFile` by reading `path` and recoding it from
    /// `encoding`, or from a guessed encoding if `encoding` is `None`.
    pub fn for_file<P>(path: P, encoding: Option<&'static Encoding>) -> Result<Self, SourceError>
    where
        P: AsRef<Path>,
    {
        let file_name = path.as_ref().to_string_lossy().to_string();
        let bytes = fs::read(path.as_ref()).map_err(|error| SourceError::Read {
            file_name: file_name.clone(),
            error,
        })?;
        Ok(Self::for_bytes(&bytes, Some(file_name), encoding))
    }

    /// Returns a `SourceFile` for `bytes`, recoding them from `encoding`, or
    /// from a guessed encoding if `encoding` is `None`.
    pub fn for_bytes(
        bytes: &[u8],
        file_name: Option<String>,
        encoding: Option<&'static Encoding>,
    ) -> Self {
        let encoding = encoding.unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });
        let (contents, malformed) = encoding.decode_with_bom_removal(bytes);
        if malformed {
            debug!(
                "{}: input is not valid {}",
                file_name.as_deref().unwrap_or("-"),
                encoding.name()
            );
        }
        Self::new(contents.into_owned(), file_name, encoding)
    }

    /// Creates a new `SourceFile` for `contents`, recording that `contents`
    /// was originally encoded in `encoding` and that it was read from
    /// `file_name`.
    pub fn new(contents: String, file_name: Option<String>, encoding: &'static Encoding) -> Self {
        let lines = once(0)
            .chain(contents.match_indices('\n').map(|(index, _s)| index + 1))
            .filter(|index| *index < contents.len())
            .collect::<Vec<_>>();
        Self {
            file_name: file_name.map(Arc::new),
            encoding,
            contents,
            lines,
        }
    }

    /// Returns a `SourceFile` for `contents`.
    pub fn for_string(contents: String) -> Self {
        Self::new(contents, None, UTF_8)
    }

    /// Returns the name of the file, if it was read from a named file.
    pub fn file_name(&self) -> Option<&Arc<String>> {
        self.file_name.as_ref()
    }

    /// Returns the encoding that the file was recoded from.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Returns the file's contents, in UTF-8.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Returns the text of 1-based line-number `line_number`, without its
    /// line ending, or `None` if there is no such line.
    pub fn get_line(&self, line_number: i32) -> Option<&str> {
        if (1..=self.lines.len() as i32).contains(&line_number) {
            let line_number = line_number as usize;
            let start = self.lines[line_number - 1];
            let end = self
                .lines
                .get(line_number)
                .copied()
                .unwrap_or(self.contents.len());
            Some(self.contents[start..end].strip_newline())
        } else {
            None
        }
    }
}

impl Default for SourceFile {
    fn default() -> Self {
        Self::for_string(String::new())
    }
}

trait StripNewline {
    fn strip_newline(&self) -> &str;
}

impl StripNewline for str {
    fn strip_newline(&self) -> &str {
        self.strip_suffix('\n')
            .map(|s| s.strip_suffix('\r').unwrap_or(s))
            .unwrap_or(self)
    }
}

#[cfg(test)]
mod tests {
    use encoding_rs::{UTF_8, WINDOWS_1252};

    use super::{SourceFile, encoding_for_label};

    #[test]
    fn lines() {
        let file = SourceFile::for_string(String::from("int x;\r\nx = 5;\n\nprint x;"));
        assert_eq!(file.get_line(0), None);
        assert_eq!(file.get_line(1), Some("int x;"));
        assert_eq!(file.get_line(2), Some("x = 5;"));
        assert_eq!(file.get_line(3), Some(""));
        assert_eq!(file.get_line(4), Some("print x;"));
        assert_eq!(file.get_line(5), None);
    }

    #[test]
    fn empty() {
        let file = SourceFile::default();
        assert_eq!(file.get_line(1), None);
        assert_eq!(file.contents(), "");
    }

    #[test]
    fn explicit_encoding() {
        let file = SourceFile::for_bytes(b"fun\xe7ao = 1;", None, Some(WINDOWS_1252));
        assert_eq!(file.contents(), "funçao = 1;");
        assert_eq!(file.encoding(), WINDOWS_1252);
    }

    #[test]
    fn bom_is_removed() {
        let file = SourceFile::for_bytes(b"\xef\xbb\xbfint x;", None, Some(UTF_8));
        assert_eq!(file.contents(), "int x;");
    }

    #[test]
    fn labels() {
        assert_eq!(encoding_for_label("latin1").unwrap(), WINDOWS_1252);
        assert!(encoding_for_label("no-such-encoding").is_err());
    }
}
