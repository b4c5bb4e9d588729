//! String literal scanning and escape decoding.

use std::io::Read;

use crate::diagnostic::Category;
use crate::error::ScanResult;
use crate::lexer::Lexer;
use crate::token::{Kind, Position};

/// Decodes the character after a backslash, or `None` if the escape is not
/// one the language recognizes.
pub fn decode_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        '\'' => Some('\''),
        _ => None,
    }
}

impl<R: Read> Lexer<R> {
    /// Scans from the opening quote at `start`.
    ///
    /// Only a closed literal with valid escapes becomes a token. The three
    /// malformed shapes each produce exactly one diagnostic and no token;
    /// an unclosed literal leaves the newline (or end of input) unconsumed.
    pub(crate) fn lex_string_literal(&mut self, start: Position) -> ScanResult<Option<Kind>> {
        self.cursor.advance()?;

        let mut value = String::new();
        let mut bad_escape = false;

        let terminated = loop {
            match self.cursor.peek()? {
                None | Some('\n') => break false,
                Some('"') => {
                    self.cursor.advance()?;
                    break true;
                }
                Some('\\') => {
                    self.cursor.advance()?;
                    match self.cursor.peek()? {
                        // dangling backslash; the literal ends on the next pass
                        None | Some('\n') => bad_escape = true,
                        Some(escaped) => {
                            self.cursor.advance()?;
                            match decode_escape(escaped) {
                                Some(decoded) => value.push(decoded),
                                None => bad_escape = true,
                            }
                        }
                    }
                }
                Some(c) => {
                    self.cursor.advance()?;
                    value.push(c);
                }
            }
        };

        let category = match (terminated, bad_escape) {
            (true, false) => return Ok(Some(Kind::StringLiteral(value))),
            (true, true) => Category::BadStringLiteral,
            (false, false) => Category::UnterminatedStringLiteral,
            (false, true) => Category::BadAndUnterminatedStringLiteral,
        };
        self.reporter.report_category(start, category);
        Ok(None)
    }
}
