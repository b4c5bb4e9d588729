//! Character cursor over a readable source.
//!
//! The cursor pulls the source in one line at a time, so arbitrarily large
//! inputs are scanned without being loaded whole. Line and column tracking
//! lives here and nowhere else.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read};

use crate::token::Position;

pub struct SourceCursor<R> {
    reader: BufReader<R>,
    /// Decoded characters not yet consumed.
    pending: VecDeque<char>,
    exhausted: bool,
    line: usize,
    column: usize,
}

impl<R: Read> SourceCursor<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
            pending: VecDeque::new(),
            exhausted: false,
            line: 1,
            column: 1,
        }
    }

    /// Returns the current character without consuming it, or `None` at the
    /// end of input.
    pub fn peek(&mut self) -> io::Result<Option<char>> {
        self.peek_nth(0)
    }

    /// Looks `offset` characters past the current one.
    pub fn peek_nth(&mut self, offset: usize) -> io::Result<Option<char>> {
        self.fill(offset + 1)?;
        Ok(self.pending.get(offset).copied())
    }

    /// Consumes the current character and returns it.
    pub fn advance(&mut self) -> io::Result<Option<char>> {
        self.fill(1)?;
        let consumed = self.pending.pop_front();
        match consumed {
            Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            Some(_) => self.column += 1,
            None => {}
        }
        Ok(consumed)
    }

    /// Consumes the current character if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> io::Result<bool> {
        if self.peek()? == Some(expected) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn is_at_end(&mut self) -> io::Result<bool> {
        Ok(self.peek()?.is_none())
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    fn fill(&mut self, wanted: usize) -> io::Result<()> {
        let mut chunk = String::new();
        while self.pending.len() < wanted && !self.exhausted {
            chunk.clear();
            if self.reader.read_line(&mut chunk)? == 0 {
                self.exhausted = true;
            } else {
                self.pending.extend(chunk.chars());
            }
        }
        Ok(())
    }
}
