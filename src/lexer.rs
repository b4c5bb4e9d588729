use std::io::Read;
use tracing::trace;

use crate::cursor::SourceCursor;
use crate::diagnostic::{Category, ErrorReporter};
use crate::error::ScanResult;
use crate::token::{Kind, Position, Token};

/// Turns characters into tokens. Whitespace and comments are skipped,
/// malformed lexemes are reported and skipped, and the end of input comes
/// back as a `Kind::Eof` token.
pub struct Lexer<R> {
    pub(crate) cursor: SourceCursor<R>,
    pub(crate) reporter: ErrorReporter,
}

impl<R: Read> Lexer<R> {
    pub fn new(source: R, reporter: ErrorReporter) -> Self {
        Self {
            cursor: SourceCursor::new(source),
            reporter,
        }
    }

    pub fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    pub fn next_token(&mut self) -> ScanResult<Token> {
        loop {
            self.skip_whitespace_and_comments()?;

            let start = self.cursor.position();
            let Some(ch) = self.cursor.peek()? else {
                return Ok(Token::new(Kind::Eof, start));
            };

            let kind = match ch {
                c if c.is_ascii_alphabetic() || c == '_' => Some(self.lex_identifier()?),
                c if c.is_ascii_digit() => Some(self.lex_int_literal(start)?),
                '"' => self.lex_string_literal(start)?,
                c => self.lex_operator(c, start)?,
            };

            if let Some(kind) = kind {
                trace!(kind = kind.name(), position = %start, "token");
                return Ok(Token::new(kind, start));
            }
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> ScanResult<()> {
        loop {
            match self.cursor.peek()? {
                Some(' ' | '\t' | '\r' | '\n' | '\x0C') => {
                    self.cursor.advance()?;
                }
                Some('/') => match self.cursor.peek_nth(1)? {
                    Some('/') => self.skip_line_comment()?,
                    Some('*') => self.skip_block_comment()?,
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    /// Stops in front of the newline so it is skipped as whitespace.
    fn skip_line_comment(&mut self) -> ScanResult<()> {
        while let Some(c) = self.cursor.peek()? {
            if c == '\n' {
                break;
            }
            self.cursor.advance()?;
        }
        Ok(())
    }

    /// Block comments do not nest.
    fn skip_block_comment(&mut self) -> ScanResult<()> {
        let start = self.cursor.position();
        self.cursor.advance()?;
        self.cursor.advance()?;

        loop {
            match self.cursor.advance()? {
                Some('*') if self.cursor.peek()? == Some('/') => {
                    self.cursor.advance()?;
                    return Ok(());
                }
                Some(_) => {}
                None => {
                    self.reporter
                        .report_category(start, Category::UnterminatedComment);
                    return Ok(());
                }
            }
        }
    }

    fn lex_identifier(&mut self) -> ScanResult<Kind> {
        let mut ident = String::new();
        while let Some(c) = self.cursor.peek()? {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            ident.push(c);
            self.cursor.advance()?;
        }

        Ok(Kind::keyword(&ident).unwrap_or(Kind::Id(ident)))
    }

    /// Punctuation and operators, longest match first. Returns `None` after
    /// reporting a character that starts no lexeme.
    fn lex_operator(&mut self, ch: char, start: Position) -> ScanResult<Option<Kind>> {
        self.cursor.advance()?;

        let kind = match ch {
            '{' => Kind::LCurly,
            '}' => Kind::RCurly,
            '(' => Kind::LParen,
            ')' => Kind::RParen,
            ';' => Kind::Semicolon,
            ',' => Kind::Comma,
            '.' => Kind::Dot,
            '*' => Kind::Times,
            '/' => Kind::Divide,
            '<' => {
                if self.cursor.eat('<')? {
                    Kind::Write
                } else if self.cursor.eat('=')? {
                    Kind::LessEq
                } else {
                    Kind::Less
                }
            }
            '>' => {
                if self.cursor.eat('>')? {
                    Kind::Read
                } else if self.cursor.eat('=')? {
                    Kind::GreaterEq
                } else {
                    Kind::Greater
                }
            }
            '=' => {
                if self.cursor.eat('=')? {
                    Kind::Equals
                } else {
                    Kind::Assign
                }
            }
            '!' => {
                if self.cursor.eat('=')? {
                    Kind::NotEquals
                } else {
                    Kind::Not
                }
            }
            '+' => {
                if self.cursor.eat('+')? {
                    Kind::PlusPlus
                } else {
                    Kind::Plus
                }
            }
            '-' => {
                if self.cursor.eat('-')? {
                    Kind::MinusMinus
                } else {
                    Kind::Minus
                }
            }
            '&' if self.cursor.eat('&')? => Kind::And,
            '|' if self.cursor.eat('|')? => Kind::Or,
            c => {
                self.reporter.report(
                    start,
                    Category::IllegalCharacter,
                    format!("{}: {}", Category::IllegalCharacter.message(), c),
                );
                return Ok(None);
            }
        };

        Ok(Some(kind))
    }
}
