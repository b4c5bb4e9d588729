//! Integer literal scanning.

use std::io::Read;

use crate::diagnostic::Category;
use crate::error::ScanResult;
use crate::lexer::Lexer;
use crate::token::{Kind, Position};

/// Value an out-of-range literal is clamped to.
pub const MAX_INT_LITERAL: i32 = i32::MAX;

impl<R: Read> Lexer<R> {
    /// Consumes the whole digit run. Overflow is reported once, at `start`,
    /// and the remaining digits are consumed without changing the value.
    pub(crate) fn lex_int_literal(&mut self, start: Position) -> ScanResult<Kind> {
        let mut value: i32 = 0;
        let mut clamped = false;

        while let Some(c) = self.cursor.peek()? {
            let Some(digit) = c.to_digit(10) else {
                break;
            };
            self.cursor.advance()?;

            if clamped {
                continue;
            }
            match value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit as i32))
            {
                Some(next) => value = next,
                None => {
                    clamped = true;
                    value = MAX_INT_LITERAL;
                    self.reporter
                        .report_category(start, Category::IntegerOverflow);
                }
            }
        }

        Ok(Kind::IntLiteral(value))
    }
}
