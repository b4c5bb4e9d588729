//! Golden-style rendering of a token stream for the `cmmscan` driver.

use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::token::{Kind, Token};

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct TokenRecord {
    pub kind: &'static str,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl From<&Token> for TokenRecord {
    fn from(token: &Token) -> Self {
        Self {
            kind: token.kind.name(),
            text: token.kind.to_string(),
            line: token.line(),
            column: token.column(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub tokens: Vec<TokenRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanReport {
    /// `Eof` is left out, matching the text rendering.
    pub fn new(tokens: &[Token], diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            tokens: tokens
                .iter()
                .filter(|t| !t.is_eof())
                .map(TokenRecord::from)
                .collect(),
            diagnostics,
        }
    }
}

/// One line per token, in canonical spelling.
pub fn render_text(tokens: &[Token], positions: bool) -> String {
    let mut out = String::new();
    for token in tokens.iter().filter(|t| !t.is_eof()) {
        if positions {
            out.push_str(&format!("{}\t{}\n", token.position, token.kind));
        } else {
            out.push_str(&format!("{}\n", token.kind));
        }
    }
    out
}

/// Reports every integer literal whose value differs from its line number.
pub fn check_lines(tokens: &[Token]) -> Vec<String> {
    int_literals(tokens)
        .filter(|(value, token)| *value as usize != token.line())
        .map(|(value, token)| {
            format!("wrong line number. intval = {}, linenum = {}", value, token.line())
        })
        .collect()
}

/// Reports every integer literal whose value differs from its column.
pub fn check_columns(tokens: &[Token]) -> Vec<String> {
    int_literals(tokens)
        .filter(|(value, token)| *value as usize != token.column())
        .map(|(value, token)| {
            format!("wrong char number. intval = {}, charnum = {}", value, token.column())
        })
        .collect()
}

fn int_literals(tokens: &[Token]) -> impl Iterator<Item = (i32, &Token)> {
    tokens.iter().filter_map(|token| match token.kind {
        Kind::IntLiteral(value) => Some((value, token)),
        _ => None,
    })
}
