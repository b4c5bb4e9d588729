//! Non-fatal scanner diagnostics and the sinks that collect them.

use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::token::Position;

/// What went wrong. Every category is recoverable.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum Category {
    IllegalCharacter,
    UnterminatedComment,
    BadStringLiteral,
    UnterminatedStringLiteral,
    BadAndUnterminatedStringLiteral,
    IntegerOverflow,
}

impl Category {
    /// The fixed message reported for this category. Illegal characters
    /// append the offending character.
    pub fn message(&self) -> &'static str {
        match self {
            Category::IllegalCharacter => "illegal character ignored",
            Category::UnterminatedComment => "unterminated comment ignored",
            Category::BadStringLiteral => "string literal with bad escaped character ignored",
            Category::UnterminatedStringLiteral => "unterminated string literal ignored",
            Category::BadAndUnterminatedStringLiteral => {
                "unterminated string literal with bad escaped character ignored"
            }
            Category::IntegerOverflow => "integer literal too large; using max value",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Diagnostic {
    pub position: Position,
    pub category: Category,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}: {}", self.position, self.category, self.message)
    }
}

/// Append-only destination for diagnostics. Sinks may be shared by
/// scanners running on different threads.
pub trait DiagnosticSink: Send + Sync {
    fn append(&self, diagnostic: Diagnostic);
}

/// Keeps every diagnostic in memory, in arrival order.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    pub fn count(&self, category: Category) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|d| d.category == category)
            .count()
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn append(&self, diagnostic: Diagnostic) {
        self.entries.lock().push(diagnostic);
    }
}

/// Prints each diagnostic to stderr as it arrives.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn append(&self, diagnostic: Diagnostic) {
        eprintln!("{}", diagnostic);
    }
}

/// The single place the scanner sends diagnostics through.
#[derive(Clone)]
pub struct ErrorReporter {
    sink: Arc<dyn DiagnosticSink>,
    reported: usize,
}

impl ErrorReporter {
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink, reported: 0 }
    }

    pub fn report(&mut self, position: Position, category: Category, message: impl Into<String>) {
        let message = message.into();
        debug!(%position, %category, %message, "scanner diagnostic");
        self.reported += 1;
        self.sink.append(Diagnostic {
            position,
            category,
            message,
        });
    }

    /// Reports `category` with its fixed message.
    pub fn report_category(&mut self, position: Position, category: Category) {
        self.report(position, category, category.message());
    }

    pub fn reported(&self) -> usize {
        self.reported
    }
}

impl fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("reported", &self.reported)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn rendering_follows_line_col_category_message() {
        let diagnostic = Diagnostic {
            position: Position::new(4, 9),
            category: Category::IntegerOverflow,
            message: Category::IntegerOverflow.message().to_string(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "4:9: IntegerOverflow: integer literal too large; using max value"
        );
    }

    #[test]
    fn reporter_forwards_and_counts() {
        let log = Arc::new(DiagnosticLog::new());
        let mut reporter = ErrorReporter::new(log.clone());
        reporter.report_category(Position::new(1, 1), Category::BadStringLiteral);
        reporter.report(Position::new(2, 5), Category::IllegalCharacter, "illegal character ignored: #");

        assert_eq!(reporter.reported(), 2);
        assert_eq!(log.len(), 2);
        assert_eq!(log.count(Category::IllegalCharacter), 1);
        assert_eq!(log.snapshot()[1].message, "illegal character ignored: #");
        assert_eq!(log.take().len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn log_accepts_concurrent_appends() {
        let log = Arc::new(DiagnosticLog::new());
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let mut reporter = ErrorReporter::new(log.clone());
                thread::spawn(move || {
                    for column in 0..25 {
                        reporter.report_category(Position::new(n + 1, column + 1), Category::IllegalCharacter);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(log.len(), 100);
    }
}
