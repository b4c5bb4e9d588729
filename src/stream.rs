//! Pull-based token stream over a [`Lexer`].

use std::io::Read;
use std::sync::Arc;

use tracing::debug;

use crate::diagnostic::{Diagnostic, DiagnosticLog, ErrorReporter};
use crate::error::{ScanError, ScanResult};
use crate::lexer::Lexer;
use crate::token::{Kind, Position, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    Finished(Position),
    Failed,
}

/// Hands out one token per call. Once `Eof` has been produced the source is
/// never read again, and a read failure poisons the stream for good. To
/// scan again, build a new stream.
pub struct TokenStream<R> {
    lexer: Lexer<R>,
    state: State,
}

impl<R: Read> TokenStream<R> {
    pub fn new(source: R, reporter: ErrorReporter) -> Self {
        Self {
            lexer: Lexer::new(source, reporter),
            state: State::Scanning,
        }
    }

    pub fn next_token(&mut self) -> ScanResult<Token> {
        match self.state {
            State::Finished(position) => return Ok(Token::new(Kind::Eof, position)),
            State::Failed => return Err(ScanError::Aborted),
            State::Scanning => {}
        }

        match self.lexer.next_token() {
            Ok(token) => {
                if token.is_eof() {
                    debug!(
                        position = %token.position,
                        diagnostics = self.lexer.reporter().reported(),
                        "reached end of input"
                    );
                    self.state = State::Finished(token.position);
                }
                Ok(token)
            }
            Err(err) => {
                debug!(error = %err, "scan aborted");
                self.state = State::Failed;
                Err(err)
            }
        }
    }

    /// Collects every remaining token, `Eof` included.
    pub fn tokenize(&mut self) -> ScanResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Number of diagnostics this stream has reported so far.
    pub fn diagnostics_reported(&self) -> usize {
        self.lexer.reporter().reported()
    }
}

impl<'a> TokenStream<&'a [u8]> {
    pub fn from_text(text: &'a str, reporter: ErrorReporter) -> Self {
        Self::new(text.as_bytes(), reporter)
    }
}

/// Yields tokens up to, but not including, `Eof`. Stops after an error.
impl<R: Read> Iterator for TokenStream<R> {
    type Item = ScanResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != State::Scanning {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is_eof() => None,
            other => Some(other),
        }
    }
}

/// Scans a whole in-memory source, returning the tokens (ending in `Eof`)
/// and every diagnostic reported along the way.
pub fn scan_text(text: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let log = Arc::new(DiagnosticLog::new());
    let mut stream = TokenStream::from_text(text, ErrorReporter::new(log.clone()));
    let tokens = match stream.tokenize() {
        Ok(tokens) => tokens,
        // a &str is valid UTF-8 held in memory, so no read can fail
        Err(_) => Vec::new(),
    };
    (tokens, log.take())
}

#[cfg(test)]
mod tests {
    use std::io;

    use pretty_assertions::assert_eq;

    use super::*;

    /// Serves `good` and then fails every read.
    struct FailingReader<'a> {
        good: &'a [u8],
    }

    impl Read for FailingReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.good.is_empty() {
                return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
            }
            self.good.read(buf)
        }
    }

    fn stream(text: &str) -> (TokenStream<&[u8]>, Arc<DiagnosticLog>) {
        let log = Arc::new(DiagnosticLog::new());
        (TokenStream::from_text(text, ErrorReporter::new(log.clone())), log)
    }

    #[test]
    fn eof_is_sticky() {
        let (mut stream, _) = stream("x");
        assert_eq!(stream.next_token().unwrap().kind, Kind::Id("x".into()));
        let eof = stream.next_token().unwrap();
        assert_eq!(eof.kind, Kind::Eof);
        assert_eq!(eof.position, Position::new(1, 2));
        for _ in 0..3 {
            assert_eq!(stream.next_token().unwrap(), eof);
        }
    }

    #[test]
    fn empty_source_is_just_eof() {
        let (mut stream, log) = stream("");
        let tokens = stream.tokenize().unwrap();
        assert_eq!(tokens, vec![Token::new(Kind::Eof, Position::new(1, 1))]);
        assert!(log.is_empty());
    }

    #[test]
    fn iterator_stops_before_eof() {
        let (stream, _) = stream("a b");
        let kinds: Vec<Kind> = stream.map(|t| t.unwrap().kind).collect();
        assert_eq!(kinds, vec![Kind::Id("a".into()), Kind::Id("b".into())]);
    }

    #[test]
    fn read_failure_is_fatal_and_poisons_the_stream() {
        let log = Arc::new(DiagnosticLog::new());
        let reader = FailingReader { good: b"int x\n" };
        let mut stream = TokenStream::new(reader, ErrorReporter::new(log));

        assert_eq!(stream.next_token().unwrap().kind, Kind::Int);
        assert_eq!(stream.next_token().unwrap().kind, Kind::Id("x".into()));
        assert!(matches!(stream.next_token(), Err(ScanError::Io(_))));
        assert!(matches!(stream.next_token(), Err(ScanError::Aborted)));
    }

    #[test]
    fn iterator_yields_error_once() {
        let log = Arc::new(DiagnosticLog::new());
        let stream = TokenStream::new(FailingReader { good: b"" }, ErrorReporter::new(log));
        let items: Vec<_> = stream.collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }

    #[test]
    fn diagnostics_do_not_stop_the_stream() {
        let (mut stream, log) = stream("# 99999999999 \"bad\\q\" ok");
        let tokens = stream.tokenize().unwrap();
        let kinds: Vec<Kind> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![Kind::IntLiteral(i32::MAX), Kind::Id("ok".into()), Kind::Eof]
        );
        assert_eq!(log.len(), 3);
        assert_eq!(stream.diagnostics_reported(), 3);
    }

    #[test]
    fn scan_text_returns_tokens_and_diagnostics() {
        let (tokens, diagnostics) = scan_text("a @");
        assert_eq!(tokens.len(), 2);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "illegal character ignored: @");
    }
}
