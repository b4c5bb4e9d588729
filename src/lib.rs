//! Scanner for the C-- teaching language.
//!
//! [`TokenStream`] pulls characters from any [`std::io::Read`] source and
//! hands back one [`Token`] per call. Malformed input never stops the scan:
//! it is reported through an [`ErrorReporter`] as a [`Diagnostic`] and the
//! scanner carries on. Only a failure to read the source is fatal.
//!
//! ```
//! use std::sync::Arc;
//! use cmm_scanner::{DiagnosticLog, ErrorReporter, Kind, TokenStream};
//!
//! let log = Arc::new(DiagnosticLog::new());
//! let mut stream = TokenStream::from_text("x <<= 1;", ErrorReporter::new(log.clone()));
//! let kinds: Vec<Kind> = stream.tokenize().unwrap().into_iter().map(|t| t.kind).collect();
//! assert_eq!(kinds[1], Kind::Write);
//! assert_eq!(kinds[2], Kind::Assign);
//! assert!(log.is_empty());
//! ```

pub mod config;
pub mod cursor;
pub mod diagnostic;
pub mod error;
pub mod lexer;
pub mod number;
pub mod render;
pub mod stream;
pub mod string;
pub mod token;

pub use diagnostic::{Category, Diagnostic, DiagnosticLog, DiagnosticSink, ErrorReporter, StderrSink};
pub use error::{ScanError, ScanResult};
pub use lexer::Lexer;
pub use stream::{scan_text, TokenStream};
pub use token::{Kind, Position, Token};
