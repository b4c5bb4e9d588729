use std::io;
use std::path::PathBuf;

/// Failures that stop token production. Everything else the scanner runs
/// into is a [`Diagnostic`](crate::diagnostic::Diagnostic).
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to read source: {0}")]
    Io(#[from] io::Error),

    #[error("scan aborted by an earlier read failure")]
    Aborted,
}

pub type ScanResult<T> = Result<T, ScanError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value {value:?} for {key}")]
    InvalidOverride { key: &'static str, value: String },

    #[error("cannot write config file: {0}")]
    Write(#[from] io::Error),
}

/// Errors surfaced by the `cmmscan` driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("FileNotFoundError: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("IOError: {0}")]
    Io(#[from] io::Error),

    #[error("ScanError: {0}")]
    Scan(#[from] ScanError),

    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),

    #[error("JsonError: {0}")]
    Json(#[from] serde_json::Error),
}
