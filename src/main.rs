use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser as ClapParser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cmm_scanner::config::{Config, OutputFormat};
use cmm_scanner::error::DriverError;
use cmm_scanner::render::{self, ScanReport};
use cmm_scanner::{DiagnosticLog, ErrorReporter, StderrSink, Token, TokenStream};

#[derive(ClapParser)]
#[command(author, version, about = "C-- scanner driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every token of a source file, one per line
    Scan {
        /// Source file to scan
        path: PathBuf,
        /// Output format (defaults to the configured one)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Prefix each token with its line:column
        #[arg(long)]
        positions: bool,
    },
    /// Check that every integer literal equals the line it is on
    CheckLines {
        path: PathBuf,
    },
    /// Check that every integer literal equals the column it starts at
    CheckColumns {
        path: PathBuf,
    },
    /// Manage cmmscan configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init,
}

fn open_source(path: &Path) -> Result<File, DriverError> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DriverError::FileNotFound(path.to_path_buf()),
        _ => DriverError::Io(e),
    })
}

/// Scans with diagnostics going straight to stderr.
fn scan_to_stderr(path: &Path) -> Result<Vec<Token>, DriverError> {
    let reporter = ErrorReporter::new(Arc::new(StderrSink));
    let mut stream = TokenStream::new(open_source(path)?, reporter);
    let tokens = stream.tokenize()?;
    info!(
        path = %path.display(),
        tokens = tokens.len(),
        diagnostics = stream.diagnostics_reported(),
        "scan finished"
    );
    Ok(tokens)
}

fn run_scan(path: &Path, format: OutputFormat, positions: bool) -> Result<(), DriverError> {
    match format {
        OutputFormat::Text => {
            let tokens = scan_to_stderr(path)?;
            print!("{}", render::render_text(&tokens, positions));
        }
        OutputFormat::Json => {
            let log = Arc::new(DiagnosticLog::new());
            let mut stream = TokenStream::new(open_source(path)?, ErrorReporter::new(log.clone()));
            let tokens = stream.tokenize()?;
            let report = ScanReport::new(&tokens, log.take());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn run_check(path: &Path, check: fn(&[Token]) -> Vec<String>) -> Result<ExitCode, DriverError> {
    let tokens = scan_to_stderr(path)?;
    let mismatches = check(&tokens);
    for line in &mismatches {
        println!("{}", line);
    }
    if mismatches.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load().map_err(DriverError::from)?;
    init_logging(&config);

    match cli.command {
        Commands::Scan { path, format, positions } => {
            let format = format.unwrap_or(config.format);
            run_scan(&path, format, positions || config.positions)?;
        }
        Commands::CheckLines { path } => {
            return Ok(run_check(&path, render::check_lines)?);
        }
        Commands::CheckColumns { path } => {
            return Ok(run_check(&path, render::check_columns)?);
        }
        Commands::Config { command } => {
            let config_path = Config::get_config_path();
            match command {
                ConfigCommands::Show => {
                    println!("Config file: {}", config_path.display());
                    println!("{}", serde_json::to_string_pretty(&config)?);
                }
                ConfigCommands::Init => {
                    if config_path.exists() {
                        println!("Config file already exists at: {}", config_path.display());
                    } else {
                        Config::default().save_to(&config_path)?;
                        println!("Initialized new config file at: {}", config_path.display());
                    }
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
