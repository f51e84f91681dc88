//! Command line interface of the lexer.
//!
//! Reads a source file, tokenizes it and writes one line per token, either to a file or to
//! standard output.

use std::{
    fs::File,
    io::{self, BufWriter},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pascal_lexer::{
    base::{
        self,
        log::{Message, Severity},
        source_file::SourceFile,
        FsProvider, PrintHandler, VoidHandler,
    },
    lexical::token_stream::TokenStream,
};

/// Tokenizes a source file of a small Pascal-like language.
///
/// Every token is written as `KIND (line, column) "text"` on its own line.
#[derive(Parser, Debug)]
#[command(name = "pascal-lexer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tokenizes a source file of a small Pascal-like language", long_about = None)]
struct Cli {
    /// Source file to tokenize
    input: PathBuf,

    /// File to write the tokens to (default: standard output)
    output: Option<PathBuf>,

    /// Print a diagnostic to standard error for every malformed token
    #[arg(short, long, env = "PASCAL_LEXER_DIAGNOSTICS")]
    diagnostics: bool,

    /// Enable verbose logging
    #[arg(short, long, env = "PASCAL_LEXER_VERBOSE")]
    verbose: bool,

    /// Disable color output
    #[arg(long, env = "PASCAL_LEXER_NO_COLOR")]
    no_color: bool,
}

/// Errors that end the program with a failure exit code.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Cannot open file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: base::Error,
    },

    #[error("Error writing to file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match init_logging(cli.verbose, cli.no_color).and_then(|()| run(&cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", Message::new(Severity::Error, &err));
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing subscriber; `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool, no_color: bool) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let subscriber = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(!no_color)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let source_file =
        SourceFile::load(&cli.input, &FsProvider::default()).map_err(|source| {
            tracing::debug!(%source, "failed to read the input file");
            CliError::Read {
                path: cli.input.clone(),
                source,
            }
        })?;

    let tokens = if cli.diagnostics {
        TokenStream::tokenize(&source_file, &PrintHandler::new())
    } else {
        TokenStream::tokenize(&source_file, &VoidHandler)
    };

    tracing::info!(
        path = %source_file
            .path_relative()
            .unwrap_or_else(|| source_file.path().clone())
            .display(),
        tokens = tokens.len(),
        "Tokenized source file"
    );

    match &cli.output {
        Some(path) => write_tokens(&tokens, path),
        None => tokens
            .write_to(io::stdout().lock())
            .map_err(|source| CliError::Write {
                path: PathBuf::from("<stdout>"),
                source,
            }),
    }
}

fn write_tokens(tokens: &TokenStream, path: &Path) -> Result<(), CliError> {
    let to_write_error = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_write_error)?;
    tokens
        .write_to(BufWriter::new(file))
        .map_err(to_write_error)
}
