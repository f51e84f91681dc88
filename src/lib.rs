//! A lexical analyzer for a small Pascal-like language.
//!
//! The lexer turns source text into a flat [`TokenStream`](lexical::token_stream::TokenStream).
//! Every token carries its kind, its exact source text and the line and column it starts at.
//! Malformed input never aborts tokenization: it shows up as `BAD` tokens in the stream and is
//! reported to a [`Handler`](base::Handler).

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod base;
pub mod lexical;

use std::path::Path;

use base::{source_file::SourceFile, FileProvider, Handler, Result, VoidHandler};
use lexical::token_stream::TokenStream;

/// Reads the file at the given path and converts it to tokens.
///
/// # Errors
/// - If an error occurs while reading the file.
pub fn tokenize(
    handler: &impl Handler<base::Error>,
    file_provider: &impl FileProvider,
    path: &Path,
) -> Result<TokenStream> {
    tracing::info!("Tokenizing the source code at path: {}", path.display());

    let source_file = SourceFile::load(path, file_provider)?;

    Ok(TokenStream::tokenize(&source_file, handler))
}

/// Converts the given source text to tokens, discarding the diagnostics of malformed tokens.
#[must_use]
pub fn tokenize_str(source: &str) -> TokenStream {
    let source_file = SourceFile::in_memory("<memory>", source);

    TokenStream::tokenize(&source_file, &VoidHandler)
}
