//! Contains the [`TokenStream`] struct and its related types.

use std::{fmt::Display, io, sync::Arc};

use derive_more::Deref;
use itertools::Itertools;

use crate::base::{self, source_file::SourceFile, Handler};

use super::{
    cursor::Cursor,
    token::{Token, TokenizeError},
};

/// Is the ordered list of [`Token`]s of one source file.
///
/// This struct is the final output of the lexical analysis phase and is meant to be used by the
/// next stage of the compilation process. Malformed lexemes are part of the stream as
/// [`TokenKind::Bad`](super::token::TokenKind::Bad) tokens; there is no end-of-file token.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deref)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Tokenizes the given source file.
    ///
    /// This function calls [`Token::tokenize()`] repeatedly until the source is exhausted.
    /// Every malformed lexeme is reported to the handler and also kept in the stream.
    #[must_use]
    #[tracing::instrument(level = "debug", skip_all, fields(source_file = %source_file.path().display()))]
    pub fn tokenize(source_file: &Arc<SourceFile>, handler: &impl Handler<base::Error>) -> Self {
        let mut tokens = Vec::new();
        let mut cursor = Cursor::new(source_file);

        loop {
            match Token::tokenize(&mut cursor, handler) {
                Ok(token) => tokens.push(token),
                Err(TokenizeError::EndOfSourceCode) => break,
            }
        }

        tracing::debug!(
            tokens = tokens.len(),
            malformed = tokens.iter().filter(|token| token.is_bad()).count(),
            "Finished tokenizing"
        );

        Self { tokens }
    }

    /// Writes one line per token to the writer, in source order.
    ///
    /// # Errors
    /// - If writing to the writer fails.
    pub fn write_to(&self, mut writer: impl io::Write) -> io::Result<()> {
        for token in &self.tokens {
            writeln!(writer, "{token}")?;
        }

        writer.flush()
    }

    /// Dissolves this struct into its tokens.
    #[must_use]
    pub fn dissolve(self) -> Vec<Token> {
        self.tokens
    }
}

impl Display for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tokens.iter().format("\n"))
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}
