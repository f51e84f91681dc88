use std::fmt::Display;

use enum_as_inner::EnumAsInner;
use getset::Getters;

use crate::base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};

use super::token::MAX_IDENTIFIER_LENGTH;

/// Represents an error that occurred during the lexical analysis of the source code.
///
/// Each error accompanies a [`TokenKind::Bad`](super::token::TokenKind::Bad) token in the token
/// stream; reporting it never changes the tokens that are produced.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, EnumAsInner, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    UnterminatedString(#[from] UnterminatedString),
    #[error(transparent)]
    UnclosedBlockComment(#[from] UnclosedBlockComment),
    #[error(transparent)]
    MalformedNumeric(#[from] MalformedNumeric),
    #[error(transparent)]
    IdentifierTooLong(#[from] IdentifierTooLong),
    #[error(transparent)]
    UnexpectedCharacter(#[from] UnexpectedCharacter),
}

impl Error {
    /// Span of the source text the error is about.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::UnterminatedString(err) => &err.span,
            Self::UnclosedBlockComment(err) => &err.span,
            Self::MalformedNumeric(err) => &err.span,
            Self::IdentifierTooLong(err) => &err.span,
            Self::UnexpectedCharacter(err) => &err.span,
        }
    }
}

/// A `'` string literal reaches the end of its line or of the source without a closing quote.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Getters, thiserror::Error)]
pub struct UnterminatedString {
    /// Span of the opening quote and everything after it on the same line.
    #[get = "pub"]
    pub(super) span: Span,
}

impl Display for UnterminatedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an unterminated string literal"),
            SourceCodeDisplay::new(
                &self.span,
                Some("string literals must be closed with `'` on the line they start")
            )
        )
    }
}

/// Source code contains a `{` comment that is never closed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Getters, thiserror::Error)]
pub struct UnclosedBlockComment {
    /// Span of the opening `{`.
    #[get = "pub"]
    pub(super) span: Span,
}

impl Display for UnclosedBlockComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an unclosed `{` comment"),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// A numeric literal has a dangling `.`, a second `.` or an exponent without digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Getters, thiserror::Error)]
pub struct MalformedNumeric {
    /// Span of the whole malformed run.
    #[get = "pub"]
    pub(super) span: Span,
}

impl Display for MalformedNumeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found a malformed numeric literal"),
            SourceCodeDisplay::new(
                &self.span,
                Some("a fraction and an exponent must each contain at least one digit")
            )
        )
    }
}

/// An identifier is longer than [`MAX_IDENTIFIER_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Getters, thiserror::Error)]
pub struct IdentifierTooLong {
    /// Span of the identifier.
    #[get = "pub"]
    pub(super) span: Span,
}

impl Display for IdentifierTooLong {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!(
                    "identifier is {} characters long",
                    self.span.str().chars().count()
                )
            ),
            SourceCodeDisplay::new(
                &self.span,
                Some(format!(
                    "identifiers may be at most {MAX_IDENTIFIER_LENGTH} characters long"
                ))
            )
        )
    }
}

/// A character that starts no token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Getters, thiserror::Error)]
pub struct UnexpectedCharacter {
    /// Span of the character.
    #[get = "pub"]
    pub(super) span: Span,
}

impl Display for UnexpectedCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!("unexpected character `{}`", self.span.str())
            ),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{self, source_file::SourceFile};

    #[test]
    fn test_diagnostic_shows_source_line() {
        colored::control::set_override(false);

        let file = SourceFile::in_memory("unexpected.pas", "x := y # z;");
        let error = base::Error::from(Error::from(UnexpectedCharacter {
            span: Span::new(file, 7, 8).unwrap(),
        }));

        let rendered = error.to_string();

        assert!(rendered.starts_with("[error]: unexpected character `#`\n"));
        assert!(rendered.contains("unexpected.pas:1:8"));
        assert!(rendered.contains("1 | x := y # z;"));
    }
}
