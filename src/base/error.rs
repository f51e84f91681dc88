/// An error that occurred while lexing a source file.
#[allow(missing_docs)]
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("An error occurred while working with Input/Output: {0}")]
    IoError(String),
    #[error(transparent)]
    Utf8Error(#[from] std::str::Utf8Error),
    #[error(transparent)]
    LexicalError(#[from] crate::lexical::Error),
    #[error("An error occurred: {0}")]
    Other(&'static str),
}

/// A specialized [`Result`] type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
