//! The lexical module is responsible for converting raw text into a stream of tokens that a
//! parser can understand.

pub mod cursor;

pub mod token_stream;

pub mod token;

mod error;
pub use error::{
    Error, IdentifierTooLong, MalformedNumeric, UnclosedBlockComment, UnexpectedCharacter,
    UnterminatedString,
};
