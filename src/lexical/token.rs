//! Contains the [`Token`] struct and its related types.

use std::{collections::HashMap, fmt::Display, ops::Range, str::FromStr, sync::OnceLock};

use getset::CopyGetters;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

use crate::base::{
    self,
    source_file::{Position, Span},
    Handler,
};

use super::{
    cursor::Cursor,
    error::{
        IdentifierTooLong, MalformedNumeric, UnclosedBlockComment, UnexpectedCharacter,
        UnterminatedString,
    },
    Error,
};

/// Identifiers longer than this many characters are reported as malformed.
pub const MAX_IDENTIFIER_LENGTH: usize = 255;

/// Text of the malformed token that stands in for a `{` comment without a closing `}`.
pub const UNCLOSED_BLOCK_COMMENT_TEXT: &str = "Unclosed block comment";

/// Characters that end the run swallowed after a second `.` in a numeric literal.
const MALFORMED_NUMERIC_DELIMITERS: [char; 6] = [';', ',', ':', ')', ']', '}'];

/// Is an enumeration of all lexical categories a [`Token`] can have.
///
/// The names produced by [`Display`] are the stable upper snake case names, e.g. `LEFT_PAREN`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    IntoStaticStr,
    strum_macros::Display,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum TokenKind {
    Array,
    Begin,
    Else,
    End,
    If,
    Of,
    Or,
    Program,
    Procedure,
    Then,
    Type,
    Var,
    Multiplication,
    Plus,
    Minus,
    Divide,
    Semicolon,
    Comma,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Eq,
    Greater,
    Less,
    LessEq,
    GreaterEq,
    NotEq,
    Colon,
    Assign,
    Dot,
    Identifier,
    String,
    Integer,
    Float,
    /// Reserved; comments never produce tokens.
    LineComment,
    /// Reserved; comments never produce tokens.
    BlockComment,
    /// A malformed lexeme.
    Bad,
}

impl TokenKind {
    /// Gets the stable name of the kind, e.g. `GREATER_EQ`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Whether the kind is one of the reserved words.
    #[must_use]
    pub fn is_keyword(self) -> bool {
        KeywordKind::iter().any(|keyword| Self::from(keyword) == self)
    }

    /// Kind of a punctuation character that is never part of a two character operator.
    fn single_character(character: char) -> Option<Self> {
        let kind = match character {
            '*' => Self::Multiplication,
            '+' => Self::Plus,
            '-' => Self::Minus,
            '/' => Self::Divide,
            ';' => Self::Semicolon,
            ',' => Self::Comma,
            '(' => Self::LeftParen,
            ')' => Self::RightParen,
            '[' => Self::LeftBracket,
            ']' => Self::RightBracket,
            '=' => Self::Eq,
            '.' => Self::Dot,
            _ => return None,
        };

        Some(kind)
    }
}

/// Is an enumeration representing the reserved words of the language.
///
/// Keywords are matched case-sensitively: `VAR` is a keyword, `var` is an identifier.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum KeywordKind {
    Array,
    Begin,
    Else,
    End,
    If,
    Of,
    Or,
    Program,
    Procedure,
    Then,
    Type,
    Var,
}

impl Display for KeywordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Is an error that is returned when a string cannot be parsed into a [`KeywordKind`] in
/// [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, thiserror::Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static STRING_KEYWORD_MAP: OnceLock<HashMap<&'static str, KeywordKind>> = OnceLock::new();
        let map = STRING_KEYWORD_MAP.get_or_init(|| {
            Self::iter()
                .map(|keyword| (keyword.as_str(), keyword))
                .collect()
        });

        map.get(s).copied().ok_or(KeywordParseError)
    }
}

impl KeywordKind {
    /// Gets the source spelling of the keyword as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Array => "ARRAY",
            Self::Begin => "BEGIN",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::If => "IF",
            Self::Of => "OF",
            Self::Or => "OR",
            Self::Program => "PROGRAM",
            Self::Procedure => "PROCEDURE",
            Self::Then => "THEN",
            Self::Type => "TYPE",
            Self::Var => "VAR",
        }
    }
}

impl From<KeywordKind> for TokenKind {
    fn from(keyword: KeywordKind) -> Self {
        match keyword {
            KeywordKind::Array => Self::Array,
            KeywordKind::Begin => Self::Begin,
            KeywordKind::Else => Self::Else,
            KeywordKind::End => Self::End,
            KeywordKind::If => Self::If,
            KeywordKind::Of => Self::Of,
            KeywordKind::Or => Self::Or,
            KeywordKind::Program => Self::Program,
            KeywordKind::Procedure => Self::Procedure,
            KeywordKind::Then => Self::Then,
            KeywordKind::Type => Self::Type,
            KeywordKind::Var => Self::Var,
        }
    }
}

/// A classified lexeme together with the place it starts at.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, CopyGetters)]
pub struct Token {
    /// Get the lexical category of the token.
    #[get_copy = "pub"]
    kind: TokenKind,

    text: String,

    /// Get the position of the first character of the token.
    #[get_copy = "pub"]
    position: Position,

    span: Range<usize>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} \"{}\"", self.kind, self.position, self.text)
    }
}

/// Is an error that can occur when invoking the [`Token::tokenize`] method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum TokenizeError {
    /// Only whitespace and comments were left; the source is exhausted.
    #[error("the cursor is at the end of the source code.")]
    EndOfSourceCode,
}

impl Token {
    /// Creates a token from its parts.
    #[must_use]
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        position: Position,
        span: Range<usize>,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
            span,
        }
    }

    /// The exact source text of the token, including the quotes of string literals.
    ///
    /// For an unclosed block comment this is [`UNCLOSED_BLOCK_COMMENT_TEXT`] instead.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The byte range of the source the token was scanned from.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Whether the token represents a lexical error.
    #[must_use]
    pub fn is_bad(&self) -> bool {
        self.kind == TokenKind::Bad
    }

    /// Checks if the given character is a valid first character of an identifier.
    fn is_first_identifier_character(character: char) -> bool {
        character == '_' || character.is_alphabetic()
    }

    /// Checks if the given character is a valid character of an identifier.
    fn is_identifier_character(character: char) -> bool {
        character == '_' || character.is_alphanumeric()
    }

    /// Creates a token of the given kind from the start offset to the cursor.
    fn create(kind: TokenKind, cursor: &Cursor, start: usize, position: Position) -> Self {
        Self::new(kind, cursor.slice_from(start), position, start..cursor.offset())
    }

    /// Creates a [`TokenKind::Bad`] token from the start offset to the cursor and reports it.
    fn create_malformed(
        cursor: &Cursor,
        start: usize,
        position: Position,
        handler: &impl Handler<base::Error>,
        error: impl FnOnce(Span) -> Error,
    ) -> Self {
        let token = Self::create(TokenKind::Bad, cursor, start, position);
        tracing::debug!(%position, text = token.text(), "malformed token");

        handler.receive(error(cursor.span_from(start)));

        token
    }

    /// Skips a `//` comment including the line break that ends it.
    fn skip_line_comment(cursor: &mut Cursor) {
        cursor.walk(|character| character != '\n');
        cursor.advance();
    }

    /// Skips a `{ ... }` comment.
    ///
    /// Returns a malformed token if the source ends before the comment is closed.
    fn handle_block_comment(
        cursor: &mut Cursor,
        handler: &impl Handler<base::Error>,
    ) -> Option<Self> {
        let start = cursor.offset();
        let position = cursor.position();

        // the opening brace
        cursor.advance();

        while let Some(character) = cursor.advance() {
            if character == '}' {
                return None;
            }
        }

        tracing::debug!(%position, "unclosed block comment");

        let opening_span = Span::new(cursor.source_file().clone(), start, start + 1)
            .expect("`{` is a single byte character");
        handler.receive(Error::from(UnclosedBlockComment { span: opening_span }));

        Some(Self::new(
            TokenKind::Bad,
            UNCLOSED_BLOCK_COMMENT_TEXT,
            position,
            start..cursor.offset(),
        ))
    }

    /// Handles a numeric literal, with an optional fraction and exponent.
    ///
    /// Once the literal is found to be malformed, everything up to the next whitespace becomes
    /// part of the malformed token.
    fn handle_numeric_literal(cursor: &mut Cursor, handler: &impl Handler<base::Error>) -> Self {
        let start = cursor.offset();
        let position = cursor.position();

        let mut is_float = false;
        let mut is_invalid = false;

        cursor.walk(|character| character.is_ascii_digit());

        if cursor.advance_if(|character| character == '.') {
            is_float = true;

            if !cursor.current().is_some_and(|character| character.is_ascii_digit()) {
                is_invalid = true;
            }

            cursor.walk(|character| character.is_ascii_digit());

            if cursor.current() == Some('.') {
                is_invalid = true;
                cursor.walk(|character| {
                    !character.is_whitespace() && !MALFORMED_NUMERIC_DELIMITERS.contains(&character)
                });
            }
        }

        if !is_invalid && cursor.advance_if(|character| matches!(character, 'e' | 'E')) {
            is_float = true;

            cursor.advance_if(|character| matches!(character, '+' | '-'));

            if !cursor.current().is_some_and(|character| character.is_ascii_digit()) {
                is_invalid = true;
            }

            cursor.walk(|character| character.is_ascii_digit());
        }

        if is_invalid {
            cursor.walk(|character| !character.is_whitespace());

            return Self::create_malformed(cursor, start, position, handler, |span| {
                MalformedNumeric { span }.into()
            });
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Integer
        };

        Self::create(kind, cursor, start, position)
    }

    /// Handles a contiguous sequence of characters that are valid in an identifier.
    fn handle_identifier_and_keyword(
        cursor: &mut Cursor,
        handler: &impl Handler<base::Error>,
    ) -> Self {
        let start = cursor.offset();
        let position = cursor.position();

        cursor.walk(Self::is_identifier_character);

        let word = cursor.slice_from(start);

        if word.chars().count() > MAX_IDENTIFIER_LENGTH {
            return Self::create_malformed(cursor, start, position, handler, |span| {
                IdentifierTooLong { span }.into()
            });
        }

        let kind = KeywordKind::from_str(word).map_or(TokenKind::Identifier, TokenKind::from);

        Self::create(kind, cursor, start, position)
    }

    /// Handles a sequence of characters that are enclosed in single quotes.
    ///
    /// A literal may not span lines and has no escape sequences.
    fn handle_string_literal(cursor: &mut Cursor, handler: &impl Handler<base::Error>) -> Self {
        let start = cursor.offset();
        let position = cursor.position();

        // the opening quote
        cursor.advance();

        cursor.walk(|character| character != '\'' && character != '\n');

        if cursor.advance_if(|character| character == '\'') {
            Self::create(TokenKind::String, cursor, start, position)
        } else {
            Self::create_malformed(cursor, start, position, handler, |span| {
                UnterminatedString { span }.into()
            })
        }
    }

    /// Handles an operator or a punctuation character.
    fn handle_operator_or_punctuation(
        cursor: &mut Cursor,
        character: char,
        handler: &impl Handler<base::Error>,
    ) -> Self {
        let start = cursor.offset();
        let position = cursor.position();

        cursor.advance();

        let kind = match character {
            '>' => Some(if cursor.advance_if(|next| next == '=') {
                TokenKind::GreaterEq
            } else {
                TokenKind::Greater
            }),
            '<' => Some(if cursor.advance_if(|next| next == '=') {
                TokenKind::LessEq
            } else if cursor.advance_if(|next| next == '>') {
                TokenKind::NotEq
            } else {
                TokenKind::Less
            }),
            ':' => Some(if cursor.advance_if(|next| next == '=') {
                TokenKind::Assign
            } else {
                TokenKind::Colon
            }),
            _ => TokenKind::single_character(character),
        };

        match kind {
            Some(kind) => Self::create(kind, cursor, start, position),
            None => Self::create_malformed(cursor, start, position, handler, |span| {
                UnexpectedCharacter { span }.into()
            }),
        }
    }

    /// Lexes the next token from the given cursor.
    ///
    /// Whitespace and comments before the token are skipped. After the token is made, the
    /// cursor is left at the next character that is not part of the token. Malformed input
    /// results in a [`TokenKind::Bad`] token that is also reported to the handler.
    ///
    /// # Errors
    /// - [`TokenizeError::EndOfSourceCode`] - Nothing but whitespace and comments is left in
    ///   the source code.
    pub fn tokenize(
        cursor: &mut Cursor,
        handler: &impl Handler<base::Error>,
    ) -> Result<Self, TokenizeError> {
        while let Some(character) = cursor.current() {
            // Found white spaces
            if character.is_whitespace() {
                cursor.walk(char::is_whitespace);
            }
            // Found numeric literal
            else if character.is_ascii_digit() {
                return Ok(Self::handle_numeric_literal(cursor, handler));
            }
            // Found identifier/keyword
            else if Self::is_first_identifier_character(character) {
                return Ok(Self::handle_identifier_and_keyword(cursor, handler));
            }
            // Found string literal
            else if character == '\'' {
                return Ok(Self::handle_string_literal(cursor, handler));
            }
            // Found line comment
            else if character == '/' && cursor.peek() == Some('/') {
                Self::skip_line_comment(cursor);
            }
            // Found block comment
            else if character == '{' {
                if let Some(token) = Self::handle_block_comment(cursor, handler) {
                    return Ok(token);
                }
            }
            // Found operator or punctuation
            else {
                return Ok(Self::handle_operator_or_punctuation(
                    cursor, character, handler,
                ));
            }
        }

        Err(TokenizeError::EndOfSourceCode)
    }
}
