//! Contains the [`Cursor`] the scanners share while walking over a source file.

use std::sync::Arc;

use getset::CopyGetters;

use crate::base::source_file::{Position, SourceFile, Span};

/// A forward-only position in a source file that tracks line and column numbers.
///
/// The cursor always points at the character that has not been consumed yet. Advancing past a
/// `\n` moves to column 1 of the next line; any other character moves one column to the right.
#[derive(Debug, Clone, Copy, CopyGetters)]
pub struct Cursor<'a> {
    /// Get the source file the cursor walks over.
    #[get_copy = "pub"]
    source_file: &'a Arc<SourceFile>,

    /// Get the byte offset of the current character.
    #[get_copy = "pub"]
    offset: usize,

    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor pointing at the first character of the source file.
    #[must_use]
    pub fn new(source_file: &'a Arc<SourceFile>) -> Self {
        Self {
            source_file,
            offset: 0,
            line: Position::START.line,
            column: Position::START.column,
        }
    }

    fn rest(&self) -> &'a str {
        &self.source_file.content()[self.offset..]
    }

    /// The character at the cursor, or [`None`] at the end of the source.
    #[must_use]
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character after the current one, without consuming anything.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Whether all characters have been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.source_file.content().len()
    }

    /// The position of the current character.
    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// Consumes the current character and returns it.
    ///
    /// Does nothing at the end of the source.
    pub fn advance(&mut self) -> Option<char> {
        let character = self.current()?;

        self.offset += character.len_utf8();
        if character == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(character)
    }

    /// Consumes the current character if it satisfies the predicate.
    pub fn advance_if(&mut self, predicate: impl FnOnce(char) -> bool) -> bool {
        if self.current().is_some_and(predicate) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes characters while the predicate returns true.
    pub fn walk(&mut self, predicate: impl Fn(char) -> bool) {
        while self.advance_if(&predicate) {}
    }

    /// The source text from the given byte offset up to the cursor.
    #[must_use]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source_file.content()[start..self.offset]
    }

    /// The span from the given byte offset up to the cursor.
    #[must_use]
    pub fn span_from(&self, start: usize) -> Span {
        Span::new(self.source_file.clone(), start, self.offset)
            .expect("cursor offsets always lie on character boundaries")
    }
}
