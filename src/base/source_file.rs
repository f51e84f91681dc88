//! Module for handling source files and locations within them.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    ops::Range,
    path::{Path, PathBuf},
    sync::Arc,
};

use getset::{CopyGetters, Getters};

use super::{file_provider::FileProvider, Error};

/// Represents a source file that contains the source code.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Getters)]
pub struct SourceFile {
    /// Get the path of the source file.
    #[get = "pub"]
    path: PathBuf,
    /// Get the identifier of the source file.
    #[get = "pub"]
    identifier: String,
    /// Get the content of the source file
    #[get = "pub"]
    content: String,
    lines: Vec<Range<usize>>,
}

#[allow(clippy::missing_fields_in_debug)]
impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("identifier", &self.identifier)
            .field("lines", &self.lines.len())
            .finish()
    }
}

impl SourceFile {
    fn new(path: PathBuf, identifier: String, content: String) -> Arc<Self> {
        let lines = get_line_byte_positions(&content);

        Arc::new(Self {
            path,
            identifier,
            content,
            lines,
        })
    }

    /// Creates a source file that only lives in memory.
    ///
    /// The identifier doubles as the path of the file.
    #[must_use]
    pub fn in_memory(identifier: impl Into<String>, content: impl Into<String>) -> Arc<Self> {
        let identifier = identifier.into();
        Self::new(PathBuf::from(&identifier), identifier, content.into())
    }

    /// Load the source file from the given file path.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when reading the file contents.
    /// - [`Error::Utf8Error`]: The file is not valid UTF-8.
    pub fn load(path: &Path, provider: &impl FileProvider) -> Result<Arc<Self>, Error> {
        let source = provider.read_str(path)?;
        let identifier = path
            .file_stem()
            .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned());

        Ok(Self::new(
            path.to_path_buf(),
            identifier,
            source.into_owned(),
        ))
    }

    /// Get the line of the source file at the given line number, without its line terminator.
    ///
    /// Numbering starts at 1.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }

        self.lines
            .get(line - 1)
            .map(|range| self.content[range.clone()].trim_end_matches(['\n', '\r']))
    }

    /// Get the number of lines in the source file.
    #[must_use]
    pub fn line_amount(&self) -> usize {
        self.lines.len()
    }

    /// Get the [`Position`] of a given byte index.
    ///
    /// The index one past the last byte is valid and refers to the end of the file.
    #[must_use]
    pub fn get_position(&self, byte_index: usize) -> Option<Position> {
        if !self.content.is_char_boundary(byte_index) {
            return None;
        }

        let line = if byte_index == self.content.len() {
            self.lines.len() - 1
        } else {
            self.line_index(byte_index)?
        };

        let line_start = self.lines[line].start;
        let column = self.content[line_start..byte_index].chars().count() + 1;

        Some(Position {
            line: line + 1,
            column,
        })
    }

    /// Index of the line containing the given byte index.
    fn line_index(&self, byte_index: usize) -> Option<usize> {
        self.lines
            .binary_search_by(|range| {
                if range.contains(&byte_index) {
                    Ordering::Equal
                } else if byte_index < range.start {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            })
            .ok()
    }

    /// Get the relative path of the source file from the current working directory.
    #[must_use]
    pub fn path_relative(&self) -> Option<PathBuf> {
        pathdiff::diff_paths(&self.path, std::env::current_dir().ok()?)
    }
}

/// Represents a range of bytes in a source file.
#[derive(Clone, Getters, CopyGetters)]
pub struct Span {
    /// Get the start byte index of the span.
    #[get_copy = "pub"]
    start: usize,

    /// Get the end byte index of the span (exclusive).
    #[get_copy = "pub"]
    end: usize,

    /// Get the source file that the span is located in.
    #[get = "pub"]
    source_file: Arc<SourceFile>,
}

#[allow(clippy::missing_fields_in_debug)]
impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Span")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("content", &self.str())
            .finish()
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source_file, &other.source_file)
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for Span {}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        let self_ptr_value = Arc::as_ptr(&self.source_file) as usize;
        let other_ptr_value = Arc::as_ptr(&other.source_file) as usize;

        self_ptr_value
            .cmp(&other_ptr_value)
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl std::hash::Hash for Span {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        Arc::as_ptr(&self.source_file).hash(state);
    }
}

impl Span {
    /// Create a span from the given start and end byte indices in the source file.
    ///
    /// Returns [`None`] if the indices are out of order, out of bounds or not on a character
    /// boundary.
    #[must_use]
    pub fn new(source_file: Arc<SourceFile>, start: usize, end: usize) -> Option<Self> {
        let content = source_file.content();
        if start > end || !content.is_char_boundary(start) || !content.is_char_boundary(end) {
            return None;
        }

        Some(Self {
            start,
            end,
            source_file,
        })
    }

    /// Get the string slice of the source code that the span represents.
    #[must_use]
    pub fn str(&self) -> &str {
        &self.source_file.content()[self.start..self.end]
    }

    /// Get the byte range of the span.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Get the starting [`Position`] of the span.
    #[must_use]
    pub fn start_position(&self) -> Position {
        self.source_file
            .get_position(self.start)
            .unwrap_or_default()
    }
}

/// A line and column pair pointing at a character in a source file.
///
/// Both numbers start at 1. Columns count characters, not bytes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number of the position (starts at 1).
    pub line: usize,

    /// Column number of the position (starts at 1).
    pub column: usize,
}

impl Position {
    /// The position of the first character of a file.
    pub const START: Self = Self { line: 1, column: 1 };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}

/// Get the byte ranges of the lines in the given text, including their `\n` terminator.
fn get_line_byte_positions(text: &str) -> Vec<Range<usize>> {
    let mut current_position = 0;
    let mut results = Vec::new();

    for (byte, _) in text.match_indices('\n') {
        results.push(current_position..byte + 1);
        current_position = byte + 1;
    }

    // add the last line
    results.push(current_position..text.len());

    results
}
