use std::{
    borrow::Cow,
    io,
    path::{Path, PathBuf},
};

use super::Error;

/// A trait for providing the text of source files.
pub trait FileProvider {
    /// Reads the contents of the file at the given path as UTF-8 text.
    ///
    /// # Errors
    /// - If the file does not exist or cannot be opened.
    /// - If the file is not valid UTF-8.
    fn read_str<P: AsRef<Path>>(&self, path: P) -> Result<Cow<str>, Error>;
}

/// Provides file contents from the file system, relative to a root directory.
#[derive(Debug, Clone)]
pub struct FsProvider {
    root: PathBuf,
}

impl Default for FsProvider {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

impl<P> From<P> for FsProvider
where
    P: Into<PathBuf>,
{
    fn from(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl FileProvider for FsProvider {
    fn read_str<P: AsRef<Path>>(&self, path: P) -> Result<Cow<str>, Error> {
        let full_path = self.root.join(path.as_ref());
        let bytes = std::fs::read(&full_path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                Error::IoError(format!("Cannot open file {}", path.as_ref().display()))
            }
            _ => Error::IoError(err.to_string()),
        })?;

        String::from_utf8(bytes)
            .map(Cow::Owned)
            .map_err(|err| Error::Utf8Error(err.utf8_error()))
    }
}
