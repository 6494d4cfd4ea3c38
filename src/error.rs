use std::error::Error;
use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

/// A failure to open a raw source from a path.
///
/// Converting into [`io::Error`] keeps the original error kind, so callers that
/// only deal in I/O errors can still match on it.
#[derive(Debug)]
pub struct OpenError {
    path: PathBuf,
    source: io::Error,
}

impl OpenError {
    pub fn new(path: &Path, source: io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<OpenError> for io::Error {
    fn from(err: OpenError) -> Self {
        io::Error::new(err.source.kind(), err)
    }
}

impl Error for OpenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

impl Display for OpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot open {}: {}", self.path.display(), self.source)
    }
}
