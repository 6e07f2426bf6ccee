use std::fmt;
use std::io;
use std::path::PathBuf;

/// Unified error type for the skip list store.
///
/// Only persistence can fail. Duplicate inserts and deletes of absent keys
/// are reported through [`crate::InsertStatus`] and [`crate::DeleteStatus`].
#[derive(Debug)]
pub enum Error {
    /// IO error while reading or writing a snapshot.
    Io(io::Error),
    /// The snapshot file could not be opened or created.
    Open { path: PathBuf, source: io::Error },
    /// A snapshot line is not a valid `key:value;` record.
    MalformedRecord { line: usize, reason: &'static str },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO error: {e}"),
            Error::Open { path, source } => {
                write!(f, "Cannot open {}: {source}", path.display())
            }
            Error::MalformedRecord { line, reason } => {
                write!(f, "Malformed record at line {line}: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Open { source, .. } => Some(source),
            Error::MalformedRecord { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
