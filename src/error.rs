use std::fmt;
use std::io;

/// Unified error type for the keyed store and its collaborators.
///
/// Table operations never fail: a missing key or payload is an empty
/// `Option`, not an error. Only the report sink and the sequence file
/// collaborators produce these.
#[derive(Debug)]
pub enum Error {
    /// IO error from the report sink or a sequence file.
    Io(io::Error),
    /// A sequence file line that is not a decimal 64-bit integer.
    Parse {
        /// 1-based line number in the source file.
        line: usize,
        content: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO error: {e}"),
            Error::Parse { line, content } => {
                write!(f, "Parse error at line {line}: {content:?} is not an integer")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parse { .. } => None,
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
