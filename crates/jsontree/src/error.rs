use core::fmt;

/// Errors reported by parsing, serialization, and strict `Node` accessors.
#[derive(Debug)]
pub enum Error {
    /// Malformed input. The message embeds the byte offset and a windowed
    /// excerpt of the surrounding text with a caret under the offending byte.
    Parse {
        /// Byte offset into the input at which parsing failed.
        offset: usize,
        message: String,
    },
    /// A typed accessor was called on a node holding a different alternative.
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    /// Strict lookup (`at`, read-only indexing) on a key that is not present.
    MissingKey(String),
    /// File import/export failure, unrelated to JSON semantics.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse { offset, message } => {
                write!(f, "parse failure at byte {offset}: {message}")
            }
            Error::TypeMismatch { expected, actual } => {
                write!(f, "expected node to hold {expected}, but it holds {actual}")
            }
            Error::MissingKey(key) => {
                write!(f, "key {key:?} is not present in the object")
            }
            Error::Io(error) => write!(f, "I/O failure: {error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error)
    }
}
