//! Error types for byte-level operations.

use std::fmt;
use std::io;

/// Result type for byte-level operations.
pub type ByteResult<T> = Result<T, ByteError>;

/// Errors that can occur while reading bytes from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteError {
    /// Attempted to read past the end of the input.
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes that were actually available.
        available: usize,
    },

    /// The underlying reader failed with something other than end of input.
    Io {
        /// Kind of the underlying I/O error.
        kind: io::ErrorKind,
    },
}

impl fmt::Display for ByteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to read {requested} bytes but only {available} bytes available"
                )
            }
            Self::Io { kind } => write!(f, "reader failed: {kind}"),
        }
    }
}

impl std::error::Error for ByteError {}

impl From<io::Error> for ByteError {
    fn from(err: io::Error) -> Self {
        Self::Io { kind: err.kind() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unexpected_eof() {
        let err = ByteError::UnexpectedEof {
            requested: 8,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("8 bytes"), "should mention requested bytes");
        assert!(msg.contains("3 bytes"), "should mention available bytes");
        assert!(msg.contains("read"), "should mention read operation");
    }

    #[test]
    fn error_display_io() {
        let err = ByteError::Io {
            kind: io::ErrorKind::BrokenPipe,
        };
        let msg = err.to_string();
        assert!(msg.contains("reader failed"));
    }

    #[test]
    fn io_error_keeps_kind() {
        let err: ByteError = io::Error::new(io::ErrorKind::ConnectionReset, "gone").into();
        assert_eq!(
            err,
            ByteError::Io {
                kind: io::ErrorKind::ConnectionReset
            }
        );
    }

    #[test]
    fn error_equality() {
        let err1 = ByteError::UnexpectedEof {
            requested: 4,
            available: 1,
        };
        let err2 = err1.clone();
        let err3 = ByteError::UnexpectedEof {
            requested: 4,
            available: 2,
        };
        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<ByteError>();
    }
}
