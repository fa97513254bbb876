//! Error types for codec operations.

use std::fmt;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during record encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Malformed input; fatal for the record being decoded.
    Wire(wire::DecodeError),

    /// A payload could not be represented on the wire.
    Encode(wire::EncodeError),

    /// A record value does not have the type its schema declares.
    TypeMismatch {
        record: String,
        field: String,
        expected: String,
        found: &'static str,
    },

    /// A record holds a field its schema does not declare.
    UnknownField { record: String, field: String },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "decode error: {e}"),
            Self::Encode(e) => write!(f, "encode error: {e}"),
            Self::TypeMismatch {
                record,
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "field {record}.{field} expects {expected} but holds {found}"
                )
            }
            Self::UnknownField { record, field } => {
                write!(f, "record {record} has no field named {field:?}")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::TypeMismatch { .. } | Self::UnknownField { .. } => None,
        }
    }
}

impl From<wire::DecodeError> for CodecError {
    fn from(err: wire::DecodeError) -> Self {
        Self::Wire(err)
    }
}

impl From<wire::EncodeError> for CodecError {
    fn from(err: wire::EncodeError) -> Self {
        Self::Encode(err)
    }
}

impl From<bytestream::ByteError> for CodecError {
    fn from(err: bytestream::ByteError) -> Self {
        Self::Wire(err.into())
    }
}
