//! Error types for wire format operations.

use std::fmt;
use std::io;

use bytestream::ByteError;

/// Result type for wire decoding.
pub type WireResult<T> = Result<T, DecodeError>;

/// Result type for wire encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors that can occur while decoding the binary protocol.
///
/// Every variant is fatal for the record being decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// A type tag byte that the protocol does not define.
    UnknownTypeTag { tag: u8 },

    /// The input ended in the middle of a value.
    Truncated { requested: usize, available: usize },

    /// The underlying reader failed.
    Io { kind: io::ErrorKind },

    /// A length or count prefix was negative.
    NegativeLength { length: i32 },

    /// A length or count prefix claims more than the input still holds.
    LengthExceedsRemaining { length: usize, remaining: usize },

    /// A string payload was not valid UTF-8.
    InvalidUtf8 { valid_up_to: usize },

    /// The byte stream does not follow the struct grammar.
    StructureMismatch { reason: StructureReason },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Ways a byte stream can violate the struct grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureReason {
    /// Input ended on a field boundary without a field-stop marker.
    MissingStop,
    /// A container header used the stop tag as an element, key or value type.
    StopElementType,
    /// A stop tag appeared where a value was expected.
    UnexpectedStop,
}

/// Specific decode limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    StringBytes,
    ContainerLength,
    Depth,
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A string, binary or container is too long for an `i32` length prefix.
    LengthOverflow { length: usize },
}

impl From<ByteError> for DecodeError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::UnexpectedEof {
                requested,
                available,
            } => Self::Truncated {
                requested,
                available,
            },
            ByteError::Io { kind } => Self::Io { kind },
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTypeTag { tag } => write!(f, "unknown type tag: {tag}"),
            Self::Truncated {
                requested,
                available,
            } => {
                write!(
                    f,
                    "truncated input: need {requested} bytes, have {available}"
                )
            }
            Self::Io { kind } => write!(f, "reader failed: {kind}"),
            Self::NegativeLength { length } => write!(f, "negative length prefix: {length}"),
            Self::LengthExceedsRemaining { length, remaining } => {
                write!(
                    f,
                    "length prefix {length} exceeds remaining input of {remaining} bytes"
                )
            }
            Self::InvalidUtf8 { valid_up_to } => {
                write!(f, "string is not valid utf-8 after byte {valid_up_to}")
            }
            Self::StructureMismatch { reason } => write!(f, "malformed struct: {reason}"),
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for StructureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::MissingStop => "input ended before field stop",
            Self::StopElementType => "container element type is stop",
            Self::UnexpectedStop => "stop tag where a value was expected",
        };
        write!(f, "{reason}")
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StringBytes => "string bytes",
            Self::ContainerLength => "container length",
            Self::Depth => "nesting depth",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthOverflow { length } => {
                write!(f, "length overflow: {length} does not fit an i32 prefix")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}
