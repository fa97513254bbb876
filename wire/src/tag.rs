//! Type tags and the headers that carry them.

use std::fmt;

use crate::error::DecodeError;

/// Wire type tags of the binary protocol.
///
/// `Stop` terminates a struct's field list and is never the type of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeTag {
    Stop = 0,
    Bool = 2,
    Byte = 3,
    Double = 4,
    I16 = 6,
    I32 = 8,
    I64 = 10,
    String = 11,
    Struct = 12,
    Map = 13,
    Set = 14,
    List = 15,
}

impl TypeTag {
    /// Parses a type tag from a raw byte.
    pub fn parse(tag: u8) -> Result<Self, DecodeError> {
        match tag {
            0 => Ok(Self::Stop),
            2 => Ok(Self::Bool),
            3 => Ok(Self::Byte),
            4 => Ok(Self::Double),
            6 => Ok(Self::I16),
            8 => Ok(Self::I32),
            10 => Ok(Self::I64),
            11 => Ok(Self::String),
            12 => Ok(Self::Struct),
            13 => Ok(Self::Map),
            14 => Ok(Self::Set),
            15 => Ok(Self::List),
            _ => Err(DecodeError::UnknownTypeTag { tag }),
        }
    }

    /// Returns the raw tag byte.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Payload size for tags with a fixed-width encoding.
    #[must_use]
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Bool | Self::Byte => Some(1),
            Self::I16 => Some(2),
            Self::I32 => Some(4),
            Self::I64 | Self::Double => Some(8),
            Self::Stop | Self::String | Self::Struct | Self::Map | Self::Set | Self::List => None,
        }
    }

    /// Smallest possible encoded size of a value with this tag.
    #[must_use]
    pub const fn min_width(self) -> usize {
        match self {
            Self::Stop => 0,
            Self::Struct => 1,
            Self::String => 4,
            Self::List | Self::Set => 5,
            Self::Map => 6,
            Self::Bool | Self::Byte => 1,
            Self::I16 => 2,
            Self::I32 => 4,
            Self::I64 | Self::Double => 8,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Double => "double",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::String => "string",
            Self::Struct => "struct",
            Self::Map => "map",
            Self::Set => "set",
            Self::List => "list",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The `{type, id}` pair preceding a field's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldHeader {
    pub tag: TypeTag,
    pub id: u16,
}

impl FieldHeader {
    #[must_use]
    pub const fn new(tag: TypeTag, id: u16) -> Self {
        Self { tag, id }
    }
}

/// Header of a list or set: element type and element count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListHeader {
    pub elem: TypeTag,
    pub len: usize,
}

/// Header of a map: key type, value type and entry count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapHeader {
    pub key: TypeTag,
    pub value: TypeTag,
    pub len: usize,
}
