//! Token and wire-kind vocabulary shared by the reader and the writer.
use core::fmt;

use rmp::Marker;

/// The kind of value most recently produced or consumed.
///
/// Hosts use this to re-dispatch on values whose static type is unknown.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    BeginArray,
    BeginObject,
    String,
    Number,
    Boolean,
    Null,
}

/// Wire-level category of a MessagePack value.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Nil,
    Boolean,
    Integer,
    Float,
    String,
    Binary,
    Array,
    Map,
    Extension,
}

impl ValueKind {
    /// Classifies a marker byte. Returns `None` for the reserved marker.
    #[must_use]
    #[allow(clippy::enum_glob_use)]
    pub fn from_marker(marker: Marker) -> Option<Self> {
        use Marker::*;

        let kind = match marker {
            Null => Self::Nil,
            True | False => Self::Boolean,
            FixPos(_) | FixNeg(_) | U8 | U16 | U32 | U64 | I8 | I16 | I32 | I64 => Self::Integer,
            F32 | F64 => Self::Float,
            FixStr(_) | Str8 | Str16 | Str32 => Self::String,
            Bin8 | Bin16 | Bin32 => Self::Binary,
            FixArray(_) | Array16 | Array32 => Self::Array,
            FixMap(_) | Map16 | Map32 => Self::Map,
            FixExt1 | FixExt2 | FixExt4 | FixExt8 | FixExt16 | Ext8 | Ext16 | Ext32 => {
                Self::Extension
            }
            Reserved => return None,
        };
        Some(kind)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Binary => "binary",
            Self::Array => "array",
            Self::Map => "map",
            Self::Extension => "extension",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of an open container, on either side of the codec.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Array,
    Object,
}

impl ContainerKind {
    pub(crate) fn token(self) -> Token {
        match self {
            Self::Array => Token::BeginArray,
            Self::Object => Token::BeginObject,
        }
    }

    pub(crate) fn wire_kind(self) -> ValueKind {
        match self {
            Self::Array => ValueKind::Array,
            Self::Object => ValueKind::Map,
        }
    }
}
