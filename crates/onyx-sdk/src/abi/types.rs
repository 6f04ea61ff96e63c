//! ABI type descriptors and runtime values

use onyx_primitives::Bytes32;
use onyx_types::{padded_len, WORD_SIZE};

use crate::SdkError;

/// Inline footprint of a vector: pointer, capacity, and length words
pub const VEC_DESCRIPTOR_SIZE: usize = 3 * WORD_SIZE;

/// Type descriptor for one ABI type.
///
/// A descriptor is immutable once resolved. Composite variants hold their
/// children fully resolved; a `Generic` placeholder must be substituted with
/// a concrete descriptor before any value is encoded against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit unsigned integer
    U64,
    /// Boolean
    Bool,
    /// 256-bit value (32 raw bytes)
    B256,
    /// Zero-sized unit
    Unit,
    /// Fixed-length string, `str[N]`
    StrArray(usize),
    /// Fixed-length array, `[T; N]`
    Array(Box<ParamType>, usize),
    /// Heap vector, `Vec<T>`
    Vector(Box<ParamType>),
    /// Struct with fields in declaration order
    Struct {
        /// Struct name
        name: String,
        /// Field types in declaration order
        fields: Vec<ParamType>,
    },
    /// Enum with variants in declaration order
    Enum {
        /// Enum name
        name: String,
        /// Variant payload types in declaration order
        variants: Vec<ParamType>,
    },
    /// Tuple
    Tuple(Vec<ParamType>),
    /// Unsubstituted generic type parameter
    Generic(String),
}

impl ParamType {
    /// Static encoded size in bytes, word-aligned.
    ///
    /// For enums this is the worst case over all variants, since the encoded
    /// size depends on which variant is selected. Fails for unsubstituted
    /// generics, whose size cannot be known.
    pub fn size_in_bytes(&self) -> Result<usize, SdkError> {
        match self {
            ParamType::U8 | ParamType::U16 | ParamType::U32 | ParamType::U64 | ParamType::Bool => {
                Ok(WORD_SIZE)
            }
            ParamType::B256 => Ok(32),
            ParamType::Unit => Ok(0),
            ParamType::StrArray(len) => Ok(padded_len(*len)),
            ParamType::Array(elem, len) => Ok(elem.size_in_bytes()? * len),
            ParamType::Vector(_) => Ok(VEC_DESCRIPTOR_SIZE),
            ParamType::Struct { fields, .. } => {
                fields.iter().try_fold(0, |acc, f| Ok(acc + f.size_in_bytes()?))
            }
            ParamType::Tuple(elems) => {
                elems.iter().try_fold(0, |acc, e| Ok(acc + e.size_in_bytes()?))
            }
            ParamType::Enum { variants, .. } => {
                let mut widest = 0;
                for variant in variants {
                    widest = widest.max(variant.size_in_bytes()?);
                }
                Ok(WORD_SIZE + widest)
            }
            ParamType::Generic(name) => Err(SdkError::UnresolvedGeneric(name.clone())),
        }
    }

    /// True when the type carries out-of-line heap data (contains a vector)
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Vector(_) => true,
            ParamType::Array(elem, _) => elem.is_dynamic(),
            ParamType::Struct { fields, .. } => fields.iter().any(ParamType::is_dynamic),
            ParamType::Enum { variants, .. } => variants.iter().any(ParamType::is_dynamic),
            ParamType::Tuple(elems) => elems.iter().any(ParamType::is_dynamic),
            _ => false,
        }
    }

    /// True when an unsubstituted generic remains anywhere in the tree
    pub fn contains_generic(&self) -> bool {
        match self {
            ParamType::Generic(_) => true,
            ParamType::Array(elem, _) | ParamType::Vector(elem) => elem.contains_generic(),
            ParamType::Struct { fields, .. } => fields.iter().any(ParamType::contains_generic),
            ParamType::Enum { variants, .. } => variants.iter().any(ParamType::contains_generic),
            ParamType::Tuple(elems) => elems.iter().any(ParamType::contains_generic),
            _ => false,
        }
    }

    /// First unbound generic name in the tree, if any
    pub fn first_generic(&self) -> Option<&str> {
        match self {
            ParamType::Generic(name) => Some(name),
            ParamType::Array(elem, _) | ParamType::Vector(elem) => elem.first_generic(),
            ParamType::Struct { fields: children, .. }
            | ParamType::Enum { variants: children, .. }
            | ParamType::Tuple(children) => children.iter().find_map(ParamType::first_generic),
            _ => None,
        }
    }

    /// Canonical signature string, hashed into function selectors
    pub fn signature(&self) -> String {
        match self {
            ParamType::U8 => "u8".to_string(),
            ParamType::U16 => "u16".to_string(),
            ParamType::U32 => "u32".to_string(),
            ParamType::U64 => "u64".to_string(),
            ParamType::Bool => "bool".to_string(),
            ParamType::B256 => "b256".to_string(),
            ParamType::Unit => "()".to_string(),
            ParamType::StrArray(len) => format!("str[{len}]"),
            ParamType::Array(elem, len) => format!("[{}; {}]", elem.signature(), len),
            ParamType::Vector(elem) => format!("v({})", elem.signature()),
            ParamType::Struct { fields, .. } => format!("s({})", joined_signatures(fields)),
            ParamType::Enum { variants, .. } => format!("e({})", joined_signatures(variants)),
            ParamType::Tuple(elems) => format!("({})", joined_signatures(elems)),
            ParamType::Generic(name) => name.clone(),
        }
    }
}

fn joined_signatures(params: &[ParamType]) -> String {
    params
        .iter()
        .map(ParamType::signature)
        .collect::<Vec<_>>()
        .join(",")
}

/// A runtime value shaped to encode against a [`ParamType`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// 8-bit unsigned integer
    U8(u8),
    /// 16-bit unsigned integer
    U16(u16),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit unsigned integer
    U64(u64),
    /// Boolean
    Bool(bool),
    /// 256-bit value
    B256(Bytes32),
    /// Unit value
    Unit,
    /// Fixed-length string
    StrArray(String),
    /// Fixed-length array elements
    Array(Vec<Token>),
    /// Vector elements
    Vector(Vec<Token>),
    /// Struct field values in declaration order
    Struct(Vec<Token>),
    /// Selected enum variant: discriminant plus payload
    Enum(u64, Box<Token>),
    /// Tuple element values
    Tuple(Vec<Token>),
}

impl Token {
    /// Extract a u64, widening smaller integers
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Token::U8(v) => Some(u64::from(*v)),
            Token::U16(v) => Some(u64::from(*v)),
            Token::U32(v) => Some(u64::from(*v)),
            Token::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Token::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<u8> for Token {
    fn from(v: u8) -> Self {
        Token::U8(v)
    }
}

impl From<u16> for Token {
    fn from(v: u16) -> Self {
        Token::U16(v)
    }
}

impl From<u32> for Token {
    fn from(v: u32) -> Self {
        Token::U32(v)
    }
}

impl From<u64> for Token {
    fn from(v: u64) -> Self {
        Token::U64(v)
    }
}

impl From<bool> for Token {
    fn from(v: bool) -> Self {
        Token::Bool(v)
    }
}
