//! The language's type model
//!
//! A type is either one of the basic numeric types (plus `void`) or a
//! pointer to another type. Equality is structural: two types match only
//! if they are the same kind and, recursively, point at the same type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Basic types, including `void`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicType {
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Void,
}

impl BasicType {
    /// Look up a basic type by its source spelling
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "i32" => Some(BasicType::I32),
            "u32" => Some(BasicType::U32),
            "i64" => Some(BasicType::I64),
            "u64" => Some(BasicType::U64),
            "f32" => Some(BasicType::F32),
            "f64" => Some(BasicType::F64),
            "void" => Some(BasicType::Void),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BasicType::I32 => "i32",
            BasicType::U32 => "u32",
            BasicType::I64 => "i64",
            BasicType::U64 => "u64",
            BasicType::F32 => "f32",
            BasicType::F64 => "f64",
            BasicType::Void => "void",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, BasicType::I32 | BasicType::U32 | BasicType::I64 | BasicType::U64)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, BasicType::F32 | BasicType::F64)
    }

    /// Check if this type is a signed integer
    pub fn is_signed(&self) -> bool {
        matches!(self, BasicType::I32 | BasicType::I64)
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A basic type or a pointer to another type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Basic(BasicType),
    Pointer(Box<Type>),
}

impl Type {
    pub fn void() -> Self {
        Type::Basic(BasicType::Void)
    }

    pub fn i32() -> Self {
        Type::Basic(BasicType::I32)
    }

    pub fn pointer_to(inner: Type) -> Self {
        Type::Pointer(Box::new(inner))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Basic(BasicType::Void))
    }

    /// Check if this is one of `i32 u32 i64 u64`
    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Basic(basic) if basic.is_integer())
    }

    /// Get the pointee type for pointer types
    pub fn pointee(&self) -> Option<&Type> {
        match self {
            Type::Pointer(inner) => Some(inner),
            Type::Basic(_) => None,
        }
    }
}

impl From<BasicType> for Type {
    fn from(basic: BasicType) -> Self {
        Type::Basic(basic)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Basic(basic) => write!(f, "{basic}"),
            Type::Pointer(inner) => write!(f, "*{inner}"),
        }
    }
}
