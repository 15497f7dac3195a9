//! Runtime type descriptors.
//!
//! A [`Type`] names the runtime shape of a [`Value`](crate::Value) and is the
//! key the conversion table dispatches on.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Runtime type descriptor.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// The nil type (only value: nil).
    Nil,
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit unsigned integer.
    UInt,
    /// 64-bit floating point.
    Float,
    /// Unicode scalar value.
    Char,
    /// String type.
    String,
    /// Optional wrapper around an underlying type.
    Option(Box<Type>),
    /// Enumerated type with a fixed, ordered set of integral constants.
    Enum(Arc<EnumDef>),
    /// Any type.
    Any,
}

impl Type {
    /// Creates an optional type.
    #[must_use]
    pub fn option(inner: Type) -> Self {
        Self::Option(Box::new(inner))
    }

    /// Creates an enumerated type from its definition.
    #[must_use]
    pub fn enumeration(def: EnumDef) -> Self {
        Self::Enum(Arc::new(def))
    }

    /// Returns true if this type is `Any`.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Returns true if this type can be nil.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        matches!(self, Self::Nil | Self::Option(_) | Self::Any)
    }

    /// Returns true for the integral types (`Int`, `UInt`).
    #[must_use]
    pub const fn is_integral(&self) -> bool {
        matches!(self, Self::Int | Self::UInt)
    }

    /// Returns true for the numeric types (`Int`, `UInt`, `Float`).
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::UInt | Self::Float)
    }

    /// Returns the wrapped type of an `Option`, or `None` for any other type.
    #[must_use]
    pub fn underlying(&self) -> Option<&Type> {
        match self {
            Self::Option(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }

    /// Returns the enum definition if this is an enumerated type.
    #[must_use]
    pub fn as_enum(&self) -> Option<&EnumDef> {
        match self {
            Self::Enum(def) => Some(def.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::UInt => write!(f, "uint"),
            Self::Float => write!(f, "float"),
            Self::Char => write!(f, "char"),
            Self::String => write!(f, "string"),
            Self::Option(t) => write!(f, "option<{t:?}>"),
            Self::Enum(def) => write!(f, "enum {}", def.name()),
            Self::Any => write!(f, "any"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Definition of an enumerated type: its name and its constants in
/// declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumDef {
    name: Arc<str>,
    constants: Vec<EnumConstant>,
}

impl EnumDef {
    /// Creates an enum definition with no constants.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            constants: Vec::new(),
        }
    }

    /// Appends a constant.
    #[must_use]
    pub fn with_constant(
        mut self,
        name: impl Into<Arc<str>>,
        value: impl Into<Discriminant>,
    ) -> Self {
        self.constants.push(EnumConstant {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the constants in declaration order.
    #[must_use]
    pub fn constants(&self) -> &[EnumConstant] {
        &self.constants
    }

    /// Finds a constant by its symbolic name.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<&EnumConstant> {
        self.constants.iter().find(|c| &*c.name == name)
    }
}

/// A single enumerated constant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumConstant {
    name: Arc<str>,
    value: Discriminant,
}

impl EnumConstant {
    /// Returns the symbolic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw discriminant.
    #[must_use]
    pub const fn discriminant(&self) -> Discriminant {
        self.value
    }

    /// Returns the underlying integral value as a [`Value`].
    #[must_use]
    pub const fn value(&self) -> Value {
        match self.value {
            Discriminant::Signed(n) => Value::Int(n),
            Discriminant::Unsigned(n) => Value::UInt(n),
        }
    }
}

/// The underlying integral representation of an enum constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Discriminant {
    /// Signed representation (covers every unsigned width below 64 bits).
    Signed(i64),
    /// 64-bit unsigned representation.
    Unsigned(u64),
}

macro_rules! signed_discriminant {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Discriminant {
                fn from(n: $ty) -> Self {
                    Self::Signed(i64::from(n))
                }
            }
        )*
    };
}

signed_discriminant!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Discriminant {
    fn from(n: u64) -> Self {
        Self::Unsigned(n)
    }
}
