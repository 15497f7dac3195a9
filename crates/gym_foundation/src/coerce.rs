//! Typed coercion of dynamic values.
//!
//! [`coerce`] converts a [`Value`] into a statically requested Rust type and
//! reports why it could not. [`coerce_or_default`] is the best-effort
//! variant: it swallows every failure and returns the caller's fallback.
//!
//! ```
//! use gym_foundation::{coerce, coerce_or_default};
//!
//! assert_eq!(coerce::<i32>("1").unwrap(), 1);
//! assert_eq!(coerce_or_default::<i32>("a", 100), 100);
//! assert_eq!(coerce::<Option<u8>>(7i64).unwrap(), Some(7));
//! ```

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use crate::Result;
use crate::convert::{ConversionTable, standard_table, unexpected};
use crate::error::{ConversionFault, Error};
use crate::types::Type;
use crate::value::Value;

/// A Rust type that values can be coerced into.
pub trait Coerce: Sized {
    /// The runtime type a value must have before [`from_value`](Self::from_value).
    fn target() -> Type;

    /// Extracts `Self` from a value whose runtime type is [`target`](Self::target).
    ///
    /// # Errors
    ///
    /// Returns a fault when the value does not fit (e.g. narrowing an `Int`
    /// into `u8`).
    fn from_value(value: Value) -> std::result::Result<Self, ConversionFault>;

    /// Coerces a non-nil value through `table`.
    ///
    /// # Errors
    ///
    /// Returns the conversion table's error, or `InvalidConversion` when
    /// extraction fails.
    fn coerce_with(table: &ConversionTable, value: Value) -> Result<Self> {
        let from = value.value_type();
        let to = Self::target();

        // Identity fast path: no route lookup, no intermediate value
        if from == to || to.is_any() {
            return Self::from_value(value)
                .map_err(|cause| Error::invalid_conversion(from, to, cause));
        }

        let converted = table.convert(&value, &to)?;
        Self::from_value(converted).map_err(|cause| Error::invalid_conversion(from, to, cause))
    }
}

impl ConversionTable {
    /// Coerces `value` into `T` using this table's routes.
    ///
    /// # Errors
    ///
    /// - [`NullInput`](crate::ErrorKind::NullInput) for nil input
    /// - [`NullableConversionFailed`](crate::ErrorKind::NullableConversionFailed)
    ///   when `T` is an `Option` whose underlying type rejects the value
    /// - [`InvalidConversion`](crate::ErrorKind::InvalidConversion) otherwise
    pub fn coerce<T: Coerce>(&self, value: impl Into<Value>) -> Result<T> {
        let value = value.into();
        if value.is_nil() {
            return Err(Error::null_input());
        }
        T::coerce_with(self, value)
    }

    /// Coerces `value` into `T`, returning `default` on any failure.
    pub fn coerce_or_default<T: Coerce>(&self, value: impl Into<Value>, default: T) -> T {
        let value = value.into();
        let from = value.value_type();
        match self.coerce(value) {
            Ok(v) => v,
            Err(err) => {
                tracing::trace!(
                    %from,
                    to = %T::target(),
                    error = %err,
                    "coercion failed, using default"
                );
                default
            }
        }
    }
}

/// Coerces `value` into `T` using the standard conversion table.
///
/// # Errors
///
/// See [`ConversionTable::coerce`].
pub fn coerce<T: Coerce>(value: impl Into<Value>) -> Result<T> {
    standard_table().coerce(value)
}

/// Coerces `value` into `T` using the standard conversion table, returning
/// `default` on any failure (including nil input).
pub fn coerce_or_default<T: Coerce>(value: impl Into<Value>, default: T) -> T {
    standard_table().coerce_or_default(value, default)
}

/// Looks up `key` and coerces the stored value into `T`.
///
/// Returns `default` when the key is absent or the value cannot be coerced.
pub fn get_or_default<K, Q, S, T>(map: &HashMap<K, Value, S>, key: &Q, default: T) -> T
where
    K: Borrow<Q> + Hash + Eq,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
    T: Coerce,
{
    match map.get(key) {
        Some(value) => coerce_or_default(value.clone(), default),
        None => default,
    }
}

impl Coerce for Value {
    fn target() -> Type {
        Type::Any
    }

    fn from_value(value: Value) -> std::result::Result<Self, ConversionFault> {
        Ok(value)
    }
}

impl Coerce for bool {
    fn target() -> Type {
        Type::Bool
    }

    fn from_value(value: Value) -> std::result::Result<Self, ConversionFault> {
        value.as_bool().ok_or_else(|| unexpected(&value))
    }
}

macro_rules! coerce_signed {
    ($($ty:ty),*) => {
        $(
            impl Coerce for $ty {
                fn target() -> Type {
                    Type::Int
                }

                #[allow(clippy::useless_conversion)]
                fn from_value(value: Value) -> std::result::Result<Self, ConversionFault> {
                    match value {
                        Value::Int(n) => {
                            <$ty>::try_from(n).map_err(|_| ConversionFault::out_of_range(n))
                        }
                        other => Err(unexpected(&other)),
                    }
                }
            }
        )*
    };
}

macro_rules! coerce_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Coerce for $ty {
                fn target() -> Type {
                    Type::UInt
                }

                #[allow(clippy::useless_conversion)]
                fn from_value(value: Value) -> std::result::Result<Self, ConversionFault> {
                    match value {
                        Value::UInt(n) => {
                            <$ty>::try_from(n).map_err(|_| ConversionFault::out_of_range(n))
                        }
                        other => Err(unexpected(&other)),
                    }
                }
            }
        )*
    };
}

coerce_signed!(i8, i16, i32, i64, isize);
coerce_unsigned!(u8, u16, u32, u64, usize);

impl Coerce for f64 {
    fn target() -> Type {
        Type::Float
    }

    fn from_value(value: Value) -> std::result::Result<Self, ConversionFault> {
        value.as_float().ok_or_else(|| unexpected(&value))
    }
}

impl Coerce for f32 {
    fn target() -> Type {
        Type::Float
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> std::result::Result<Self, ConversionFault> {
        let n = value.as_float().ok_or_else(|| unexpected(&value))?;
        let narrowed = n as f32;
        if n.is_finite() && narrowed.is_infinite() {
            Err(ConversionFault::out_of_range(n))
        } else {
            Ok(narrowed)
        }
    }
}

impl Coerce for char {
    fn target() -> Type {
        Type::Char
    }

    fn from_value(value: Value) -> std::result::Result<Self, ConversionFault> {
        value.as_char().ok_or_else(|| unexpected(&value))
    }
}

impl Coerce for String {
    fn target() -> Type {
        Type::String
    }

    fn from_value(value: Value) -> std::result::Result<Self, ConversionFault> {
        value.as_str().map(ToOwned::to_owned).ok_or_else(|| unexpected(&value))
    }
}

impl Coerce for Arc<str> {
    fn target() -> Type {
        Type::String
    }

    fn from_value(value: Value) -> std::result::Result<Self, ConversionFault> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(unexpected(&other)),
        }
    }
}

/// Optional wrapper: converts to the underlying type and wraps in `Some`.
impl<T: Coerce> Coerce for Option<T> {
    fn target() -> Type {
        Type::option(T::target())
    }

    fn from_value(value: Value) -> std::result::Result<Self, ConversionFault> {
        if value.is_nil() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }

    fn coerce_with(table: &ConversionTable, value: Value) -> Result<Self> {
        if value.is_nil() {
            return Err(Error::null_input());
        }
        let from = value.value_type();
        T::coerce_with(table, value)
            .map(Some)
            .map_err(|_| Error::nullable_conversion_failed(from, Self::target()))
    }
}
