//! Conversion table: explicit `(source type, target type)` routes.
//!
//! The standard table covers numeric, string, bool and char
//! normalization. Callers extend a table by registering more routes instead
//! of relying on any runtime reflection.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::Result;
use crate::error::{ConversionFault, Error};
use crate::types::Type;
use crate::value::Value;

/// A single conversion route.
///
/// Routes receive a value whose runtime type is the route's source type and
/// must return a value of the route's target type.
pub type ConvertFn = fn(&Value) -> std::result::Result<Value, ConversionFault>;

/// Table of conversion routes keyed by `(source, target)`.
#[derive(Clone, Default)]
pub struct ConversionTable {
    routes: HashMap<(Type, Type), ConvertFn>,
}

impl ConversionTable {
    /// Creates a table with no routes.
    ///
    /// Identity conversions still succeed against an empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a table holding every standard route.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for &(from, to, route) in STANDARD_ROUTES {
            table.register(from.into(), to.into(), route);
        }
        table
    }

    /// Registers a route, returning the route it replaced.
    pub fn register(&mut self, from: Type, to: Type, route: ConvertFn) -> Option<ConvertFn> {
        self.routes.insert((from, to), route)
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with_route(mut self, from: Type, to: Type, route: ConvertFn) -> Self {
        self.register(from, to, route);
        self
    }

    /// Returns true if a route from `from` to `to` is registered.
    #[must_use]
    pub fn has_route(&self, from: &Type, to: &Type) -> bool {
        self.routes.contains_key(&(from.clone(), to.clone()))
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Converts a value to the requested runtime type.
    ///
    /// A value already of type `to` (or any value when `to` is `Any`) is
    /// returned unchanged. An `Option` target converts to its underlying
    /// type; nil input is rejected before any route is consulted.
    ///
    /// # Errors
    ///
    /// - [`NullInput`](crate::ErrorKind::NullInput) for nil input
    /// - [`NullableConversionFailed`](crate::ErrorKind::NullableConversionFailed)
    ///   when the underlying type of an `Option` target rejects the value
    /// - [`InvalidConversion`](crate::ErrorKind::InvalidConversion) when no
    ///   route exists or the route fails
    pub fn convert(&self, value: &Value, to: &Type) -> Result<Value> {
        if value.is_nil() {
            return Err(Error::null_input());
        }

        let from = value.value_type();
        if &from == to || to.is_any() {
            return Ok(value.clone());
        }

        if let Some(inner) = to.underlying() {
            return self
                .convert(value, inner)
                .map_err(|_| Error::nullable_conversion_failed(from, to.clone()));
        }

        let Some(route) = self.routes.get(&(from.clone(), to.clone())) else {
            return Err(Error::invalid_conversion(
                from,
                to.clone(),
                ConversionFault::NoRoute,
            ));
        };

        route(value).map_err(|cause| Error::invalid_conversion(from, to.clone(), cause))
    }
}

impl fmt::Debug for ConversionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self
            .routes
            .keys()
            .map(|(from, to)| format!("{from} -> {to}"))
            .collect();
        keys.sort();
        f.debug_struct("ConversionTable")
            .field("routes", &keys)
            .finish()
    }
}

/// Returns the process-wide standard table, building it on first use.
pub fn standard_table() -> &'static ConversionTable {
    static STANDARD: OnceLock<ConversionTable> = OnceLock::new();
    STANDARD.get_or_init(ConversionTable::standard)
}

/// Scalar type keys used by the static route list.
#[derive(Clone, Copy)]
enum Scalar {
    Bool,
    Int,
    UInt,
    Float,
    Char,
    String,
}

impl From<Scalar> for Type {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Bool => Self::Bool,
            Scalar::Int => Self::Int,
            Scalar::UInt => Self::UInt,
            Scalar::Float => Self::Float,
            Scalar::Char => Self::Char,
            Scalar::String => Self::String,
        }
    }
}

const STANDARD_ROUTES: &[(Scalar, Scalar, ConvertFn)] = &[
    (Scalar::Int, Scalar::UInt, int_to_uint),
    (Scalar::Int, Scalar::Float, int_to_float),
    (Scalar::Int, Scalar::Bool, int_to_bool),
    (Scalar::Int, Scalar::Char, int_to_char),
    (Scalar::Int, Scalar::String, to_string),
    (Scalar::UInt, Scalar::Int, uint_to_int),
    (Scalar::UInt, Scalar::Float, uint_to_float),
    (Scalar::UInt, Scalar::Bool, uint_to_bool),
    (Scalar::UInt, Scalar::Char, uint_to_char),
    (Scalar::UInt, Scalar::String, to_string),
    (Scalar::Float, Scalar::Int, float_to_int),
    (Scalar::Float, Scalar::UInt, float_to_uint),
    (Scalar::Float, Scalar::Bool, float_to_bool),
    (Scalar::Float, Scalar::String, to_string),
    (Scalar::Bool, Scalar::Int, bool_to_int),
    (Scalar::Bool, Scalar::UInt, bool_to_uint),
    (Scalar::Bool, Scalar::Float, bool_to_float),
    (Scalar::Bool, Scalar::String, to_string),
    (Scalar::Char, Scalar::Int, char_to_int),
    (Scalar::Char, Scalar::UInt, char_to_uint),
    (Scalar::Char, Scalar::String, to_string),
    (Scalar::String, Scalar::Int, string_to_int),
    (Scalar::String, Scalar::UInt, string_to_uint),
    (Scalar::String, Scalar::Float, string_to_float),
    (Scalar::String, Scalar::Bool, string_to_bool),
    (Scalar::String, Scalar::Char, string_to_char),
];

type RouteResult = std::result::Result<Value, ConversionFault>;

/// Lower bound of `i64` as an exactly representable float.
const I64_MIN_F: f64 = -9_223_372_036_854_775_808.0;
/// One past the upper bound of `i64` (2^63).
const I64_END_F: f64 = 9_223_372_036_854_775_808.0;
/// One past the upper bound of `u64` (2^64).
const U64_END_F: f64 = 18_446_744_073_709_551_616.0;

pub(crate) fn unexpected(value: &Value) -> ConversionFault {
    ConversionFault::Custom(format!("route received a {} value", value.value_type()))
}

fn int_to_uint(value: &Value) -> RouteResult {
    let Value::Int(n) = *value else {
        return Err(unexpected(value));
    };
    u64::try_from(n)
        .map(Value::UInt)
        .map_err(|_| ConversionFault::out_of_range(n))
}

#[allow(clippy::cast_precision_loss)]
fn int_to_float(value: &Value) -> RouteResult {
    let Value::Int(n) = *value else {
        return Err(unexpected(value));
    };
    Ok(Value::Float(n as f64))
}

fn int_to_bool(value: &Value) -> RouteResult {
    let Value::Int(n) = *value else {
        return Err(unexpected(value));
    };
    Ok(Value::Bool(n != 0))
}

fn int_to_char(value: &Value) -> RouteResult {
    let Value::Int(n) = *value else {
        return Err(unexpected(value));
    };
    u32::try_from(n)
        .ok()
        .and_then(char::from_u32)
        .map(Value::Char)
        .ok_or_else(|| ConversionFault::InvalidChar(n.to_string()))
}

fn uint_to_int(value: &Value) -> RouteResult {
    let Value::UInt(n) = *value else {
        return Err(unexpected(value));
    };
    i64::try_from(n)
        .map(Value::Int)
        .map_err(|_| ConversionFault::out_of_range(n))
}

#[allow(clippy::cast_precision_loss)]
fn uint_to_float(value: &Value) -> RouteResult {
    let Value::UInt(n) = *value else {
        return Err(unexpected(value));
    };
    Ok(Value::Float(n as f64))
}

fn uint_to_bool(value: &Value) -> RouteResult {
    let Value::UInt(n) = *value else {
        return Err(unexpected(value));
    };
    Ok(Value::Bool(n != 0))
}

fn uint_to_char(value: &Value) -> RouteResult {
    let Value::UInt(n) = *value else {
        return Err(unexpected(value));
    };
    u32::try_from(n)
        .ok()
        .and_then(char::from_u32)
        .map(Value::Char)
        .ok_or_else(|| ConversionFault::InvalidChar(n.to_string()))
}

/// Rounds half to even and rejects values that are not finite.
fn rounded(n: f64) -> std::result::Result<f64, ConversionFault> {
    if n.is_finite() {
        Ok(n.round_ties_even())
    } else {
        Err(ConversionFault::NotFinite)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn float_to_int(value: &Value) -> RouteResult {
    let Value::Float(n) = *value else {
        return Err(unexpected(value));
    };
    let r = rounded(n)?;
    if (I64_MIN_F..I64_END_F).contains(&r) {
        Ok(Value::Int(r as i64))
    } else {
        Err(ConversionFault::out_of_range(n))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_uint(value: &Value) -> RouteResult {
    let Value::Float(n) = *value else {
        return Err(unexpected(value));
    };
    let r = rounded(n)?;
    if (0.0..U64_END_F).contains(&r) {
        Ok(Value::UInt(r as u64))
    } else {
        Err(ConversionFault::out_of_range(n))
    }
}

fn float_to_bool(value: &Value) -> RouteResult {
    let Value::Float(n) = *value else {
        return Err(unexpected(value));
    };
    Ok(Value::Bool(n != 0.0))
}

fn bool_to_int(value: &Value) -> RouteResult {
    let Value::Bool(b) = *value else {
        return Err(unexpected(value));
    };
    Ok(Value::Int(i64::from(b)))
}

fn bool_to_uint(value: &Value) -> RouteResult {
    let Value::Bool(b) = *value else {
        return Err(unexpected(value));
    };
    Ok(Value::UInt(u64::from(b)))
}

fn bool_to_float(value: &Value) -> RouteResult {
    let Value::Bool(b) = *value else {
        return Err(unexpected(value));
    };
    Ok(Value::Float(if b { 1.0 } else { 0.0 }))
}

fn char_to_int(value: &Value) -> RouteResult {
    let Value::Char(c) = *value else {
        return Err(unexpected(value));
    };
    Ok(Value::Int(i64::from(u32::from(c))))
}

fn char_to_uint(value: &Value) -> RouteResult {
    let Value::Char(c) = *value else {
        return Err(unexpected(value));
    };
    Ok(Value::UInt(u64::from(u32::from(c))))
}

fn to_string(value: &Value) -> RouteResult {
    Ok(Value::from(value.to_string()))
}

fn string_to_int(value: &Value) -> RouteResult {
    let s = value.as_str().ok_or_else(|| unexpected(value))?;
    Ok(Value::Int(s.trim().parse::<i64>()?))
}

fn string_to_uint(value: &Value) -> RouteResult {
    let s = value.as_str().ok_or_else(|| unexpected(value))?;
    Ok(Value::UInt(s.trim().parse::<u64>()?))
}

fn string_to_float(value: &Value) -> RouteResult {
    let s = value.as_str().ok_or_else(|| unexpected(value))?;
    Ok(Value::Float(s.trim().parse::<f64>()?))
}

fn string_to_bool(value: &Value) -> RouteResult {
    let s = value.as_str().ok_or_else(|| unexpected(value))?;
    Ok(Value::Bool(s.trim().to_ascii_lowercase().parse::<bool>()?))
}

fn string_to_char(value: &Value) -> RouteResult {
    let s = value.as_str().ok_or_else(|| unexpected(value))?;
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Value::Char(c)),
        _ => Err(ConversionFault::InvalidChar(s.to_string())),
    }
}
