//! Core values, type descriptors, errors and value coercion for Gym.
//!
//! This crate provides:
//! - [`Value`] - Dynamic value accepted by the coercion layer
//! - [`Type`] - Runtime type descriptors, including enum definitions
//! - [`Error`] - Error type shared by every Gym crate
//! - [`coerce()`] / [`coerce_or_default`] - Typed coercion over a
//!   [`ConversionTable`] of explicit conversion routes

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod coerce;
pub mod convert;
pub mod error;
pub mod types;
pub mod value;

pub use coerce::{Coerce, coerce, coerce_or_default, get_or_default};
pub use convert::{ConversionTable, ConvertFn, standard_table};
pub use error::{ConversionFault, Error, ErrorContext, ErrorKind};
pub use types::{Discriminant, EnumConstant, EnumDef, Type};
pub use value::Value;

/// Result type alias using Gym's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
