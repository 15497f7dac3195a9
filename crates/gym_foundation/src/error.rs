//! Error types shared by every Gym crate.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;

use thiserror::Error;

use crate::types::Type;

/// The main error type for Gym operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a null input error.
    #[must_use]
    pub fn null_input() -> Self {
        Self::new(ErrorKind::NullInput)
    }

    /// Creates an invalid conversion error.
    #[must_use]
    pub fn invalid_conversion(from: Type, to: Type, cause: ConversionFault) -> Self {
        Self::new(ErrorKind::InvalidConversion { from, to, cause })
    }

    /// Creates a failed optional-wrapper conversion error.
    #[must_use]
    pub fn nullable_conversion_failed(from: Type, to: Type) -> Self {
        Self::new(ErrorKind::NullableConversionFailed { from, to })
    }

    /// Creates an invalid page size error.
    #[must_use]
    pub fn invalid_page_size(items_per_page: usize) -> Self {
        Self::new(ErrorKind::InvalidPageSize(items_per_page))
    }

    /// Creates an invalid page number error.
    #[must_use]
    pub fn invalid_page(page: usize) -> Self {
        Self::new(ErrorKind::InvalidPage(page))
    }

    /// Creates a missing constructor error for the named type.
    #[must_use]
    pub fn missing_constructor(type_name: &'static str) -> Self {
        Self::new(ErrorKind::MissingConstructorCapability(type_name))
    }

    /// Creates a construction failure error for the named type.
    #[must_use]
    pub fn construction_failed(
        type_name: &'static str,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::new(ErrorKind::ConstructionFailed {
            type_name,
            cause: cause.into(),
        })
    }

    /// Creates an error for a type requested while its own constructor runs.
    #[must_use]
    pub fn recursive_construction(type_name: &'static str) -> Self {
        Self::new(ErrorKind::RecursiveConstruction(type_name))
    }

    /// Creates a not-an-enum error.
    #[must_use]
    pub fn not_an_enum(ty: Type) -> Self {
        Self::new(ErrorKind::NotAnEnum(ty))
    }

    /// Returns the conversion fault behind an `InvalidConversion` error.
    #[must_use]
    pub const fn conversion_fault(&self) -> Option<&ConversionFault> {
        match &self.kind {
            ErrorKind::InvalidConversion { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A nil value was given where a value is required.
    #[error("input value is nil")]
    NullInput,

    /// No conversion route exists, or the route rejected the value.
    #[error("cannot convert {from} to {to}")]
    InvalidConversion {
        /// The runtime type of the input.
        from: Type,
        /// The requested type.
        to: Type,
        /// Why the conversion failed.
        #[source]
        cause: ConversionFault,
    },

    /// Conversion into an optional wrapper failed on its underlying type.
    #[error("cannot convert {from} to {to}: the underlying type rejected the value")]
    NullableConversionFailed {
        /// The runtime type of the input.
        from: Type,
        /// The requested optional type.
        to: Type,
    },

    /// A page size of zero, or one above the configured maximum.
    #[error("invalid page size: {0}")]
    InvalidPageSize(usize),

    /// A page number below one.
    #[error("invalid page number: {0} (pages start at 1)")]
    InvalidPage(usize),

    /// The registry has no parameterless constructor for the type.
    #[error("no parameterless constructor registered for {0}")]
    MissingConstructorCapability(&'static str),

    /// A registered constructor returned an error.
    #[error("failed to construct {type_name}")]
    ConstructionFailed {
        /// The type being constructed.
        type_name: &'static str,
        /// The constructor's error.
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A constructor requested its own type, directly or through another
    /// type's constructor, on the same thread.
    #[error("{0} was requested while it was being constructed")]
    RecursiveConstruction(&'static str),

    /// A label lookup was requested for a type that is not enumerated.
    #[error("not an enum type: {0}")]
    NotAnEnum(Type),
}

/// The underlying cause of an invalid conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionFault {
    /// The conversion table has no route for the type pair.
    #[error("no conversion route")]
    NoRoute,

    /// The value does not fit in the target type.
    #[error("value {0} is out of range")]
    OutOfRange(String),

    /// NaN or an infinity cannot become an integer.
    #[error("value is not finite")]
    NotFinite,

    /// String to integer parsing failed.
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),

    /// String to float parsing failed.
    #[error(transparent)]
    ParseFloat(#[from] ParseFloatError),

    /// String to bool parsing failed.
    #[error(transparent)]
    ParseBool(#[from] ParseBoolError),

    /// The value is not a single valid Unicode scalar value.
    #[error("invalid char: {0}")]
    InvalidChar(String),

    /// Failure reported by a user-registered conversion.
    #[error("{0}")]
    Custom(String),
}

impl ConversionFault {
    /// Creates an out-of-range fault for the given value.
    #[must_use]
    pub fn out_of_range(value: impl fmt::Display) -> Self {
        Self::OutOfRange(value.to_string())
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// The item being processed (type name, enum name, map key).
    pub source: Option<String>,
    /// Path of nested items that led to the error.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            stack: Vec::new(),
        }
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
