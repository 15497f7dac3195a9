//! Rust enums that carry their own descriptions.

use gym_foundation::{Coerce, Result, Type};
use indexmap::IndexMap;

use crate::describe::describe;

/// An enum whose constants have symbolic names and optional descriptions.
///
/// Usually implemented through [`labeled_enum!`](crate::labeled_enum).
pub trait Labeled: Sized + 'static {
    /// Returns the runtime descriptor of this enum.
    fn enum_type() -> &'static Type;

    /// Returns every constant in declaration order.
    fn variants() -> &'static [Self];

    /// Returns the symbolic name of this constant.
    fn name(&self) -> &'static str;

    /// Returns the description of this constant, if it has one.
    fn description(&self) -> Option<&'static str>;

    /// Returns the description, or the symbolic name when there is none.
    fn label(&self) -> &'static str {
        self.description().unwrap_or_else(|| self.name())
    }

    /// Finds a constant by symbolic name and returns its description.
    fn lookup(constant: &str) -> Option<String> {
        Self::variants()
            .iter()
            .find(|variant| variant.name() == constant)
            .and_then(|variant| variant.description())
            .map(str::to_owned)
    }

    /// Builds this enum's label → value map.
    ///
    /// # Errors
    ///
    /// See [`describe`](crate::describe()).
    fn describe<T: Coerce>() -> Result<IndexMap<String, T>> {
        describe(Self::enum_type(), &Self::lookup)
    }
}

/// Picks a declared label or `None`.
#[doc(hidden)]
#[macro_export]
macro_rules! __opt_label {
    ({$label:literal}) => {
        ::std::option::Option::Some($label)
    };
    () => {
        ::std::option::Option::None
    };
}

/// Declares a fieldless enum with explicit discriminants and implements
/// [`Labeled`] for it.
///
/// The representation must be one of `i8`, `i16`, `i32`, `i64`, `u8`, `u16`,
/// `u32` or `u64`. A constant may carry a `#[label = "..."]` attribute; the
/// others are labelled by name.
///
/// ```
/// use gym_labels::{Labeled, labeled_enum};
///
/// labeled_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     pub enum Status: u8 {
///         #[label = "Waiting for review"]
///         Pending = 0,
///         Approved = 1,
///     }
/// }
///
/// assert_eq!(Status::Pending.label(), "Waiting for review");
/// assert_eq!(Status::Approved.label(), "Approved");
/// assert_eq!(Status::enum_type().to_string(), "enum Status");
/// ```
#[macro_export]
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ident {
            $(
                $(#[label = $label:literal])?
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr($repr)]
        $vis enum $name {
            $($variant = $value),*
        }

        impl $crate::Labeled for $name {
            fn enum_type() -> &'static $crate::__private::Type {
                static TYPE: ::std::sync::OnceLock<$crate::__private::Type> =
                    ::std::sync::OnceLock::new();
                TYPE.get_or_init(|| {
                    $crate::__private::Type::enumeration(
                        $crate::__private::EnumDef::new(stringify!($name))
                            $(.with_constant(stringify!($variant), $name::$variant as $repr))*,
                    )
                })
            }

            fn variants() -> &'static [Self] {
                &[$($name::$variant),*]
            }

            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),*
                }
            }

            fn description(&self) -> ::std::option::Option<&'static str> {
                match self {
                    $($name::$variant => $crate::__opt_label!($({$label})?)),*
                }
            }
        }
    };
}
