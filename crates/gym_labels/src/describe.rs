//! Label maps for enum types.

use gym_foundation::{Coerce, ConversionTable, Error, ErrorContext, Result, Type, standard_table};
use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::lookup::MetadataLookup;

/// Builds a label → value map for `enum_type`, in declaration order.
///
/// Each constant's label is its description from `lookup`, or its symbolic
/// name if it has none. Its value is the constant's discriminant coerced to
/// `T` through the standard conversion table. When two constants share a
/// label, the later value replaces the earlier one and the entry keeps its
/// original position.
///
/// # Errors
///
/// - [`NotAnEnum`](gym_foundation::ErrorKind::NotAnEnum) if `enum_type` is
///   not `Type::Enum`
/// - the coercion error of the first constant whose value does not fit `T`,
///   with context naming the enum and the constant
///
/// ```
/// use gym_foundation::{EnumDef, Type};
/// use gym_labels::describe;
///
/// let grade = Type::enumeration(EnumDef::new("Grade").with_constant("A", 1).with_constant("B", 2));
/// let lookup = |name: &str| (name == "A").then(|| "Alpha".to_string());
///
/// let labels = describe::<i32, _>(&grade, &lookup).unwrap();
/// assert_eq!(labels.into_iter().collect::<Vec<_>>(), [("Alpha".to_string(), 1), ("B".to_string(), 2)]);
/// ```
pub fn describe<T, L>(enum_type: &Type, lookup: &L) -> Result<IndexMap<String, T>>
where
    T: Coerce,
    L: MetadataLookup + ?Sized,
{
    describe_with(standard_table(), enum_type, lookup)
}

/// [`describe`] with `i32` values.
///
/// # Errors
///
/// See [`describe`].
pub fn describe_i32<L>(enum_type: &Type, lookup: &L) -> Result<IndexMap<String, i32>>
where
    L: MetadataLookup + ?Sized,
{
    describe(enum_type, lookup)
}

/// [`describe`] using a caller-supplied conversion table.
///
/// # Errors
///
/// See [`describe`].
pub fn describe_with<T, L>(
    table: &ConversionTable,
    enum_type: &Type,
    lookup: &L,
) -> Result<IndexMap<String, T>>
where
    T: Coerce,
    L: MetadataLookup + ?Sized,
{
    let Some(def) = enum_type.as_enum() else {
        return Err(Error::not_an_enum(enum_type.clone()));
    };

    let mut labels = IndexMap::with_capacity(def.constants().len());
    for constant in def.constants() {
        let label = lookup
            .description(constant.name())
            .unwrap_or_else(|| constant.name().to_owned());
        let value = table.coerce::<T>(constant.value()).map_err(|err| {
            err.with_context(
                ErrorContext::new()
                    .with_source(def.name())
                    .with_frame(constant.name()),
            )
        })?;

        match labels.entry(label) {
            Entry::Occupied(mut entry) => {
                tracing::debug!(
                    enum_name = def.name(),
                    constant = constant.name(),
                    label = entry.key().as_str(),
                    "label already used, later constant wins"
                );
                entry.insert(value);
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }

    Ok(labels)
}
