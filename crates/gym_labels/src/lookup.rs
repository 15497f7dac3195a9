//! Sources of constant descriptions.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

/// Looks up the description of an enum constant by its symbolic name.
///
/// Implemented for closures `Fn(&str) -> Option<String>`, for
/// [`DescriptionTable`], and for `()` (no descriptions at all).
pub trait MetadataLookup {
    /// Returns the description of `constant`, if it has one.
    fn description(&self, constant: &str) -> Option<String>;
}

impl<F> MetadataLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn description(&self, constant: &str) -> Option<String> {
        self(constant)
    }
}

impl MetadataLookup for () {
    fn description(&self, _constant: &str) -> Option<String> {
        None
    }
}

/// A fixed table of constant name → description.
///
/// ```
/// use gym_labels::{DescriptionTable, MetadataLookup};
///
/// let table = DescriptionTable::from_static(&[("Active", "Currently active")]);
/// assert_eq!(table.description("Active").as_deref(), Some("Currently active"));
/// assert_eq!(table.description("Closed"), None);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DescriptionTable {
    entries: IndexMap<Arc<str>, Arc<str>>,
}

impl DescriptionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from static pairs. Later pairs replace earlier ones
    /// with the same constant name.
    #[must_use]
    pub fn from_static(pairs: &[(&'static str, &'static str)]) -> Self {
        pairs
            .iter()
            .fold(Self::new(), |table, &(name, text)| table.with(name, text))
    }

    /// Adds a description, returning the table for chaining.
    #[must_use]
    pub fn with(mut self, constant: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> Self {
        self.insert(constant, text);
        self
    }

    /// Adds a description, returning the one it replaced.
    pub fn insert(
        &mut self,
        constant: impl Into<Arc<str>>,
        text: impl Into<Arc<str>>,
    ) -> Option<Arc<str>> {
        self.entries.insert(constant.into(), text.into())
    }

    /// Returns the description of `constant` without allocating.
    #[must_use]
    pub fn get(&self, constant: &str) -> Option<&str> {
        self.entries.get(constant).map(AsRef::as_ref)
    }

    /// Returns the number of described constants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataLookup for DescriptionTable {
    fn description(&self, constant: &str) -> Option<String> {
        self.get(constant).map(str::to_owned)
    }
}

impl fmt::Debug for DescriptionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
            .finish()
    }
}
