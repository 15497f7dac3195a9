//! Paging configuration.
//!
//! Callers that expose paging to users (query strings, request bodies)
//! usually want a default page size and an upper bound. [`PagingConfig`]
//! holds both; [`Paginator`] applies them before delegating to [`paged()`].

use gym_foundation::{Error, Result};

use crate::paged::{PagedView, paged};

/// Page size settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagingConfig {
    /// Page size used when the caller does not ask for one.
    pub default_items_per_page: usize,
    /// Largest page size a caller may ask for. `None` means unbounded.
    pub max_items_per_page: Option<usize>,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_items_per_page: 10,
            max_items_per_page: None,
        }
    }
}

impl PagingConfig {
    /// Creates the default configuration (10 per page, no maximum).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default page size.
    #[must_use]
    pub const fn with_default_items_per_page(mut self, items_per_page: usize) -> Self {
        self.default_items_per_page = items_per_page;
        self
    }

    /// Sets the maximum page size.
    #[must_use]
    pub const fn with_max_items_per_page(mut self, max: usize) -> Self {
        self.max_items_per_page = Some(max);
        self
    }

    /// Removes the maximum page size.
    #[must_use]
    pub const fn unbounded(mut self) -> Self {
        self.max_items_per_page = None;
        self
    }

    /// Resolves a requested page size against this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPageSize`](gym_foundation::ErrorKind::InvalidPageSize)
    /// if the resolved size is 0 or exceeds the maximum.
    pub fn resolve(&self, requested: Option<usize>) -> Result<usize> {
        let size = requested.unwrap_or(self.default_items_per_page);
        if size == 0 {
            return Err(Error::invalid_page_size(size));
        }
        match self.max_items_per_page {
            Some(max) if size > max => Err(Error::invalid_page_size(size)),
            _ => Ok(size),
        }
    }
}

/// Pages sources according to a [`PagingConfig`].
#[derive(Clone, Debug, Default)]
pub struct Paginator {
    config: PagingConfig,
}

impl Paginator {
    /// Creates a paginator with the given configuration.
    #[must_use]
    pub const fn new(config: PagingConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PagingConfig {
        &self.config
    }

    /// Pages `source` with the default page size.
    ///
    /// # Errors
    ///
    /// See [`paged()`] and [`PagingConfig::resolve`].
    pub fn paginate<I>(&self, source: I, page: usize) -> Result<PagedView<I::Item>>
    where
        I: IntoIterator,
        I::Item: Clone,
    {
        self.paginate_with(source, page, None)
    }

    /// Pages `source` with a caller-chosen page size, falling back to the
    /// default when `items_per_page` is `None`.
    ///
    /// # Errors
    ///
    /// See [`paged()`] and [`PagingConfig::resolve`].
    pub fn paginate_with<I>(
        &self,
        source: I,
        page: usize,
        items_per_page: Option<usize>,
    ) -> Result<PagedView<I::Item>>
    where
        I: IntoIterator,
        I::Item: Clone,
    {
        let items_per_page = self.config.resolve(items_per_page)?;
        paged(source, page, items_per_page)
    }
}
