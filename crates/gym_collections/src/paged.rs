//! One page of an ordered sequence.

use std::fmt;

use gym_foundation::{Error, Result};
use im::Vector;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A bounded slice of an ordered sequence together with its position in the
/// whole.
///
/// Immutable after construction. Cloning is O(1); the items are held in a
/// persistent vector shared between clones.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PagedView<T>
where
    T: Clone,
{
    items: Vector<T>,
    current_page: usize,
    items_per_page: usize,
    total_count: usize,
    total_pages: usize,
}

/// Streams `source` and keeps the items that fall on `page`.
///
/// The source is consumed in a single pass: items inside the page window are
/// retained, the rest are only counted. Pass a re-iterable collection (or a
/// reference to one) if the same source has to back several views.
///
/// # Errors
///
/// - [`InvalidPage`](gym_foundation::ErrorKind::InvalidPage) if `page` is 0
/// - [`InvalidPageSize`](gym_foundation::ErrorKind::InvalidPageSize) if
///   `items_per_page` is 0
///
/// A `page` past the last page is not an error; the view is empty.
///
/// ```
/// use gym_collections::paged;
///
/// let view = paged(1..=23, 5, 5).unwrap();
/// assert_eq!(view.total_pages(), 5);
/// assert_eq!(view.iter().copied().collect::<Vec<_>>(), [21, 22, 23]);
/// ```
pub fn paged<I>(source: I, page: usize, items_per_page: usize) -> Result<PagedView<I::Item>>
where
    I: IntoIterator,
    I::Item: Clone,
{
    validate(page, items_per_page)?;
    let window = window(page, items_per_page);

    let mut items = Vector::new();
    let mut total_count = 0usize;
    for item in source {
        if window.contains(&total_count) {
            items.push_back(item);
        }
        total_count += 1;
    }

    Ok(PagedView::assemble(items, page, items_per_page, total_count))
}

impl<T: Clone> PagedView<T> {
    /// Pages a materialized slice without walking the items outside the page.
    ///
    /// # Errors
    ///
    /// Same as [`paged()`].
    pub fn from_slice(source: &[T], page: usize, items_per_page: usize) -> Result<Self> {
        validate(page, items_per_page)?;
        let window = window(page, items_per_page);
        let start = window.start.min(source.len());
        let end = window.end.min(source.len());
        let items = source[start..end].iter().cloned().collect();
        Ok(Self::assemble(items, page, items_per_page, source.len()))
    }

    /// Wraps items that were already sliced elsewhere (e.g. by a database
    /// query) together with the size of the full result.
    ///
    /// # Errors
    ///
    /// - [`InvalidPage`](gym_foundation::ErrorKind::InvalidPage) if `page` is 0
    /// - [`InvalidPageSize`](gym_foundation::ErrorKind::InvalidPageSize) if
    ///   `items_per_page` is 0 or smaller than the number of items given
    /// - [`InvalidPage`](gym_foundation::ErrorKind::InvalidPage) if items are
    ///   given for a page that starts at or after `total_count`
    /// - [`InvalidPageSize`](gym_foundation::ErrorKind::InvalidPageSize) if
    ///   more items are given than `total_count` leaves for this page
    pub fn from_parts(
        items: impl IntoIterator<Item = T>,
        page: usize,
        items_per_page: usize,
        total_count: usize,
    ) -> Result<Self> {
        validate(page, items_per_page)?;
        let items: Vector<T> = items.into_iter().collect();
        if items.len() > items_per_page {
            return Err(Error::invalid_page_size(items_per_page));
        }
        let remaining = total_count.saturating_sub(window(page, items_per_page).start);
        if items.len() > remaining {
            return Err(if remaining == 0 {
                Error::invalid_page(page)
            } else {
                Error::invalid_page_size(items_per_page)
            });
        }
        Ok(Self::assemble(items, page, items_per_page, total_count))
    }

    fn assemble(items: Vector<T>, page: usize, items_per_page: usize, total_count: usize) -> Self {
        Self {
            items,
            current_page: page,
            items_per_page,
            total_count,
            total_pages: total_count.div_ceil(items_per_page),
        }
    }

    /// Returns the items on this page.
    #[must_use]
    pub fn items(&self) -> &Vector<T> {
        &self.items
    }

    /// Consumes the view and returns its items.
    #[must_use]
    pub fn into_items(self) -> Vector<T> {
        self.items
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Returns the number of items in the full sequence.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns `ceil(total_count / items_per_page)`.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if a page precedes this one.
    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// Returns true if a page follows this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Returns an iterator over the items on this page.
    pub fn iter(&self) -> im::vector::Iter<'_, T> {
        self.items.iter()
    }

    /// Maps every item, keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> PagedView<U>
    where
        U: Clone,
        F: FnMut(&T) -> U,
    {
        PagedView {
            items: self.items.iter().map(f).collect(),
            current_page: self.current_page,
            items_per_page: self.items_per_page,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

fn validate(page: usize, items_per_page: usize) -> Result<()> {
    if items_per_page == 0 {
        return Err(Error::invalid_page_size(items_per_page));
    }
    if page == 0 {
        return Err(Error::invalid_page(page));
    }
    Ok(())
}

/// Index range `[(page-1)*n, page*n)`, saturating far past the end.
fn window(page: usize, items_per_page: usize) -> std::ops::Range<usize> {
    let start = (page - 1).saturating_mul(items_per_page);
    start..start.saturating_add(items_per_page)
}

impl<T: Clone + fmt::Debug> fmt::Debug for PagedView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedView")
            .field("page", &self.current_page)
            .field("of", &self.total_pages)
            .field("items_per_page", &self.items_per_page)
            .field("total_count", &self.total_count)
            .field("items", &self.items)
            .finish()
    }
}

impl<T: Clone> IntoIterator for PagedView<T> {
    type Item = T;
    type IntoIter = im::vector::ConsumingIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T: Clone> IntoIterator for &'a PagedView<T> {
    type Item = &'a T;
    type IntoIter = im::vector::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
