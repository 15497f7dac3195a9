//! Paginated views over ordered sequences.
//!
//! This crate provides:
//! - [`PagedView`] - One page of a sequence plus its position in the whole
//! - [`paged()`] - Streams a source into a [`PagedView`]
//! - [`Paginator`] - Applies a [`PagingConfig`] (default and maximum page size)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod paged;

pub use config::{Paginator, PagingConfig};
pub use paged::{PagedView, paged};
