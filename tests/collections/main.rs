//! Integration tests for Layer 1: Collections
//!
//! Tests paged views and the configurable paginator.

mod paging;
mod paginator;
