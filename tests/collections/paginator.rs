//! Integration tests for the configurable paginator

use gym_collections::{Paginator, PagingConfig};
use gym_foundation::ErrorKind;

#[test]
fn default_paginator_uses_ten_per_page() {
    let view = Paginator::default().paginate(1..=25, 3).unwrap();
    assert_eq!(view.items_per_page(), 10);
    assert_eq!(view.iter().copied().collect::<Vec<_>>(), [21, 22, 23, 24, 25]);
}

#[test]
fn configured_default() {
    let paginator = Paginator::new(PagingConfig::new().with_default_items_per_page(4));
    assert_eq!(paginator.paginate(0..10, 1).unwrap().total_pages(), 3);
    assert_eq!(paginator.config().default_items_per_page, 4);
}

#[test]
fn requested_size_over_maximum() {
    let paginator = Paginator::new(
        PagingConfig::new()
            .with_default_items_per_page(20)
            .with_max_items_per_page(50),
    );
    let err = paginator.paginate_with(0..1000, 1, Some(500)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidPageSize(500)));
    assert_eq!(paginator.paginate_with(0..1000, 2, Some(50)).unwrap().len(), 50);
}

#[test]
fn page_zero_still_rejected() {
    let err = Paginator::default().paginate(0..5, 0).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidPage(0)));
}
