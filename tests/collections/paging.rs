//! Integration tests for paged views

use gym_collections::{PagedView, paged};
use gym_foundation::ErrorKind;
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Order {
    id: u32,
    total: f64,
}

fn orders(count: u32) -> Vec<Order> {
    (1..=count)
        .map(|id| Order {
            id,
            total: f64::from(id) * 1.25,
        })
        .collect()
}

#[test]
fn page_counts() {
    assert_eq!(paged(orders(23), 1, 5).unwrap().total_pages(), 5);
    assert_eq!(paged(orders(20), 1, 5).unwrap().total_pages(), 4);
    assert_eq!(paged(orders(0), 1, 5).unwrap().total_pages(), 0);
}

#[test]
fn second_page_of_orders() {
    let view = paged(orders(12), 2, 5).unwrap();
    let ids: Vec<u32> = view.iter().map(|o| o.id).collect();
    assert_eq!(ids, [6, 7, 8, 9, 10]);
    assert_eq!(view.total_count(), 12);
    assert_eq!(view.current_page(), 2);
    assert_eq!(view.items_per_page(), 5);
}

#[test]
fn borrowed_source_is_reusable() {
    let source = orders(7);
    let first = paged(&source, 1, 4).unwrap();
    let second = paged(&source, 2, 4).unwrap();
    assert_eq!(first.len() + second.len(), source.len());
    assert_eq!(second.items()[0], &source[4]);
}

#[test]
fn single_pass_source() {
    let mut produced = 0;
    let source = std::iter::from_fn(|| {
        produced += 1;
        (produced <= 9).then_some(produced)
    });
    let view = paged(source, 3, 4).unwrap();
    assert_eq!(view.iter().copied().collect::<Vec<_>>(), [9]);
    assert_eq!(view.total_count(), 9);
}

#[test]
fn error_boundaries() {
    assert!(matches!(
        paged(orders(10), 0, 5).unwrap_err().kind,
        ErrorKind::InvalidPage(0)
    ));
    assert!(matches!(
        paged(orders(10), 1, 0).unwrap_err().kind,
        ErrorKind::InvalidPageSize(0)
    ));
    assert!(paged(orders(10), 99, 5).unwrap().is_empty());
}

#[test]
fn navigation() {
    let first = paged(orders(11), 1, 5).unwrap();
    assert!(!first.has_previous_page());
    assert!(first.has_next_page());

    let last = paged(orders(11), 3, 5).unwrap();
    assert!(last.has_previous_page());
    assert!(!last.has_next_page());
}

#[test]
fn pre_sliced_results() {
    let rows = orders(3);
    let view = PagedView::from_parts(rows.clone(), 4, 3, 12).unwrap();
    assert_eq!(view.total_pages(), 4);
    assert_eq!(view.into_items().into_iter().collect::<Vec<_>>(), rows);
}

#[test]
fn for_loop_yields_members() {
    let view = paged(orders(3), 1, 10).unwrap();
    let mut sum = 0.0;
    for order in &view {
        sum += order.total;
    }
    assert!((sum - 7.5).abs() < f64::EPSILON);
}

proptest! {
    #[test]
    fn pages_partition_the_source(count in 0u32..150, per_page in 1usize..30) {
        let source = orders(count);
        let total_pages = paged(&source, 1, per_page).unwrap().total_pages();

        let rebuilt: Vec<Order> = (1..=total_pages)
            .flat_map(|page| paged(&source, page, per_page).unwrap())
            .cloned()
            .collect();
        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn every_page_but_the_last_is_full(count in 1u32..150, per_page in 1usize..30) {
        let source = orders(count);
        let total_pages = paged(&source, 1, per_page).unwrap().total_pages();
        for page in 1..total_pages {
            prop_assert_eq!(paged(&source, page, per_page).unwrap().len(), per_page);
        }
        prop_assert!(!paged(&source, total_pages, per_page).unwrap().is_empty());
    }
}
