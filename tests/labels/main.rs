//! Integration tests for Layer 2: Labels
//!
//! Tests label maps built from enum descriptors, description tables and
//! enums declared with `labeled_enum!`.

use gym_foundation::{EnumDef, ErrorKind, Type, Value};
use gym_labels::{DescriptionTable, Labeled, describe, describe_i32, labeled_enum};
use indexmap::IndexMap;

labeled_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum OrderStatus: i32 {
        #[label = "Awaiting payment"]
        Pending = 1,
        #[label = "Shipped to customer"]
        Shipped = 2,
        Cancelled = 3,
    }
}

labeled_enum! {
    pub enum Weekday: u8 {
        Monday = 1,
        Tuesday = 2,
    }
}

fn pairs<T: Copy>(map: &IndexMap<String, T>) -> Vec<(&str, T)> {
    map.iter().map(|(k, v)| (k.as_str(), *v)).collect()
}

#[test]
fn alpha_example() {
    let ty = Type::enumeration(EnumDef::new("Grade").with_constant("A", 1).with_constant("B", 2));
    let lookup = |name: &str| (name == "A").then(|| "Alpha".to_string());

    let labels = describe::<i32, _>(&ty, &lookup).unwrap();
    assert_eq!(pairs(&labels), [("Alpha", 1), ("B", 2)]);
}

#[test]
fn declared_enum_labels() {
    let labels = OrderStatus::describe::<i32>().unwrap();
    assert_eq!(
        pairs(&labels),
        [
            ("Awaiting payment", 1),
            ("Shipped to customer", 2),
            ("Cancelled", 3)
        ]
    );
}

#[test]
fn single_constant_label() {
    assert_eq!(OrderStatus::Pending.label(), "Awaiting payment");
    assert_eq!(OrderStatus::Cancelled.label(), "Cancelled");
    assert_eq!(Weekday::Monday.label(), "Monday");
}

#[test]
fn declared_enum_with_external_descriptions() {
    let table = DescriptionTable::from_static(&[("Monday", "Mon"), ("Tuesday", "Tue")]);
    let labels = describe_i32(Weekday::enum_type(), &table).unwrap();
    assert_eq!(pairs(&labels), [("Mon", 1), ("Tue", 2)]);
}

#[test]
fn labels_as_strings() {
    let labels = OrderStatus::describe::<String>().unwrap();
    assert_eq!(labels["Cancelled"], "3");
}

#[test]
fn labels_as_values() {
    let labels = Weekday::describe::<Value>().unwrap();
    assert_eq!(labels["Tuesday"], Value::Int(2));
}

#[test]
fn non_enum_type() {
    let err = describe_i32(&Type::option(Type::Int), &()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotAnEnum(_)));
    assert_eq!(err.to_string(), "not an enum type: option<int>");
}

#[test]
fn failed_coercion_has_context() {
    let ty = Type::enumeration(EnumDef::new("Flags").with_constant("Top", u64::MAX));
    let err = describe_i32(&ty, &()).unwrap_err();
    let context = err.context.unwrap();
    assert_eq!(context.source.as_deref(), Some("Flags"));
    assert_eq!(context.stack, ["Top"]);
}
