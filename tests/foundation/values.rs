//! Integration tests for values and type descriptors

use gym_foundation::{Discriminant, EnumDef, Type, Value};
use std::collections::HashSet;

// =============================================================================
// Value
// =============================================================================

#[test]
fn value_types() {
    assert_eq!(Value::Nil.value_type(), Type::Nil);
    assert_eq!(Value::from(true).value_type(), Type::Bool);
    assert_eq!(Value::from(-3i8).value_type(), Type::Int);
    assert_eq!(Value::from(3u16).value_type(), Type::UInt);
    assert_eq!(Value::from(1.5f32).value_type(), Type::Float);
    assert_eq!(Value::from('x').value_type(), Type::Char);
    assert_eq!(Value::from("hi").value_type(), Type::String);
}

#[test]
fn option_into_value() {
    assert!(Value::from(None::<i32>).is_nil());
    assert_eq!(Value::from(Some(4i64)), Value::Int(4));
}

#[test]
fn int_and_uint_compare_by_magnitude() {
    assert!(Value::Int(-1) < Value::UInt(0));
    assert!(Value::UInt(10) > Value::Int(9));
    assert_ne!(Value::Int(1), Value::UInt(1));
}

#[test]
fn values_hash_consistently() {
    let set: HashSet<Value> = [Value::from("a"), Value::from("a"), Value::Float(0.5)]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn display_is_plain_text() {
    assert_eq!(Value::from("plain").to_string(), "plain");
    assert_eq!(Value::UInt(7).to_string(), "7");
    assert_eq!(format!("{:?}", Value::UInt(7)), "7u");
}

// =============================================================================
// Type
// =============================================================================

#[test]
fn option_type_display() {
    let ty = Type::option(Type::Int);
    assert_eq!(ty.to_string(), "option<int>");
    assert!(ty.is_nullable());
    assert_eq!(ty.underlying(), Some(&Type::Int));
}

#[test]
fn enum_type_lookup() {
    let ty = Type::enumeration(
        EnumDef::new("Status")
            .with_constant("Open", 1)
            .with_constant("Closed", u64::MAX),
    );
    let def = ty.as_enum().unwrap();

    assert_eq!(ty.to_string(), "enum Status");
    assert_eq!(def.constants().len(), 2);
    assert_eq!(def.constant("Open").unwrap().value(), Value::Int(1));
    assert_eq!(
        def.constant("Closed").unwrap().discriminant(),
        Discriminant::Unsigned(u64::MAX)
    );
    assert!(def.constant("Missing").is_none());
}

#[test]
fn non_enum_types_have_no_definition() {
    assert!(Type::String.as_enum().is_none());
    assert!(Type::option(Type::Int).as_enum().is_none());
}
