//! Integration tests for error types

use gym_foundation::{ConversionFault, Error, ErrorContext, ErrorKind, Type, coerce};
use std::error::Error as _;

#[test]
fn error_display_names_both_types() {
    let err = coerce::<bool>('x').unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("char"), "{msg}");
    assert!(msg.contains("bool"), "{msg}");
}

#[test]
fn invalid_conversion_exposes_source() {
    let err = coerce::<i64>("12a").unwrap_err();
    let source = err.kind.source().map(ToString::to_string).unwrap_or_default();
    assert!(source.contains("invalid digit"), "{source}");
}

#[test]
fn context_renders_frames() {
    let err = Error::not_an_enum(Type::Int).with_context(
        ErrorContext::new()
            .with_source("Settings")
            .with_frame("mode")
            .with_frame("level"),
    );
    let ctx = err.context.as_ref().unwrap().to_string();
    assert!(ctx.starts_with("at Settings"));
    assert!(ctx.contains("in mode"));
    assert!(ctx.contains("in level"));
}

#[test]
fn kinds_are_matchable() {
    assert!(matches!(Error::null_input().kind, ErrorKind::NullInput));
    assert!(matches!(
        Error::missing_constructor("Pool").kind,
        ErrorKind::MissingConstructorCapability("Pool")
    ));
    assert_eq!(Error::null_input().conversion_fault(), None);
}

#[test]
fn conversion_faults_compare() {
    assert_eq!(ConversionFault::out_of_range(300), ConversionFault::OutOfRange("300".into()));
    assert_ne!(ConversionFault::NoRoute, ConversionFault::NotFinite);
}
