//! Gym Registry - Lazily constructed singletons keyed by type
//!
//! This crate provides:
//! - [`SingletonRegistry`]: one shared instance per type, built on first use
//! - A process-wide registry reachable through [`instance_of`], [`register`]
//!   and friends
//!
//! Construction is race-free: however many threads ask for a type at once,
//! its constructor runs exactly once and every caller receives the same
//! instance. A failed construction publishes nothing, so a later request
//! tries again.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod singleton;

pub use singleton::{
    SingletonRegistry, global, instance_of, instance_of_default, is_initialized, register,
    register_default,
};
