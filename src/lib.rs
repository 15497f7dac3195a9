//! Gym - Generic helper primitives
//!
//! This crate re-exports all layers of Gym for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: gym_labels      - Label maps for enum types
//! Layer 1: gym_collections - Paged views over ordered sequences
//!          gym_registry    - Lazily constructed singletons keyed by type
//! Layer 0: gym_foundation  - Core types (Value, Type, Error), coercion
//! ```

pub use gym_collections as collections;
pub use gym_foundation as foundation;
pub use gym_labels as labels;
pub use gym_registry as registry;
