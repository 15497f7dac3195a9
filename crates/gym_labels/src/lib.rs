//! Gym Labels - Human-readable labels for enumerated types
//!
//! This crate provides:
//! - [`describe()`]: an ordered label → value map for an enum [`Type`]
//! - [`MetadataLookup`]: where descriptions come from ([`DescriptionTable`],
//!   closures, or nowhere)
//! - [`Labeled`] and [`labeled_enum!`]: Rust enums that carry their own
//!   descriptions
//!
//! # Example
//!
//! ```
//! use gym_labels::{Labeled, labeled_enum};
//!
//! labeled_enum! {
//!     pub enum Grade: i32 {
//!         #[label = "Alpha"]
//!         A = 1,
//!         B = 2,
//!     }
//! }
//!
//! let labels = Grade::describe::<i32>().unwrap();
//! assert_eq!(labels.get("Alpha"), Some(&1));
//! assert_eq!(labels.get("B"), Some(&2));
//! assert_eq!(Grade::A.label(), "Alpha");
//! ```
//!
//! [`Type`]: gym_foundation::Type

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod describe;
pub mod labeled;
pub mod lookup;

pub use describe::{describe, describe_i32, describe_with};
pub use labeled::Labeled;
pub use lookup::{DescriptionTable, MetadataLookup};

#[doc(hidden)]
pub mod __private {
    pub use gym_foundation::{EnumDef, Type};
}
