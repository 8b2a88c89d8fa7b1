//! Core value types for the placer SDK layout planner.
//!
//! This crate provides the naming and location primitives shared by every
//! other placer crate: casing-aware identifiers, hierarchical declaration
//! paths, and the `(filename, package)` pairs that placement produces.

mod keywords;
mod name;
mod path;
mod target;
mod utils;

pub use keywords::{GO_KEYWORDS, escape_keyword, is_keyword};
pub use name::{CasedString, Name};
pub use path::DeclarationPath;
pub use target::PlacementTarget;
// String utilities
pub use utils::{to_camel_case, to_pascal_case, to_screaming_snake_case, to_snake_case};
