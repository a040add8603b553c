//! Field-set schema for projected types.
//!
//! A type's schema is a [`FieldRegistry`]: named, ordered lists of output keys
//! paired with the accessors that supply them.

pub mod declaration;
pub mod field_set;
mod macros;
pub mod registry;

pub use declaration::{FieldsQuery, parse_field_sets};
pub use field_set::{DEFAULT_FIELD_SET, FieldSet, FieldSpec};
pub use registry::FieldRegistry;

// Re-export the macro to make it available to users of this module
pub use crate::field_set;
