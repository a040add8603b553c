//! Declarative field-set projections with pooled instance reuse.
//!
//! A type describes itself once through a [`TypeDescriptor`]: named field
//! sets listing which accessors to read (optionally under a different output
//! key), plus the initialization fields filled from an options map. Instances
//! are then projected into ordered JSON maps, either directly or through an
//! [`InstancePool`] that reuses one reset-and-reinitialized instance per scope.

extern crate self as rep;

pub mod accessor;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod pool;
pub mod projector;
pub mod schema;
pub mod utils;

// Core types
pub use descriptor::{DescriptorBuilder, ResetHook, TypeDescriptor, options_from_value};
pub use error::{RepError, Result};
pub use projector::Projection;

// Declarations
pub use schema::{DEFAULT_FIELD_SET, FieldRegistry, FieldSet, FieldSpec, FieldsQuery};

// Instance state
pub use accessor::{Accessor, AccessorTable, Field, Memo, Options};

// Pooling
pub use pool::{InstancePool, IsolationStrategy, ScopeToken};

pub use config::RepConfig;

// Derive support
pub use rep_macros::Rep;
pub use serde_json;
