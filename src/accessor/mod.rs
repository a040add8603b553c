//! Accessors and initialization state
//!
//! This module holds the per-type accessor table, the field slots filled from
//! an options map, and the memoized cells pooled instances clear on reset.

pub mod field;
pub mod init;
pub mod memo;
pub mod table;

pub use field::Field;
pub use init::{AfterInitialize, BeforeInitialize, InitField, InitializationSpec, Options};
pub use memo::Memo;
pub use table::{Accessor, AccessorTable, Clearer, Getter};
