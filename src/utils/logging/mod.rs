//! Logging utilities
//!
//! Consistent log lines for descriptor, projection and pool events. Nothing
//! here installs a logger; binaries and tests choose their own.

pub mod log;

pub use self::log::{
    log_config_loaded, log_descriptor_built, log_projection_failure, log_slot_created,
    log_unresolved_accessor,
};
