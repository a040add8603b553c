//! Logging utilities
//!
//! This module provides standardized logging functions for descriptor and
//! pool operations.

use crate::error::RepError;

/// Log a descriptor being frozen
///
/// # Arguments
/// * `type_name` - Name of the described type
/// * `sets` - Number of field sets
/// * `accessors` - Number of accessors
pub fn log_descriptor_built(type_name: &str, sets: usize, accessors: usize) {
    log::debug!("Built descriptor for {type_name} with {sets} field sets and {accessors} accessors");
}

/// Log a field naming an accessor the type does not have
///
/// # Arguments
/// * `type_name` - Name of the described type
/// * `set` - Field set containing the field
/// * `output_key` - Key the field would be written under
/// * `accessor` - The missing accessor
pub fn log_unresolved_accessor(type_name: &str, set: &str, output_key: &str, accessor: &str) {
    if output_key == accessor {
        log::warn!("{type_name}: field set '{set}' names unknown accessor '{accessor}'");
    } else {
        log::warn!(
            "{type_name}: field set '{set}' maps '{output_key}' to unknown accessor '{accessor}'"
        );
    }
}

/// Log a pooled instance being created for a new slot
///
/// # Arguments
/// * `type_name` - Name of the pooled type
/// * `scope` - Scope token value of the slot
pub fn log_slot_created(type_name: &str, scope: u64) {
    log::debug!("Created shared {type_name} instance for scope {scope:#x}");
}

/// Log a failed projection
pub fn log_projection_failure(type_name: &str, set: &str, err: &RepError) {
    log::debug!("Projection of {type_name} through '{set}' failed: {err}");
}

/// Log a loaded configuration
pub fn log_config_loaded(field_set_overrides: usize) {
    log::info!("Loaded rep configuration with {field_set_overrides} field set overrides");
}
