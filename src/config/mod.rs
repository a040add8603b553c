//! Configuration for descriptors and instance pools.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RepError, Result};
use crate::pool::IsolationStrategy;
use crate::schema::DEFAULT_FIELD_SET;
use crate::utils::logging::log_config_loaded;

/// Configuration shared by descriptors and pools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepConfig {
    /// Field set projected when no set is named
    pub default_field_set: String,
    /// How pooled instances are kept apart
    pub isolation: IsolationStrategy,
    /// Log fields naming accessors a type does not have
    pub warn_unresolved_accessors: bool,
    /// Field-set declarations per type name, applied on top of the type's own
    pub field_sets: FxHashMap<String, Value>,
}

impl Default for RepConfig {
    fn default() -> Self {
        Self {
            default_field_set: DEFAULT_FIELD_SET.to_string(),
            isolation: IsolationStrategy::default(),
            warn_unresolved_accessors: true,
            field_sets: FxHashMap::default(),
        }
    }
}

impl RepConfig {
    /// Parse a configuration from JSON, missing keys take their defaults
    ///
    /// # Errors
    /// Returns [`RepError::Config`] if the text is not a valid configuration
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|err| RepError::Config(format!("invalid rep configuration: {err}")))?;
        log_config_loaded(config.field_sets.len());
        Ok(config)
    }
}
