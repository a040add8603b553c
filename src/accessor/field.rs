//! Initialization field slots
//!
//! A [`Field`] is the storage behind one declared initialization field. It
//! holds the value copied in from the options map and, when the declaration
//! carries one, the default returned while no value has been supplied.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Storage for one initialization field
///
/// JSON `null` and an absent option are the same thing here: both leave the
/// slot without a value, so a declared default shows through. A supplied
/// `false` also gives way to a declared default; `0` and `""` are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<V> {
    value: Option<V>,
    default: Option<V>,
}

impl<V> Default for Field<V> {
    fn default() -> Self {
        Self {
            value: None,
            default: None,
        }
    }
}

impl<V> Field<V> {
    /// A field holding `value`
    pub fn with_value(value: V) -> Self {
        Self {
            value: Some(value),
            default: None,
        }
    }

    /// The supplied value, falling back to the default
    pub fn get(&self) -> Option<&V> {
        self.value.as_ref().or(self.default.as_ref())
    }

    /// Whether a value was supplied, ignoring defaults
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Overwrite the supplied value
    pub fn set(&mut self, value: Option<V>) {
        self.value = value;
    }

    /// Drop both the supplied value and the cached default
    pub fn clear(&mut self) {
        self.value = None;
        self.default = None;
    }

    /// Take the supplied value out of the slot
    pub fn take(&mut self) -> Option<V> {
        self.value.take()
    }
}

impl<V: DeserializeOwned> Field<V> {
    /// Overwrite the slot from an option and the declared default
    ///
    /// Prior state is discarded, never merged.
    pub fn assign(
        &mut self,
        option: Option<&Value>,
        default: Option<&Value>,
    ) -> serde_json::Result<()> {
        self.default = decode(default)?;
        self.value = match option {
            Some(Value::Bool(false)) if self.default.is_some() => None,
            option => decode(option)?,
        };
        Ok(())
    }
}

impl<V: Serialize> Field<V> {
    /// The current value as JSON, `null` when neither value nor default exists
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self.get())
    }
}

fn decode<V: DeserializeOwned>(value: Option<&Value>) -> serde_json::Result<Option<V>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone()).map(Some),
    }
}
