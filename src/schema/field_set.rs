//! Field set definitions
//!
//! A field set is an ordered list of output keys, each paired with the
//! accessor that supplies its value.

use std::fmt;

/// Name of the field set used when none is given
pub const DEFAULT_FIELD_SET: &str = "default";

/// One projected key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    /// Key written to the projection
    pub output_key: String,
    /// Accessor invoked to produce the value
    pub accessor_name: String,
}

impl FieldSpec {
    /// A field whose accessor has the same name as its output key
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            accessor_name: name.clone(),
            output_key: name,
        }
    }

    /// A field projected under `output_key` but read from `accessor_name`
    pub fn aliased(output_key: impl Into<String>, accessor_name: impl Into<String>) -> Self {
        Self {
            output_key: output_key.into(),
            accessor_name: accessor_name.into(),
        }
    }

    /// Whether the output key differs from the accessor name
    #[must_use]
    pub fn is_aliased(&self) -> bool {
        self.output_key != self.accessor_name
    }
}

impl From<&str> for FieldSpec {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FieldSpec {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl<K: Into<String>, A: Into<String>> From<(K, A)> for FieldSpec {
    fn from((output_key, accessor_name): (K, A)) -> Self {
        Self::aliased(output_key, accessor_name)
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_aliased() {
            write!(f, "{} => {}", self.output_key, self.accessor_name)
        } else {
            write!(f, "{}", self.output_key)
        }
    }
}

/// A named, ordered list of field specs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    /// Name the set is registered under
    pub name: String,
    /// Specs in declaration order
    pub specs: Vec<FieldSpec>,
}

impl FieldSet {
    /// Create a field set from anything convertible to specs
    pub fn new<I, S>(name: impl Into<String>, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldSpec>,
    {
        Self {
            name: name.into(),
            specs: specs.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of fields in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the set declares no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Output keys in declaration order
    pub fn output_keys(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.output_key.as_str())
    }

    /// Accessor names in declaration order
    pub fn accessor_names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.accessor_name.as_str())
    }
}
