//! Per-type registry of field sets
//!
//! The registry is pure metadata: it never touches instances. Accessors named
//! here are only checked when a descriptor resolves them.

use itertools::Itertools;

use super::field_set::{FieldSet, FieldSpec};

/// Named field sets of one type, kept in definition order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRegistry {
    sets: Vec<FieldSet>,
}

impl FieldRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define the field set `name`, replacing any set already stored under it
    ///
    /// A replaced set keeps its position in definition order. Specs are never
    /// merged with the previous definition.
    pub fn define<I, S>(&mut self, name: impl Into<String>, specs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldSpec>,
    {
        self.insert(FieldSet::new(name, specs));
    }

    /// Store a prebuilt field set
    pub fn insert(&mut self, set: FieldSet) {
        match self.sets.iter_mut().find(|existing| existing.name == set.name) {
            Some(existing) => *existing = set,
            None => self.sets.push(set),
        }
    }

    /// Look up a field set by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSet> {
        self.sets.iter().find(|set| set.name == name)
    }

    /// Whether a set is registered under `name`
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All field sets in definition order
    pub fn sets(&self) -> impl Iterator<Item = &FieldSet> {
        self.sets.iter()
    }

    /// Registered set names in definition order
    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|set| set.name.as_str())
    }

    /// Number of registered sets
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether no set has been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Every output key across all sets, first occurrence wins
    #[must_use]
    pub fn all_output_keys(&self) -> Vec<&str> {
        self.sets
            .iter()
            .flat_map(FieldSet::output_keys)
            .unique()
            .collect_vec()
    }

    /// Every accessor name across all sets, first occurrence wins
    #[must_use]
    pub fn all_accessor_names(&self) -> Vec<&str> {
        self.sets
            .iter()
            .flat_map(FieldSet::accessor_names)
            .unique()
            .collect_vec()
    }
}
