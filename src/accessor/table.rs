//! Accessor tables
//!
//! An [`AccessorTable`] maps accessor names to typed getter functions for one
//! type. Getters take the instance by shared reference and return the value
//! already encoded as JSON. Accessors backed by cached state also carry a
//! clear function used when a pooled instance is reset.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::Value;

/// A getter returning an encoded value
pub type Getter<T> = Arc<dyn Fn(&T) -> serde_json::Result<Value> + Send + Sync>;

/// A function dropping whatever an accessor has cached on the instance
pub type Clearer<T> = Arc<dyn Fn(&mut T) + Send + Sync>;

/// A named zero-argument read operation on `T`
pub struct Accessor<T> {
    name: String,
    getter: Getter<T>,
    clearer: Option<Clearer<T>>,
}

impl<T> Accessor<T> {
    /// Wrap a getter returning any serializable value
    pub fn new<F, R>(name: impl Into<String>, getter: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Serialize,
    {
        Self::from_getter(
            name,
            Arc::new(move |instance: &T| serde_json::to_value(getter(instance))),
        )
    }

    /// Wrap an already type-erased getter
    pub fn from_getter(name: impl Into<String>, getter: Getter<T>) -> Self {
        Self {
            name: name.into(),
            getter,
            clearer: None,
        }
    }

    /// Attach a clear function run when the instance is reset
    #[must_use]
    pub fn with_clearer(mut self, clearer: Clearer<T>) -> Self {
        self.clearer = Some(clearer);
        self
    }

    /// Accessor name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the getter
    pub fn read(&self, instance: &T) -> serde_json::Result<Value> {
        (self.getter)(instance)
    }

    /// Whether the accessor caches state that a reset must drop
    pub fn is_clearable(&self) -> bool {
        self.clearer.is_some()
    }

    /// Drop cached state, returns `false` when there is nothing to clear
    pub fn clear(&self, instance: &mut T) -> bool {
        match &self.clearer {
            Some(clearer) => {
                clearer(instance);
                true
            }
            None => false,
        }
    }
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            getter: Arc::clone(&self.getter),
            clearer: self.clearer.clone(),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("name", &self.name)
            .field("clearable", &self.is_clearable())
            .finish()
    }
}

/// Name-indexed accessors of one type, in registration order
pub struct AccessorTable<T> {
    entries: Vec<Accessor<T>>,
    index: FxHashMap<String, usize>,
}

impl<T> Default for AccessorTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<T> Clone for AccessorTable<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T> fmt::Debug for AccessorTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<T> AccessorTable<T> {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an accessor, replacing one with the same name
    pub fn insert(&mut self, accessor: Accessor<T>) {
        match self.index.get(accessor.name()).copied() {
            Some(position) => self.entries[position] = accessor,
            None => {
                self.index.insert(accessor.name().to_string(), self.entries.len());
                self.entries.push(accessor);
            }
        }
    }

    /// Position of an accessor, stable for the lifetime of the table
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Look up an accessor by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Accessor<T>> {
        self.position(name).map(|position| &self.entries[position])
    }

    /// Look up an accessor by position
    #[must_use]
    pub fn at(&self, position: usize) -> Option<&Accessor<T>> {
        self.entries.get(position)
    }

    /// Read `name` from `instance`, `None` when no such accessor exists
    pub fn read(&self, instance: &T, name: &str) -> Option<serde_json::Result<Value>> {
        self.get(name).map(|accessor| accessor.read(instance))
    }

    /// Clear the cached state behind `name`, if it has any
    pub fn clear(&self, instance: &mut T, name: &str) -> bool {
        self.get(name).is_some_and(|accessor| accessor.clear(instance))
    }

    /// Whether an accessor named `name` exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Accessor names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Accessor::name)
    }

    /// Number of accessors
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
