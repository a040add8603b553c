//! Memoized accessor cells

use std::sync::OnceLock;

/// A lazily computed value cached on the instance
///
/// Memoized accessors keep their result in a `Memo`; resetting a pooled
/// instance clears it so the next use recomputes.
#[derive(Debug)]
pub struct Memo<V> {
    cell: OnceLock<V>,
}

impl<V> Memo<V> {
    /// An empty cell
    pub fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// The cached value, computing it on first use
    pub fn get_or_init(&self, init: impl FnOnce() -> V) -> &V {
        self.cell.get_or_init(init)
    }

    /// The cached value if it was already computed
    pub fn get(&self) -> Option<&V> {
        self.cell.get()
    }

    /// Forget the cached value
    pub fn clear(&mut self) {
        self.cell.take();
    }
}

impl<V> Default for Memo<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for Memo<V> {
    fn clone(&self) -> Self {
        let cell = OnceLock::new();
        if let Some(value) = self.cell.get() {
            let _ = cell.set(value.clone());
        }
        Self { cell }
    }
}
