//! Scope tokens and isolation strategies

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

/// Identifies the scope a pooled instance belongs to
///
/// Two callers share an instance only when they use the same pool, the same
/// type and the same token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeToken(u64);

impl ScopeToken {
    /// The scope shared by every caller that does not pick one
    pub const GLOBAL: Self = Self(0);

    /// A caller-chosen scope
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// A scope private to the calling thread
    #[must_use]
    pub fn current_thread() -> Self {
        let mut hasher = FxHasher::default();
        std::thread::current().id().hash(&mut hasher);
        // Keep clear of GLOBAL
        Self(hasher.finish() | (1 << 63))
    }

    /// Raw token value
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl Default for ScopeToken {
    fn default() -> Self {
        Self::GLOBAL
    }
}

/// Where pooled instances live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolationStrategy {
    /// Slots live in the calling thread's storage, nothing is shared between threads
    #[default]
    ThreadLocal,
    /// Slots live in one map behind a mutex, shared by every thread
    Locked,
}
