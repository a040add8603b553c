//! Pooled instance reuse
//!
//! An [`InstancePool`] keeps one reusable instance per (type, scope) and hands
//! it out reset and reinitialized, so hot projection paths do not allocate a
//! new instance per call. The instance is checked out of its slot while the
//! caller's closure runs: a nested or concurrent request for the same key
//! never observes in-flight state, it simply gets a fresh instance.

mod batch;
pub mod scope;

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use rustc_hash::FxHashMap;
use thread_local::ThreadLocal;

use crate::accessor::Options;
use crate::config::RepConfig;
use crate::descriptor::TypeDescriptor;
use crate::error::Result;
use crate::projector::Projection;
use crate::utils::logging::log_slot_created;

pub use scope::{IsolationStrategy, ScopeToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SlotKey {
    type_id: TypeId,
    scope: ScopeToken,
}

/// Idle instances by key
type Slots = FxHashMap<SlotKey, Box<dyn Any + Send>>;

/// Reusable instances keyed by type and scope
///
/// Every thread's slots are owned by the pool, so dropping the pool drops
/// them all, worker threads included.
#[derive(Debug)]
pub struct InstancePool {
    isolation: IsolationStrategy,
    per_thread: ThreadLocal<RefCell<Slots>>,
    locked: Mutex<Slots>,
}

impl Default for InstancePool {
    fn default() -> Self {
        Self::new(IsolationStrategy::default())
    }
}

impl InstancePool {
    /// Create an empty pool
    #[must_use]
    pub fn new(isolation: IsolationStrategy) -> Self {
        Self {
            isolation,
            per_thread: ThreadLocal::new(),
            locked: Mutex::new(FxHashMap::default()),
        }
    }

    /// Create a pool using the configured isolation strategy
    #[must_use]
    pub fn from_config(config: &RepConfig) -> Self {
        Self::new(config.isolation)
    }

    /// Process-wide pool with thread-local isolation
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<InstancePool> = OnceLock::new();
        GLOBAL.get_or_init(Self::default)
    }

    /// The pool's isolation strategy
    #[must_use]
    pub fn isolation(&self) -> IsolationStrategy {
        self.isolation
    }

    /// Run `f` on the shared instance for `scope`, reset and reinitialized
    /// from `options`
    ///
    /// # Arguments
    /// * `descriptor` - Descriptor of the pooled type
    /// * `scope` - Scope the instance belongs to
    /// * `options` - Options the instance is reinitialized with
    /// * `f` - Receives the instance; it must not keep references past its return
    ///
    /// # Errors
    /// Returns [`RepError::InvalidOption`](crate::RepError::InvalidOption) if an
    /// option cannot be decoded. The instance stays pooled either way.
    pub fn with_shared<T, R, F>(
        &self,
        descriptor: &TypeDescriptor<T>,
        scope: ScopeToken,
        options: Options,
        f: F,
    ) -> Result<R>
    where
        T: Default + Send + 'static,
        F: FnOnce(&mut T) -> R,
    {
        let key = SlotKey {
            type_id: TypeId::of::<T>(),
            scope,
        };

        let mut instance = self
            .check_out::<T>(&key)
            .unwrap_or_else(|| {
                log_slot_created(descriptor.type_name(), scope.id());
                Box::default()
            });

        descriptor.reset(&mut *instance);
        let result = descriptor
            .initialize(&mut *instance, options)
            .map(|()| f(&mut *instance));

        self.check_in(key, instance);
        result
    }

    /// Project the shared instance for `scope` through `set`
    pub fn shared_project<T>(
        &self,
        descriptor: &TypeDescriptor<T>,
        scope: ScopeToken,
        options: Options,
        set: &str,
    ) -> Result<Projection>
    where
        T: Default + Send + 'static,
    {
        self.with_shared(descriptor, scope, options, |instance| {
            descriptor.project(instance, set)
        })?
    }

    /// Project the shared instance for `scope` through `set` and encode it as JSON
    pub fn shared_to_json<T>(
        &self,
        descriptor: &TypeDescriptor<T>,
        scope: ScopeToken,
        options: Options,
        set: &str,
    ) -> Result<String>
    where
        T: Default + Send + 'static,
    {
        self.with_shared(descriptor, scope, options, |instance| {
            descriptor.to_json_set(instance, set)
        })?
    }

    /// Drop the idle instances
    ///
    /// With thread-local isolation only the calling thread's instances are
    /// dropped; the rest go when the pool does.
    pub fn clear(&self) {
        match self.isolation {
            IsolationStrategy::ThreadLocal => {
                if let Some(slots) = self.per_thread.get() {
                    slots.borrow_mut().clear();
                }
            }
            IsolationStrategy::Locked => self.slots().clear(),
        }
    }

    /// Number of idle instances visible from the calling thread
    #[must_use]
    pub fn idle_len(&self) -> usize {
        match self.isolation {
            IsolationStrategy::ThreadLocal => self
                .per_thread
                .get()
                .map_or(0, |slots| slots.borrow().len()),
            IsolationStrategy::Locked => self.slots().len(),
        }
    }

    fn check_out<T: Send + 'static>(&self, key: &SlotKey) -> Option<Box<T>> {
        let slot = match self.isolation {
            IsolationStrategy::ThreadLocal => self.thread_slots().borrow_mut().remove(key),
            IsolationStrategy::Locked => self.slots().remove(key),
        };
        slot.and_then(|slot| slot.downcast::<T>().ok())
    }

    fn check_in<T: Send + 'static>(&self, key: SlotKey, instance: Box<T>) {
        match self.isolation {
            IsolationStrategy::ThreadLocal => {
                self.thread_slots().borrow_mut().insert(key, instance);
            }
            IsolationStrategy::Locked => {
                self.slots().insert(key, instance);
            }
        }
    }

    fn thread_slots(&self) -> &RefCell<Slots> {
        self.per_thread.get_or(|| RefCell::new(FxHashMap::default()))
    }

    fn slots(&self) -> MutexGuard<'_, Slots> {
        // Slots are independent, a panic elsewhere cannot leave one half-written
        self.locked.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
