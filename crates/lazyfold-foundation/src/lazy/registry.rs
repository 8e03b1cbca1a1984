//! Per-scope instance registry.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use lazyfold_core::TreeHost;

use super::loader::LazyLoader;
use super::scope::ScopeIdentity;

/// Maps scope identities to live loader instances.
///
/// Enforces the at-most-one-loader-per-scope invariant: callers check
/// [`get`](Self::get) before constructing for a key, which is exactly what
/// [`LazyLoader::get_or_create`] does. The registry is an explicit value
/// owned by the composition root, not ambient state.
///
/// Cloning is cheap; clones share the same map.
pub struct InstanceRegistry<H: TreeHost> {
    entries: Rc<RefCell<FxHashMap<ScopeIdentity, LazyLoader<H>>>>,
}

impl<H: TreeHost> InstanceRegistry<H> {
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(FxHashMap::default())),
        }
    }

    /// Returns the registered instance for `key`, if any.
    pub fn get(&self, key: &ScopeIdentity) -> Option<LazyLoader<H>> {
        self.entries.borrow().get(key).cloned()
    }

    /// Registers `instance` under `key`, replacing any previous entry.
    pub fn put(&self, key: ScopeIdentity, instance: LazyLoader<H>) {
        self.entries.borrow_mut().insert(key, instance);
    }

    /// Removes the entry for `key`. Unknown keys are ignored.
    pub fn remove(&self, key: &ScopeIdentity) {
        self.entries.borrow_mut().remove(key);
    }

    pub fn contains(&self, key: &ScopeIdentity) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl<H: TreeHost> Default for InstanceRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: TreeHost> Clone for InstanceRegistry<H> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}
