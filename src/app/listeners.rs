//! Concurrent listener registry.
//!
//! Listeners are identified by the address of their `Arc` allocation, so
//! registering the same `Arc` twice is a no-op and removal needs the same
//! `Arc` (or a clone of it).
//!
//! Iteration works on a snapshot taken under a short read lock.  The lock
//! is released before any callback runs, so a listener may add or remove
//! listeners (including itself) from inside a callback.  Changes made
//! during a fan-out take effect from the next fan-out.

use std::sync::{Arc, PoisonError, RwLock};

use super::ports::StatusListener;

pub type SharedListener = Arc<dyn StatusListener>;

#[derive(Default)]
pub struct ListenerSet {
    inner: RwLock<Vec<SharedListener>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`.  Returns `false` if it was already present.
    pub fn add(&self, listener: SharedListener) -> bool {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if guard.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        guard.push(listener);
        true
    }

    /// Unregister `listener`.  Returns `false` if it was not present.
    pub fn remove(&self, listener: &SharedListener) -> bool {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|l| !same_listener(l, listener));
        guard.len() != before
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point-in-time copy of the registered listeners.
    pub fn snapshot(&self) -> Vec<SharedListener> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Call `f` for every listener in a snapshot.
    pub fn for_each(&self, mut f: impl FnMut(&dyn StatusListener)) {
        for listener in self.snapshot() {
            f(&*listener);
        }
    }
}

impl core::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerSet").field("len", &self.len()).finish()
    }
}

/// Compare allocation addresses only; vtable pointers for the same type can
/// differ between codegen units.
fn same_listener(a: &SharedListener, b: &SharedListener) -> bool {
    core::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
