//! Per-document resolution cache
//!
//! Keys are descriptor identities, not values: two equal arrays at different
//! places in a document are resolved separately, while every reference to
//! the same object shares one model.
//!
//! Each identity is built at most once. The first thread to [`claim`] a key
//! builds its model while later claimants wait on the in-flight entry. A
//! build that fails or yields nothing cacheable releases the key, and the
//! next waiter takes it over.
//!
//! [`claim`]: ResolutionCache::claim

use crate::model::ColorModel;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

#[derive(Debug)]
enum Slot {
    Ready(Arc<ColorModel>),
    Building(ThreadId),
}

#[derive(Debug)]
struct State<K> {
    slots: HashMap<K, Slot>,
    /// Key each blocked thread is waiting for
    waiting: HashMap<ThreadId, K>,
}

impl<K: Eq + Hash> State<K> {
    /// Whether `owner`, directly or through the builds it waits on, is
    /// waiting for `me`
    fn leads_to(&self, mut owner: ThreadId, me: ThreadId) -> bool {
        for _ in 0..=self.waiting.len() {
            if owner == me {
                return true;
            }
            match self.waiting.get(&owner).and_then(|key| self.slots.get(key)) {
                Some(Slot::Building(next)) => owner = *next,
                _ => return false,
            }
        }
        false
    }
}

/// Result of [`ResolutionCache::claim`]
pub enum Claim<'a, K: Eq + Hash + Clone> {
    /// The model was already built
    Ready(Arc<ColorModel>),
    /// The caller now owns the build for this key
    Vacant(BuildSlot<'a, K>),
    /// The key is being built by this thread, or by a thread that is itself
    /// waiting on this one; waiting would never finish
    Cycle,
}

/// Exclusive right to build the model for one key
///
/// Dropping the slot without [`publish`](Self::publish) releases the key.
pub struct BuildSlot<'a, K: Eq + Hash + Clone> {
    cache: &'a ResolutionCache<K>,
    key: K,
    published: bool,
}

impl<K: Eq + Hash + Clone> BuildSlot<'_, K> {
    /// Store `model` and wake every waiter; returns the cached model
    pub fn publish(mut self, model: Arc<ColorModel>) -> Arc<ColorModel> {
        self.published = true;
        let mut state = self.cache.lock();
        let stored = match state.slots.get(&self.key) {
            Some(Slot::Ready(existing)) => Arc::clone(existing),
            _ => {
                state
                    .slots
                    .insert(self.key.clone(), Slot::Ready(Arc::clone(&model)));
                model
            }
        };
        self.cache.settled.notify_all();
        stored
    }
}

impl<K: Eq + Hash + Clone> Drop for BuildSlot<'_, K> {
    fn drop(&mut self) {
        if self.published {
            return;
        }
        let me = thread::current().id();
        let mut state = self.cache.lock();
        if matches!(state.slots.get(&self.key), Some(Slot::Building(owner)) if *owner == me) {
            state.slots.remove(&self.key);
        }
        self.cache.settled.notify_all();
    }
}

/// Identity-keyed map from descriptors to resolved models
#[derive(Debug)]
pub struct ResolutionCache<K> {
    state: Mutex<State<K>>,
    settled: Condvar,
}

impl<K: Eq + Hash + Clone> ResolutionCache<K> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                slots: HashMap::new(),
                waiting: HashMap::new(),
            }),
            settled: Condvar::new(),
        }
    }

    // Models are immutable and slots are released on unwind, so a panic
    // elsewhere cannot leave the map torn
    fn lock(&self) -> MutexGuard<'_, State<K>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached model for `key`, or the right to build it
    ///
    /// Blocks while another thread is building `key`. The model itself is
    /// built outside the lock, so builds of unrelated keys run in parallel.
    pub fn claim(&self, key: K) -> Claim<'_, K> {
        let me = thread::current().id();
        let mut state = self.lock();
        loop {
            let owner = match state.slots.get(&key) {
                Some(Slot::Ready(model)) => return Claim::Ready(Arc::clone(model)),
                Some(Slot::Building(owner)) => Some(*owner),
                None => None,
            };
            let Some(owner) = owner else {
                state.slots.insert(key.clone(), Slot::Building(me));
                return Claim::Vacant(BuildSlot {
                    cache: self,
                    key,
                    published: false,
                });
            };
            if state.leads_to(owner, me) {
                return Claim::Cycle;
            }

            state.waiting.insert(me, key.clone());
            state = self
                .settled
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
            state.waiting.remove(&me);
        }
    }

    pub fn get(&self, key: &K) -> Option<Arc<ColorModel>> {
        match self.lock().slots.get(key) {
            Some(Slot::Ready(model)) => Some(Arc::clone(model)),
            _ => None,
        }
    }

    /// Insert `model` unless `key` is already built; returns the cached model
    pub fn insert(&self, key: K, model: Arc<ColorModel>) -> Arc<ColorModel> {
        let mut state = self.lock();
        let stored = match state.slots.get(&key) {
            Some(Slot::Ready(existing)) => Arc::clone(existing),
            _ => {
                state.slots.insert(key, Slot::Ready(Arc::clone(&model)));
                model
            }
        };
        self.settled.notify_all();
        stored
    }

    /// Number of built models
    pub fn len(&self) -> usize {
        self.lock()
            .slots
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every built entry; models already handed out stay valid and
    /// builds in progress are unaffected
    pub fn clear(&self) {
        self.lock()
            .slots
            .retain(|_, slot| matches!(slot, Slot::Building(_)));
    }
}

impl<K: Eq + Hash + Clone> Default for ResolutionCache<K> {
    fn default() -> Self {
        Self::new()
    }
}
