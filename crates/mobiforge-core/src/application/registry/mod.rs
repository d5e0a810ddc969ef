//! Registries: the extension points of the pipeline.
//!
//! Both registries are cheap-to-clone handles over one shared map guarded by
//! an `RwLock`. The intended usage is to populate them at startup and only
//! resolve afterwards; concurrent `register` and `resolve` are still
//! synchronized by the lock.
//!
//! Every write is a single map insert or remove, so a panic while a lock is
//! held cannot leave a half-applied entry behind. Poisoned locks are therefore
//! recovered instead of surfaced.

pub mod adapter_registry;
pub mod template_registry;

pub use adapter_registry::AdapterRegistry;
pub use template_registry::TemplateRegistry;

use std::{
    collections::HashMap,
    hash::Hash,
    sync::{
        Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Shared keyed storage behind both registries.
struct Entries<K, V> {
    map: Arc<RwLock<HashMap<K, V>>>,
    lookups: Arc<AtomicUsize>,
}

impl<K, V> Clone for Entries<K, V> {
    fn clone(&self) -> Self {
        Self {
            map: Arc::clone(&self.map),
            lookups: Arc::clone(&self.lookups),
        }
    }
}

impl<K, V> Default for Entries<K, V> {
    fn default() -> Self {
        Self {
            map: Arc::new(RwLock::new(HashMap::new())),
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl<K: Eq + Hash + Ord + Clone, V: Clone> Entries<K, V> {
    fn read(&self) -> RwLockReadGuard<'_, HashMap<K, V>> {
        self.map.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, V>> {
        self.map.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert, returning whether an entry was replaced.
    fn insert(&self, key: K, value: V) -> bool {
        self.write().insert(key, value).is_some()
    }

    fn get(&self, key: &K) -> Option<V> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.read().get(key).cloned()
    }

    fn remove(&self, key: &K) -> bool {
        self.write().remove(key).is_some()
    }

    fn contains(&self, key: &K) -> bool {
        self.read().contains_key(key)
    }

    fn keys(&self) -> Vec<K> {
        let mut keys: Vec<K> = self.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn values(&self) -> Vec<(K, V)> {
        let mut entries: Vec<(K, V)> = self
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    fn len(&self) -> usize {
        self.read().len()
    }

    fn clear(&self) {
        self.write().clear();
    }

    fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}
