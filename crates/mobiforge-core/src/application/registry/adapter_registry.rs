//! Platform adapters keyed by platform id.

use std::sync::Arc;

use tracing::debug;

use super::Entries;
use crate::{
    application::{ApplicationError, ports::PlatformAdapter},
    domain::PlatformId,
};

/// Thread-safe adapter registry.
///
/// Keys are `PlatformId`s, which are lowercase, so `"iOS"` and `"ios"`
/// address the same entry. Re-registering a platform replaces its adapter.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    entries: Entries<PlatformId, Arc<dyn PlatformAdapter>>,
}

impl AdapterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the adapter for `adapter.platform()`.
    pub fn register(&self, adapter: impl PlatformAdapter + 'static) {
        self.register_shared(Arc::new(adapter));
    }

    pub fn register_shared(&self, adapter: Arc<dyn PlatformAdapter>) {
        let platform = adapter.platform().clone();
        if self.entries.insert(platform.clone(), adapter) {
            debug!(%platform, "Adapter overwritten");
        } else {
            debug!(%platform, "Adapter registered");
        }
    }

    /// Look up the adapter for `platform`.
    ///
    /// An unknown platform is an ordinary error, never a panic.
    pub fn resolve(
        &self,
        platform: &PlatformId,
    ) -> Result<Arc<dyn PlatformAdapter>, ApplicationError> {
        self.entries
            .get(platform)
            .ok_or_else(|| ApplicationError::UnsupportedPlatform {
                platform: platform.clone(),
            })
    }

    pub fn remove(&self, platform: &PlatformId) -> bool {
        self.entries.remove(platform)
    }

    pub fn contains(&self, platform: &PlatformId) -> bool {
        self.entries.contains(platform)
    }

    /// Registered platforms, sorted.
    pub fn platforms(&self) -> Vec<PlatformId> {
        self.entries.keys()
    }

    /// Registered adapters, sorted by platform.
    pub fn list(&self) -> Vec<Arc<dyn PlatformAdapter>> {
        self.entries.values().into_iter().map(|(_, a)| a).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of `resolve` calls made through any clone of this registry.
    pub fn lookup_count(&self) -> usize {
        self.entries.lookup_count()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("platforms", &self.platforms())
            .finish()
    }
}
