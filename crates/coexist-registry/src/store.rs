//! Name-keyed store of process-wide shared state.
//!
//! Independently initialized instances only share what they fetch from the
//! same [`SharedStore`]. The store is normally created once at startup and
//! handed to every instance; [`SharedStore::global`] exists for hosts that
//! have no place to inject one.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::registry::{RegistryEntries, SharedRegistry};
use crate::warnings::WarningSwitch;

/// Well-known name of the version registry.
pub const DEFAULT_REGISTRY_NAME: &str = "coexist.versions";

/// Well-known name of the version-warnings flag.
pub const WARNINGS_FLAG_NAME: &str = "coexist.warnings";

type Resource = Arc<dyn Any + Send + Sync>;

/// A cloneable handle to a name-keyed resource map.
///
/// Clones share the same map. Resources are created lazily on first request
/// and never removed.
#[derive(Clone, Default)]
pub struct SharedStore {
    resources: Arc<Mutex<HashMap<String, Resource>>>,
}

impl SharedStore {
    /// Create an empty, independent store.
    pub fn new() -> Self {
        SharedStore::default()
    }

    /// The process-global store.
    pub fn global() -> &'static SharedStore {
        static GLOBAL: OnceLock<SharedStore> = OnceLock::new();
        GLOBAL.get_or_init(SharedStore::new)
    }

    /// Fetch the resource stored under `name`, creating it with `create` if
    /// this is the first request.
    ///
    /// Fails with [`RegistryError::TypeMismatch`] when the name is already
    /// taken by a resource of another type.
    pub fn get_or_create<T, F>(&self, name: &str, create: F) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        let mut resources = self.resources.lock().unwrap_or_else(PoisonError::into_inner);
        let resource = match resources.get(name) {
            Some(existing) => Arc::clone(existing),
            None => {
                debug!(name, "creating shared resource");
                let created: Resource = Arc::new(create());
                resources.insert(name.to_string(), Arc::clone(&created));
                created
            }
        };
        resource
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch {
                name: name.to_string(),
            })
    }

    /// The version registry stored under `name`.
    pub fn registry(&self, name: &str) -> Result<SharedRegistry> {
        let entries = self.get_or_create(name, RegistryEntries::default)?;
        Ok(SharedRegistry::from_entries(name, entries))
    }

    /// The registry stored under [`DEFAULT_REGISTRY_NAME`].
    pub fn default_registry(&self) -> Result<SharedRegistry> {
        self.registry(DEFAULT_REGISTRY_NAME)
    }

    /// The shared version-warnings flag. Starts enabled.
    pub fn warnings(&self) -> Result<WarningSwitch> {
        let flag = self.get_or_create(WARNINGS_FLAG_NAME, || AtomicBool::new(true))?;
        Ok(WarningSwitch::from_flag(flag))
    }

    /// Whether a resource exists under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.resources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Whether two handles refer to the same underlying store.
    pub fn same_store(&self, other: &SharedStore) -> bool {
        Arc::ptr_eq(&self.resources, &other.resources)
    }
}

impl fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resources = self.resources.lock().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<&String> = resources.keys().collect();
        names.sort();
        f.debug_struct("SharedStore").field("resources", &names).finish()
    }
}
