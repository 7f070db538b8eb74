//! The shared, append-only version registry.
//!
//! Entries are only ever appended. A [`RegistrationHandle`] is the index of
//! an entry and refers to the same descriptor for the life of the registry.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use coexist_core::{compare, VersionDescriptor};
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Index of a registrant in a [`SharedRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationHandle(usize);

impl RegistrationHandle {
    /// Refer to the entry at `index`, typically one reported by another
    /// instance.
    pub fn new(index: usize) -> Self {
        RegistrationHandle(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RegistrationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Storage behind a registry name.
#[derive(Debug, Default)]
pub(crate) struct RegistryEntries {
    entries: Mutex<Vec<VersionDescriptor>>,
}

/// A handle to a named registry inside a [`crate::SharedStore`].
///
/// Clones and every other handle obtained for the same name from the same
/// store observe the same entries.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    name: String,
    inner: Arc<RegistryEntries>,
}

impl SharedRegistry {
    pub(crate) fn from_entries(name: &str, inner: Arc<RegistryEntries>) -> Self {
        SharedRegistry {
            name: name.to_string(),
            inner,
        }
    }

    /// The name this registry is stored under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Append a descriptor and return its handle.
    ///
    /// Only the registrar appends, which keeps one entry per instance.
    pub(crate) fn append(&self, descriptor: VersionDescriptor) -> RegistrationHandle {
        let mut entries = self.lock();
        entries.push(descriptor);
        RegistrationHandle(entries.len() - 1)
    }

    /// The descriptor registered under `handle`.
    pub fn get(&self, handle: RegistrationHandle) -> Result<VersionDescriptor> {
        let entries = self.lock();
        entries
            .get(handle.0)
            .cloned()
            .ok_or(RegistryError::IndexOutOfRange {
                index: handle,
                len: entries.len(),
            })
    }

    /// A copy of every entry, in registration order.
    pub fn snapshot(&self) -> Vec<VersionDescriptor> {
        self.lock().clone()
    }

    /// Handle of the highest-precedence entry. The earliest registrant wins
    /// ties.
    pub fn newest(&self) -> Option<RegistrationHandle> {
        let entries = self.lock();
        let mut best: Option<(usize, &VersionDescriptor)> = None;
        for (index, candidate) in entries.iter().enumerate() {
            match best {
                Some((_, current)) if compare(candidate, current) <= 0 => {}
                _ => best = Some((index, candidate)),
            }
        }
        best.map(|(index, _)| RegistrationHandle(index))
    }

    /// Whether two handles share the same entries.
    pub fn same_registry(&self, other: &SharedRegistry) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<VersionDescriptor>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
