//! Per-instance registration and lookups.
//!
//! Each library instance owns one [`VersionRegistrar`]. It registers the
//! instance's build metadata in the shared registry exactly once and then
//! answers precedence questions by registry handle, so an instance can
//! compare itself against descriptors contributed by copies it never loaded.

use coexist_core::{compare, BuildInfo, VersionDescriptor};
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::registry::{RegistrationHandle, SharedRegistry};
use crate::store::{SharedStore, DEFAULT_REGISTRY_NAME};
use crate::warnings::WarningSwitch;

/// Registration state of one library instance.
#[derive(Debug)]
pub struct VersionRegistrar {
    build: BuildInfo,
    registry: SharedRegistry,
    warnings: WarningSwitch,
    handle: Option<RegistrationHandle>,
}

impl VersionRegistrar {
    /// Attach an instance to the default registry of `store`.
    pub fn new(store: &SharedStore, build: BuildInfo) -> Result<Self> {
        Self::with_registry_name(store, DEFAULT_REGISTRY_NAME, build)
    }

    /// Attach an instance to the registry stored under `name`.
    pub fn with_registry_name(store: &SharedStore, name: &str, build: BuildInfo) -> Result<Self> {
        Ok(VersionRegistrar {
            build,
            registry: store.registry(name)?,
            warnings: store.warnings()?,
            handle: None,
        })
    }

    /// Parse this instance's build metadata and append it to the registry.
    ///
    /// Fails with [`RegistryError::AlreadyRegistered`] on a second call,
    /// leaving the registry untouched.
    pub fn register_current_version(&mut self) -> Result<RegistrationHandle> {
        if let Some(index) = self.handle {
            return Err(RegistryError::AlreadyRegistered { index });
        }
        let descriptor = self.build.descriptor()?;
        let version = descriptor.version.clone();
        let handle = self.registry.append(descriptor);
        debug!(
            registry = self.registry.name(),
            %handle,
            %version,
            "registered instance version"
        );
        self.handle = Some(handle);
        Ok(handle)
    }

    pub fn is_registered(&self) -> bool {
        self.handle.is_some()
    }

    /// This instance's handle.
    pub fn version_index(&self) -> Result<RegistrationHandle> {
        self.handle.ok_or(RegistryError::NotRegistered)
    }

    /// The descriptor under `index`, or this instance's own when `None`.
    pub fn version_info(&self, index: Option<RegistrationHandle>) -> Result<VersionDescriptor> {
        let handle = match index {
            Some(handle) => handle,
            None => self.version_index()?,
        };
        self.registry.get(handle)
    }

    /// Compare this instance against the registrant at `other`.
    ///
    /// Positive means this instance is newer, zero equal precedence,
    /// negative older.
    pub fn compare_with_version(&self, other: RegistrationHandle) -> Result<i64> {
        let own = self.version_info(None)?;
        let theirs = self.registry.get(other)?;
        Ok(compare(&own, &theirs))
    }

    /// Display strings of every registrant, in registration order.
    pub fn all_versions(&self) -> Vec<String> {
        self.registry
            .snapshot()
            .into_iter()
            .map(|d| d.version)
            .collect()
    }

    /// Handle of the registrant that takes precedence.
    pub fn newest_index(&self) -> Option<RegistrationHandle> {
        self.registry.newest()
    }

    /// Whether this instance is the one that takes precedence.
    pub fn is_newest(&self) -> Result<bool> {
        let own = self.version_index()?;
        Ok(self.newest_index() == Some(own))
    }

    pub fn disable_version_warnings(&self) {
        self.warnings.disable();
    }

    pub fn version_warnings_enabled(&self) -> bool {
        self.warnings.enabled()
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }
}
