//! Shared version registry for coexisting library instances.
//!
//! When several copies of a library are loaded into one process, each copy
//! registers its version in a registry they all share and later asks that
//! registry which copy takes precedence.
//!
//! # Architecture
//!
//! - [`SharedStore`]: name-keyed shared state, injected into every instance
//!   (or the process-global one)
//! - [`SharedRegistry`]: append-only list of [`coexist_core::VersionDescriptor`]s
//! - [`VersionRegistrar`]: one per instance; registers once, then compares by
//!   [`RegistrationHandle`]
//! - [`WarningSwitch`]: shared on/off switch for conflict warnings
//!
//! Misuse (registering twice, looking up before registering, passing a
//! logger that cannot write paragraphs) is reported as a [`RegistryError`].

pub mod conflict;
pub mod diagnostics;
pub mod error;
pub mod registrar;
pub mod registry;
pub mod store;
pub mod warnings;

// Re-exports for convenience.
pub use conflict::{detect_conflict, warn_on_conflict, VersionConflict};
pub use diagnostics::{
    log_disable_version_warnings_instructions, BufferLogger, InstructionLogger, LogEntry,
    LoggerCapabilities, TracingLogger,
};
pub use error::{RegistryError, Result};
pub use registrar::VersionRegistrar;
pub use registry::{RegistrationHandle, SharedRegistry};
pub use store::{SharedStore, DEFAULT_REGISTRY_NAME, WARNINGS_FLAG_NAME};
pub use warnings::WarningSwitch;
