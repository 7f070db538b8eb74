//! Registry error types.

use coexist_core::CoreError;

use crate::registry::RegistrationHandle;

/// Errors that can occur during registry operations.
///
/// Every variant reflects a wiring or ordering mistake in the host
/// integration. None of them are transient.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The instance already holds a registration handle.
    #[error("this instance is already registered as {index}")]
    AlreadyRegistered { index: RegistrationHandle },

    /// A lookup needed the instance's own handle before it registered.
    #[error("this instance has not registered its version yet")]
    NotRegistered,

    /// A handle that this registry never issued.
    #[error("registration handle {index} is out of range (registry holds {len} entries)")]
    IndexOutOfRange { index: RegistrationHandle, len: usize },

    /// The logger collaborator lacks a required capability.
    #[error("logger cannot emit {missing}")]
    InvalidLogger { missing: String },

    /// A store entry exists under the name but holds a different type.
    #[error("shared resource '{name}' holds a different type")]
    TypeMismatch { name: String },

    /// Build metadata could not be turned into a descriptor.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
