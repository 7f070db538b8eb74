//! Core error types.

/// Errors raised while turning build metadata into a version descriptor.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A numeric build field did not parse as a non-negative integer.
    #[error("build field '{field}' is not a valid integer: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// A boolean build field held something other than a truthy/falsy token.
    #[error("build field '{field}' is not a boolean token: '{value}'")]
    InvalidFlag { field: &'static str, value: String },

    /// A build field still holds its `__NAME__` placeholder.
    #[error("build field '{field}' was never substituted")]
    UnsubstitutedPlaceholder { field: &'static str },

    /// Semver parse error.
    #[error("invalid version: {0}")]
    InvalidVersion(#[from] semver::Error),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
