//! Version descriptors and precedence rules for coexisting library instances.
//!
//! Several copies of one library, possibly at different versions, can be
//! loaded into the same process. Each copy describes itself with a
//! [`VersionDescriptor`] built from its compile-time [`BuildInfo`], and
//! [`compare`] decides which of two copies is newer.
//!
//! # Ordering
//!
//! Descriptors are ordered by major, minor and patch. Ties go to the build
//! time when either side is a next build, and to the natural order of the
//! pre-release suffix otherwise. A release (empty suffix) outranks any
//! pre-release of the same numbers.

pub mod build_info;
pub mod compare;
pub mod descriptor;
pub mod error;
pub mod natural;

// Re-exports for convenience.
pub use build_info::BuildInfo;
pub use compare::{compare, compare_suffix, precedence};
pub use descriptor::VersionDescriptor;
pub use error::{CoreError, Result};
pub use natural::natural_cmp;
