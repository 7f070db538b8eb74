//! Version descriptors.
//!
//! A descriptor is the immutable record an instance contributes to the shared
//! registry. Only the numeric fields, the suffix, and the next-build marker
//! take part in precedence; `version` is kept for display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The pre-release identifier that marks an unstable "next" build.
pub const NEXT_PRERELEASE: &str = "next";

/// Version metadata of one library instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionDescriptor {
    /// Canonical display string, e.g. `2.1.0-rc10`.
    pub version: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Pre-release qualifier without the leading dash; empty for releases.
    #[serde(default)]
    pub suffix: String,
    /// Whether this is an unstable build ordered by build time.
    #[serde(default)]
    pub is_next: bool,
    /// Build timestamp (seconds since the epoch). Only consulted when a
    /// comparison involves a next build.
    #[serde(default)]
    pub build_time: u64,
}

impl VersionDescriptor {
    /// Create a release descriptor with no suffix.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        VersionDescriptor {
            version: format!("{major}.{minor}.{patch}"),
            major,
            minor,
            patch,
            suffix: String::new(),
            is_next: false,
            build_time: 0,
        }
    }

    /// Set the pre-release suffix, updating the display string.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self.version = self.render_version();
        self
    }

    /// Mark this descriptor as a next build with the given build time.
    pub fn with_next_build(mut self, build_time: u64) -> Self {
        self.is_next = true;
        self.build_time = build_time;
        self
    }

    /// Parse a semver string such as `1.4.0`, `1.4.0-rc.2` or
    /// `1.4.0-next+1700000000`.
    ///
    /// A pre-release whose first identifier is `next` marks a next build.
    /// An explicit `build_time` wins over numeric build metadata; anything
    /// else leaves the build time at zero.
    pub fn parse(text: &str, build_time: Option<u64>) -> Result<Self> {
        let parsed = semver::Version::parse(text.trim())?;
        let suffix = parsed.pre.as_str().to_string();
        let is_next = suffix
            .split('.')
            .next()
            .is_some_and(|id| id.eq_ignore_ascii_case(NEXT_PRERELEASE));
        let build_time = build_time
            .or_else(|| parsed.build.as_str().parse::<u64>().ok())
            .unwrap_or(0);

        Ok(VersionDescriptor {
            version: text.trim().to_string(),
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            suffix,
            is_next,
            build_time,
        })
    }

    fn render_version(&self) -> String {
        if self.suffix.is_empty() {
            format!("{}.{}.{}", self.major, self.minor, self.patch)
        } else {
            format!("{}.{}.{}-{}", self.major, self.minor, self.patch, self.suffix)
        }
    }
}

impl fmt::Display for VersionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version)?;
        if self.is_next {
            write!(f, " (next, built {})", self.build_time)?;
        }
        Ok(())
    }
}
