//! `coexist.toml` manifest parsing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use coexist_core::{BuildInfo, VersionDescriptor};
use coexist_registry::DEFAULT_REGISTRY_NAME;
use serde::{Deserialize, Serialize};

/// File name searched for by [`CoexistManifest::find_and_load`].
pub const MANIFEST_FILE: &str = "coexist.toml";

/// A simulated host process: the bundles it loads and its shared settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoexistManifest {
    /// Registry settings.
    #[serde(default)]
    pub registry: Option<RegistryConfig>,
    /// Warning settings.
    #[serde(default)]
    pub warnings: Option<WarningsConfig>,
    /// Bundles, initialized in the order listed.
    #[serde(default, rename = "bundle")]
    pub bundles: Vec<BundleConfig>,
}

/// Registry section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry name shared by all bundles.
    #[serde(default)]
    pub name: Option<String>,
}

/// Warnings section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// One bundled copy of the library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Label used in reports.
    pub name: String,
    /// Semver version, e.g. `2.1.0-rc10` or `3.0.0-next+1700000000`.
    pub version: String,
    /// Force the next-build marker on or off.
    #[serde(default)]
    pub is_next: Option<bool>,
    /// Build time; overrides numeric build metadata in `version`.
    #[serde(default)]
    pub build_time: Option<u64>,
}

impl BundleConfig {
    /// The build metadata this bundle would have been compiled with.
    pub fn build_info(&self) -> Result<BuildInfo> {
        let mut descriptor = VersionDescriptor::parse(&self.version, self.build_time)
            .with_context(|| format!("bundle '{}' has an invalid version", self.name))?;
        if let Some(is_next) = self.is_next {
            descriptor.is_next = is_next;
        }
        Ok(BuildInfo::from(&descriptor))
    }
}

impl CoexistManifest {
    /// Parse a manifest from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse coexist.toml")
    }

    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text)
    }

    /// Search `start` and its ancestors for `coexist.toml`.
    ///
    /// Returns the manifest and the directory that contains it.
    pub fn find_and_load(start: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = Some(start);
        while let Some(current) = dir {
            let candidate = current.join(MANIFEST_FILE);
            if candidate.is_file() {
                return Ok(Some((Self::load(&candidate)?, current.to_path_buf())));
            }
            dir = current.parent();
        }
        Ok(None)
    }

    pub fn registry_name(&self) -> &str {
        self.registry
            .as_ref()
            .and_then(|r| r.name.as_deref())
            .unwrap_or(DEFAULT_REGISTRY_NAME)
    }

    pub fn warnings_enabled(&self) -> bool {
        self.warnings.as_ref().map_or(true, |w| w.enabled)
    }
}
