//! Detection of conflicting versions in a registry.

use serde::Serialize;
use tracing::warn;

use crate::diagnostics::{log_disable_version_warnings_instructions, InstructionLogger};
use crate::error::Result;
use crate::registrar::VersionRegistrar;
use crate::registry::RegistrationHandle;

/// Registrants disagree on precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionConflict {
    /// The registrant that takes precedence.
    pub winner: RegistrationHandle,
    /// Display version of the winner.
    pub winning_version: String,
    /// Display versions of every registrant, in registration order.
    pub versions: Vec<String>,
}

/// Report a conflict when at least two registrants differ in precedence.
///
/// Registrants of equal precedence (e.g. the same release bundled twice) do
/// not conflict.
pub fn detect_conflict(registrar: &VersionRegistrar) -> Result<Option<VersionConflict>> {
    let registry = registrar.registry();
    let Some(winner) = registry.newest() else {
        return Ok(None);
    };
    let winning = registry.get(winner)?;
    let entries = registry.snapshot();
    let differs = entries
        .iter()
        .any(|d| coexist_core::compare(d, &winning) != 0);
    if !differs {
        return Ok(None);
    }
    Ok(Some(VersionConflict {
        winner,
        winning_version: winning.version,
        versions: entries.into_iter().map(|d| d.version).collect(),
    }))
}

/// Detect a conflict and, if version warnings are enabled, log a warning
/// followed by instructions for silencing it.
///
/// The conflict is returned whether or not anything was logged.
pub fn warn_on_conflict(
    registrar: &VersionRegistrar,
    logger: &mut dyn InstructionLogger,
) -> Result<Option<VersionConflict>> {
    let conflict = detect_conflict(registrar)?;
    if let Some(conflict) = &conflict {
        if registrar.version_warnings_enabled() {
            warn!(
                versions = ?conflict.versions,
                winner = %conflict.winner,
                "multiple versions of the library are loaded; {} takes precedence",
                conflict.winning_version
            );
            log_disable_version_warnings_instructions(logger)?;
        }
    }
    Ok(conflict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::BufferLogger;
    use crate::store::SharedStore;
    use coexist_core::{BuildInfo, VersionDescriptor};

    fn registered(store: &SharedStore, version: &str) -> VersionRegistrar {
        let info = BuildInfo::from(&VersionDescriptor::parse(version, None).unwrap());
        let mut registrar = VersionRegistrar::new(store, info).unwrap();
        registrar.register_current_version().unwrap();
        registrar
    }

    #[test]
    fn single_instance_has_no_conflict() {
        let store = SharedStore::new();
        let only = registered(&store, "1.0.0");
        assert_eq!(detect_conflict(&only).unwrap(), None);
    }

    #[test]
    fn identical_versions_do_not_conflict() {
        let store = SharedStore::new();
        let a = registered(&store, "1.0.0");
        let _b = registered(&store, "1.0.0");
        assert_eq!(detect_conflict(&a).unwrap(), None);
    }

    #[test]
    fn differing_versions_conflict() {
        let store = SharedStore::new();
        let a = registered(&store, "1.0.0");
        let _b = registered(&store, "1.2.0");
        let conflict = detect_conflict(&a).unwrap().unwrap();
        assert_eq!(conflict.winner, RegistrationHandle::new(1));
        assert_eq!(conflict.winning_version, "1.2.0");
        assert_eq!(conflict.versions, vec!["1.0.0", "1.2.0"]);
    }

    #[test]
    fn instructions_only_when_enabled() {
        let store = SharedStore::new();
        let a = registered(&store, "1.0.0");
        let _b = registered(&store, "2.0.0");

        let mut logger = BufferLogger::default();
        assert!(warn_on_conflict(&a, &mut logger).unwrap().is_some());
        assert!(!logger.entries.is_empty());

        a.disable_version_warnings();
        let mut quiet = BufferLogger::default();
        assert!(warn_on_conflict(&a, &mut quiet).unwrap().is_some());
        assert!(quiet.entries.is_empty());
    }
}
