//! `coexist simulate` — load every bundle of a manifest into one simulated
//! host process and report which one wins.

use anyhow::{Context, Result};
use coexist_core::VersionDescriptor;
use coexist_registry::{
    detect_conflict, warn_on_conflict, BufferLogger, RegistrationHandle, SharedStore,
    TracingLogger, VersionConflict, VersionRegistrar,
};
use serde::Serialize;

use super::OutputFormat;
use crate::manifest::CoexistManifest;

/// A bundle that has registered itself.
#[derive(Debug)]
pub struct LoadedBundle {
    pub name: String,
    pub registrar: VersionRegistrar,
}

/// How one instance ranks against another.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub other: RegistrationHandle,
    pub result: i64,
}

/// One registered instance.
#[derive(Debug, Clone, Serialize)]
pub struct InstanceReport {
    pub bundle: String,
    pub handle: RegistrationHandle,
    pub descriptor: VersionDescriptor,
    pub comparisons: Vec<Comparison>,
}

/// Outcome of a simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub registry: String,
    pub warnings_enabled: bool,
    pub instances: Vec<InstanceReport>,
    /// Bundle name of the instance that takes precedence.
    pub winner: Option<String>,
    pub conflict: Option<VersionConflict>,
}

/// Register each bundle, in manifest order, against one shared store.
pub fn load_bundles(manifest: &CoexistManifest, store: &SharedStore) -> Result<Vec<LoadedBundle>> {
    if !manifest.warnings_enabled() {
        store.warnings()?.disable();
    }

    let mut loaded = Vec::with_capacity(manifest.bundles.len());
    for bundle in &manifest.bundles {
        let build = bundle.build_info()?;
        let mut registrar =
            VersionRegistrar::with_registry_name(store, manifest.registry_name(), build)?;
        registrar
            .register_current_version()
            .with_context(|| format!("registering bundle '{}'", bundle.name))?;
        loaded.push(LoadedBundle {
            name: bundle.name.clone(),
            registrar,
        });
    }
    Ok(loaded)
}

/// Build the report for a set of loaded bundles.
pub fn build_report(manifest: &CoexistManifest, loaded: &[LoadedBundle]) -> Result<SimulationReport> {
    let mut instances = Vec::with_capacity(loaded.len());
    for bundle in loaded {
        let handle = bundle.registrar.version_index()?;
        let mut comparisons = Vec::new();
        for other in loaded {
            let other = other.registrar.version_index()?;
            if other != handle {
                comparisons.push(Comparison {
                    other,
                    result: bundle.registrar.compare_with_version(other)?,
                });
            }
        }
        instances.push(InstanceReport {
            bundle: bundle.name.clone(),
            handle,
            descriptor: bundle.registrar.version_info(None)?,
            comparisons,
        });
    }

    let (winner, conflict) = match loaded.first() {
        Some(first) => {
            let newest = first.registrar.newest_index();
            let winner = loaded
                .iter()
                .find(|b| b.registrar.version_index().ok() == newest)
                .map(|b| b.name.clone());
            (winner, detect_conflict(&first.registrar)?)
        }
        None => (None, None),
    };

    Ok(SimulationReport {
        registry: manifest.registry_name().to_string(),
        warnings_enabled: manifest.warnings_enabled(),
        instances,
        winner,
        conflict,
    })
}

/// Render a report for humans.
pub fn render_human(report: &SimulationReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== Registry '{}' ===\n", report.registry));
    if report.instances.is_empty() {
        out.push_str("  (no bundles)\n");
        return out;
    }
    for instance in &report.instances {
        out.push_str(&format!(
            "  {:<4} {:<16} {}\n",
            instance.handle.to_string(),
            instance.bundle,
            instance.descriptor
        ));
        for c in &instance.comparisons {
            let relation = match c.result {
                r if r > 0 => "newer than",
                r if r < 0 => "older than",
                _ => "equal to",
            };
            out.push_str(&format!("         {relation} {}\n", c.other));
        }
    }
    out.push('\n');
    if let Some(winner) = &report.winner {
        out.push_str(&format!("Winner: {winner}\n"));
    }
    match (&report.conflict, report.warnings_enabled) {
        (Some(_), true) => out.push_str("Conflict: versions differ (warnings enabled)\n"),
        (Some(_), false) => out.push_str("Conflict: versions differ (warnings disabled)\n"),
        (None, _) => out.push_str("Conflict: none\n"),
    }
    out
}

pub fn run(manifest: &CoexistManifest, format: Option<&str>) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let store = SharedStore::new();
    let loaded = load_bundles(manifest, &store)?;
    let report = build_report(manifest, &loaded)?;

    match format {
        OutputFormat::Human => {
            print!("{}", render_human(&report));
            if let Some(first) = loaded.first() {
                let mut logger = BufferLogger::default();
                warn_on_conflict(&first.registrar, &mut logger)?;
                if !logger.entries.is_empty() {
                    println!();
                    print!("{logger}");
                }
            }
        }
        OutputFormat::Json => {
            if let Some(first) = loaded.first() {
                warn_on_conflict(&first.registrar, &mut TracingLogger)?;
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(text: &str) -> CoexistManifest {
        CoexistManifest::parse(text).unwrap()
    }

    const THREE: &str = r#"
[[bundle]]
name = "app"
version = "2.0.0-rc9"

[[bundle]]
name = "plugin"
version = "2.0.0-rc10"

[[bundle]]
name = "legacy"
version = "1.9.3"
"#;

    #[test]
    fn winner_and_comparisons() {
        let m = manifest(THREE);
        let loaded = load_bundles(&m, &SharedStore::new()).unwrap();
        let report = build_report(&m, &loaded).unwrap();

        assert_eq!(report.winner.as_deref(), Some("plugin"));
        assert_eq!(report.instances.len(), 3);
        let app = &report.instances[0];
        assert_eq!(app.comparisons.len(), 2);
        assert!(app.comparisons[0].result < 0, "rc9 is older than rc10");
        assert!(app.comparisons[1].result > 0, "2.0.0-rc9 is newer than 1.9.3");

        let conflict = report.conflict.unwrap();
        assert_eq!(conflict.versions, vec!["2.0.0-rc9", "2.0.0-rc10", "1.9.3"]);
    }

    #[test]
    fn disabled_warnings_apply_to_store() {
        let m = manifest(&format!("[warnings]\nenabled = false\n{THREE}"));
        let store = SharedStore::new();
        let loaded = load_bundles(&m, &store).unwrap();
        assert!(!store.warnings().unwrap().enabled());
        assert!(!loaded[0].registrar.version_warnings_enabled());
        let report = build_report(&m, &loaded).unwrap();
        assert!(render_human(&report).contains("warnings disabled"));
    }

    #[test]
    fn empty_manifest() {
        let m = CoexistManifest::default();
        let loaded = load_bundles(&m, &SharedStore::new()).unwrap();
        let report = build_report(&m, &loaded).unwrap();
        assert!(report.winner.is_none());
        assert!(report.conflict.is_none());
        assert!(render_human(&report).contains("(no bundles)"));
    }

    #[test]
    fn custom_registry_name() {
        let m = manifest("[registry]\nname = \"widgets\"\n[[bundle]]\nname = \"a\"\nversion = \"1.0.0\"\n");
        let store = SharedStore::new();
        load_bundles(&m, &store).unwrap();
        assert_eq!(store.registry("widgets").unwrap().len(), 1);
        assert!(!store.contains(coexist_registry::DEFAULT_REGISTRY_NAME));
    }

    #[test]
    fn invalid_bundle_is_reported() {
        let m = manifest("[[bundle]]\nname = \"bad\"\nversion = \"x\"\n");
        let err = load_bundles(&m, &SharedStore::new()).unwrap_err();
        assert!(format!("{err:#}").contains("bad"));
    }

    #[test]
    fn run_both_formats() {
        let m = manifest(THREE);
        run(&m, None).unwrap();
        run(&m, Some("json")).unwrap();
    }
}
