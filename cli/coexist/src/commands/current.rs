//! `coexist current` — the version this binary registers.

use anyhow::Result;
use coexist_registry::{SharedStore, VersionRegistrar};

/// Register this binary in the global store and print its descriptor.
pub fn run() -> Result<()> {
    let mut registrar = VersionRegistrar::new(SharedStore::global(), coexist_core::build_info!())?;
    let handle = registrar.register_current_version()?;
    let descriptor = registrar.version_info(None)?;

    println!("=== Coexist ===");
    println!("  Version:    {}", descriptor.version);
    println!(
        "  Numbers:    {}.{}.{}",
        descriptor.major, descriptor.minor, descriptor.patch
    );
    if !descriptor.suffix.is_empty() {
        println!("  Suffix:     {}", descriptor.suffix);
    }
    println!("  Next build: {}", if descriptor.is_next { "yes" } else { "no" });
    if descriptor.is_next {
        println!("  Built:      {}", descriptor.build_time);
    }
    println!("  Handle:     {handle}");
    println!("  Registry:   {}", registrar.all_versions().join(", "));
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn current_runs_without_error() {
        super::run().unwrap();
    }
}
