//! `coexist instructions` — how to silence version warnings.

use anyhow::Result;
use coexist_registry::{log_disable_version_warnings_instructions, BufferLogger};

pub fn run() -> Result<()> {
    let mut logger = BufferLogger::default();
    log_disable_version_warnings_instructions(&mut logger)?;
    print!("{logger}");
    Ok(())
}
