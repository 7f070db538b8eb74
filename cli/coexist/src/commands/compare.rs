//! `coexist compare` — rank two versions.

use anyhow::{Context, Result};
use coexist_core::{compare, VersionDescriptor};
use serde::Serialize;

use super::OutputFormat;

/// Which side of a comparison takes precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Newer {
    A,
    B,
    Equal,
}

/// Result of comparing two versions.
#[derive(Debug, Clone, Serialize)]
pub struct CompareReport {
    pub a: VersionDescriptor,
    pub b: VersionDescriptor,
    /// Signed comparison result (`a - b`).
    pub result: i64,
    pub newer: Newer,
}

/// Parse and compare two version strings.
pub fn compare_versions(
    a: &str,
    b: &str,
    build_time_a: Option<u64>,
    build_time_b: Option<u64>,
) -> Result<CompareReport> {
    let a = VersionDescriptor::parse(a, build_time_a)
        .with_context(|| format!("invalid version '{a}'"))?;
    let b = VersionDescriptor::parse(b, build_time_b)
        .with_context(|| format!("invalid version '{b}'"))?;
    let result = compare(&a, &b);
    let newer = match result {
        r if r > 0 => Newer::A,
        r if r < 0 => Newer::B,
        _ => Newer::Equal,
    };
    Ok(CompareReport { a, b, result, newer })
}

/// Render a report for humans.
pub fn render_human(report: &CompareReport) -> String {
    let verdict = match report.newer {
        Newer::A => format!("{} is newer than {}", report.a, report.b),
        Newer::B => format!("{} is newer than {}", report.b, report.a),
        Newer::Equal => format!("{} and {} have equal precedence", report.a, report.b),
    };
    format!("{verdict} (compare = {})\n", report.result)
}

pub fn run(
    a: &str,
    b: &str,
    build_time_a: Option<u64>,
    build_time_b: Option<u64>,
    format: Option<&str>,
) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let report = compare_versions(a, b, build_time_a, build_time_b)?;
    match format {
        OutputFormat::Human => print!("{}", render_human(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
