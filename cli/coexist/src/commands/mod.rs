//! CLI command implementations.

pub mod compare;
pub mod current;
pub mod instructions;
pub mod simulate;

/// Report format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    /// Parse a `--format` value; `None` means human-readable.
    pub fn parse(value: Option<&str>) -> anyhow::Result<Self> {
        match value {
            None | Some("human") => Ok(OutputFormat::Human),
            Some("json") => Ok(OutputFormat::Json),
            Some(other) => anyhow::bail!("unknown format '{other}' (expected human or json)"),
        }
    }
}
