//! Instructions for silencing version-conflict warnings.
//!
//! The instructions are written through an [`InstructionLogger`], which
//! must be able to emit both paragraphs and single lines. Loggers that
//! cannot do both are rejected up front instead of producing garbled
//! output.

use std::fmt;

use tracing::info;

use crate::error::{RegistryError, Result};

/// What an [`InstructionLogger`] can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerCapabilities {
    pub paragraph: bool,
    pub line: bool,
}

impl LoggerCapabilities {
    /// Paragraphs and lines.
    pub const FULL: LoggerCapabilities = LoggerCapabilities {
        paragraph: true,
        line: true,
    };

    /// Names of the capabilities this set lacks.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.paragraph {
            missing.push("paragraphs");
        }
        if !self.line {
            missing.push("lines");
        }
        missing
    }
}

/// A sink for structured, human-readable text.
pub trait InstructionLogger {
    /// The capabilities this logger supports.
    fn capabilities(&self) -> LoggerCapabilities {
        LoggerCapabilities::FULL
    }

    /// Emit a block of prose.
    fn paragraph(&mut self, text: &str);

    /// Emit a single line, verbatim.
    fn line(&mut self, text: &str);
}

/// Write instructions for disabling version warnings to `logger`.
pub fn log_disable_version_warnings_instructions(logger: &mut dyn InstructionLogger) -> Result<()> {
    let missing = logger.capabilities().missing();
    if !missing.is_empty() {
        return Err(RegistryError::InvalidLogger {
            missing: missing.join(" or "),
        });
    }

    logger.paragraph(
        "More than one copy of this library is loaded in the same process. \
         The newest copy takes precedence, and each conflict is reported as a warning.",
    );
    logger.paragraph("To silence these warnings, disable them once during startup:");
    logger.line("    let store = coexist_registry::SharedStore::global();");
    logger.line("    store.warnings()?.disable();");
    logger.paragraph(
        "If the host injects its own store, disable warnings on that store instead, \
         or call `VersionRegistrar::disable_version_warnings` on any registered instance.",
    );
    Ok(())
}

/// Emits instructions as `info` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl InstructionLogger for TracingLogger {
    fn paragraph(&mut self, text: &str) {
        info!(target: "coexist", "{text}");
    }

    fn line(&mut self, text: &str) {
        info!(target: "coexist", "{text}");
    }
}

/// One emitted piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Paragraph(String),
    Line(String),
}

/// Collects emitted text in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferLogger {
    pub entries: Vec<LogEntry>,
}

impl InstructionLogger for BufferLogger {
    fn paragraph(&mut self, text: &str) {
        self.entries.push(LogEntry::Paragraph(text.to_string()));
    }

    fn line(&mut self, text: &str) {
        self.entries.push(LogEntry::Line(text.to_string()));
    }
}

impl fmt::Display for BufferLogger {
    /// Paragraphs are separated by blank lines; consecutive lines are not.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous: Option<&LogEntry> = None;
        for entry in &self.entries {
            let separate = matches!(
                (previous, entry),
                (Some(_), LogEntry::Paragraph(_)) | (Some(LogEntry::Paragraph(_)), LogEntry::Line(_))
            );
            if separate {
                writeln!(f)?;
            }
            match entry {
                LogEntry::Paragraph(text) | LogEntry::Line(text) => writeln!(f, "{text}")?,
            }
            previous = Some(entry);
        }
        Ok(())
    }
}
