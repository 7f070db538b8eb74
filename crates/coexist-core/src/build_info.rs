//! Build-embedded version metadata.
//!
//! Each instance carries its version as text captured at compile time. The
//! text is only turned into a [`VersionDescriptor`] at registration, so a
//! malformed build surfaces as an error there rather than at load time.

use crate::descriptor::VersionDescriptor;
use crate::error::{CoreError, Result};

/// Textual build metadata, one token per descriptor field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: String,
    pub major: String,
    pub minor: String,
    pub patch: String,
    pub suffix: String,
    /// Truthy/falsy token: `true`/`false`, `1`/`0`, `yes`/`no`, or empty.
    pub is_next: String,
    pub build_time: String,
}

/// Capture the calling crate's build metadata.
///
/// Version fields come from Cargo's `CARGO_PKG_VERSION*` variables. The
/// next-build marker and build time are read from `COEXIST_IS_NEXT` and
/// `COEXIST_BUILD_TIME` at compile time, defaulting to a stable build at
/// time zero.
#[macro_export]
macro_rules! build_info {
    () => {
        $crate::BuildInfo {
            version: env!("CARGO_PKG_VERSION").to_string(),
            major: env!("CARGO_PKG_VERSION_MAJOR").to_string(),
            minor: env!("CARGO_PKG_VERSION_MINOR").to_string(),
            patch: env!("CARGO_PKG_VERSION_PATCH").to_string(),
            suffix: env!("CARGO_PKG_VERSION_PRE").to_string(),
            is_next: option_env!("COEXIST_IS_NEXT").unwrap_or("false").to_string(),
            build_time: option_env!("COEXIST_BUILD_TIME").unwrap_or("0").to_string(),
        }
    };
}

impl BuildInfo {
    /// Parse the tokens into a descriptor.
    ///
    /// Numeric fields must be non-negative integers; `suffix` and `version`
    /// pass through unchanged. Any token still of the form `__NAME__` is
    /// rejected.
    pub fn descriptor(&self) -> Result<VersionDescriptor> {
        Ok(VersionDescriptor {
            version: substituted("version", &self.version)?.to_string(),
            major: parse_number("major", &self.major)?,
            minor: parse_number("minor", &self.minor)?,
            patch: parse_number("patch", &self.patch)?,
            suffix: substituted("suffix", &self.suffix)?.to_string(),
            is_next: parse_flag("is_next", &self.is_next)?,
            build_time: parse_number("build_time", &self.build_time)?,
        })
    }
}

impl From<&VersionDescriptor> for BuildInfo {
    fn from(d: &VersionDescriptor) -> Self {
        BuildInfo {
            version: d.version.clone(),
            major: d.major.to_string(),
            minor: d.minor.to_string(),
            patch: d.patch.to_string(),
            suffix: d.suffix.clone(),
            is_next: d.is_next.to_string(),
            build_time: d.build_time.to_string(),
        }
    }
}

fn is_placeholder(token: &str) -> bool {
    token.len() > 4
        && token.starts_with("__")
        && token.ends_with("__")
        && token[2..token.len() - 2]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c == '_')
}

fn substituted<'a>(field: &'static str, token: &'a str) -> Result<&'a str> {
    if is_placeholder(token.trim()) {
        return Err(CoreError::UnsubstitutedPlaceholder { field });
    }
    Ok(token)
}

fn parse_number(field: &'static str, token: &str) -> Result<u64> {
    let token = substituted(field, token)?.trim();
    token.parse::<u64>().map_err(|_| CoreError::InvalidNumber {
        field,
        value: token.to_string(),
    })
}

fn parse_flag(field: &'static str, token: &str) -> Result<bool> {
    let token = substituted(field, token)?.trim();
    match token.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(CoreError::InvalidFlag {
            field,
            value: token.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> BuildInfo {
        BuildInfo {
            version: "2.1.0-rc10".into(),
            major: "2".into(),
            minor: "1".into(),
            patch: "0".into(),
            suffix: "rc10".into(),
            is_next: "false".into(),
            build_time: "1700000000".into(),
        }
    }

    #[test]
    fn parses_all_fields() {
        let d = info().descriptor().unwrap();
        assert_eq!(d.version, "2.1.0-rc10");
        assert_eq!((d.major, d.minor, d.patch), (2, 1, 0));
        assert_eq!(d.suffix, "rc10");
        assert!(!d.is_next);
        assert_eq!(d.build_time, 1_700_000_000);
    }

    #[test]
    fn flag_tokens() {
        for (token, expected) in [("true", true), ("1", true), ("YES", true), ("", false), ("0", false)] {
            let mut b = info();
            b.is_next = token.into();
            assert_eq!(b.descriptor().unwrap().is_next, expected, "token {token:?}");
        }
    }

    #[test]
    fn rejects_bad_number() {
        let mut b = info();
        b.minor = "x1".into();
        match b.descriptor() {
            Err(CoreError::InvalidNumber { field, value }) => {
                assert_eq!(field, "minor");
                assert_eq!(value, "x1");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_number() {
        let mut b = info();
        b.patch = "-1".into();
        assert!(matches!(b.descriptor(), Err(CoreError::InvalidNumber { field: "patch", .. })));
    }

    #[test]
    fn rejects_bad_flag() {
        let mut b = info();
        b.is_next = "maybe".into();
        assert!(matches!(b.descriptor(), Err(CoreError::InvalidFlag { .. })));
    }

    #[test]
    fn rejects_placeholders() {
        let mut b = info();
        b.build_time = "__BUILD_TIME__".into();
        assert!(matches!(
            b.descriptor(),
            Err(CoreError::UnsubstitutedPlaceholder { field: "build_time" })
        ));

        let mut b = info();
        b.suffix = "__SUFFIX__".into();
        assert!(matches!(
            b.descriptor(),
            Err(CoreError::UnsubstitutedPlaceholder { field: "suffix" })
        ));
    }

    #[test]
    fn descriptor_round_trips_through_build_info() {
        let d = VersionDescriptor::parse("4.0.0-next+99", None).unwrap();
        assert_eq!(BuildInfo::from(&d).descriptor().unwrap(), d);
    }

    #[test]
    fn macro_captures_this_crate() {
        let b = crate::build_info!();
        let d = b.descriptor().unwrap();
        assert_eq!(d.version, env!("CARGO_PKG_VERSION"));
    }
}
