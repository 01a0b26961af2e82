//! Named transforms applied to a version before it is put into a URL
//!
//! The placeholder of a verification URL selects one of these by name, e.g.
//! `https://example.com/pkg-{strip_v}.tar.gz`. The slice form `x[N:]` is
//! accepted as well and skips the first N characters.

use crate::error::ConfigError;

/// Closed set of version transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionTransform {
    /// Use the version unchanged
    #[default]
    Identity,
    /// Drop the first N characters
    SkipChars(usize),
    /// Drop a leading `v` or `V`
    StripV,
    /// Replace dots with underscores (`1.80.0` -> `1_80_0`)
    Underscores,
    /// Replace dots with dashes (`1.80.0` -> `1-80-0`)
    Dashes,
}

impl VersionTransform {
    /// Parse the text between the placeholder braces
    pub fn parse(expr: &str) -> Result<Self, ConfigError> {
        match expr.trim() {
            "" | "x" => Ok(VersionTransform::Identity),
            "strip_first" => Ok(VersionTransform::SkipChars(1)),
            "strip_v" => Ok(VersionTransform::StripV),
            "underscores" => Ok(VersionTransform::Underscores),
            "dashes" => Ok(VersionTransform::Dashes),
            other => Self::parse_slice(other).ok_or_else(|| ConfigError::UnknownTransform {
                name: other.to_string(),
            }),
        }
    }

    /// `x[N:]`
    fn parse_slice(expr: &str) -> Option<Self> {
        let count = expr.strip_prefix("x[")?.strip_suffix(":]")?;
        count.trim().parse().ok().map(VersionTransform::SkipChars)
    }

    /// Apply the transform
    pub fn apply(&self, version: &str) -> String {
        match self {
            VersionTransform::Identity => version.to_string(),
            VersionTransform::SkipChars(n) => version.chars().skip(*n).collect(),
            VersionTransform::StripV => version
                .strip_prefix(['v', 'V'])
                .unwrap_or(version)
                .to_string(),
            VersionTransform::Underscores => version.replace('.', "_"),
            VersionTransform::Dashes => version.replace('.', "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identity() {
        assert_eq!(VersionTransform::parse("").unwrap(), VersionTransform::Identity);
        assert_eq!(VersionTransform::parse("x").unwrap(), VersionTransform::Identity);
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(
            VersionTransform::parse("strip_first").unwrap(),
            VersionTransform::SkipChars(1)
        );
        assert_eq!(
            VersionTransform::parse(" strip_v ").unwrap(),
            VersionTransform::StripV
        );
        assert_eq!(
            VersionTransform::parse("underscores").unwrap(),
            VersionTransform::Underscores
        );
        assert_eq!(
            VersionTransform::parse("dashes").unwrap(),
            VersionTransform::Dashes
        );
    }

    #[test]
    fn test_parse_slice() {
        assert_eq!(
            VersionTransform::parse("x[1:]").unwrap(),
            VersionTransform::SkipChars(1)
        );
        assert_eq!(
            VersionTransform::parse("x[3:]").unwrap(),
            VersionTransform::SkipChars(3)
        );
    }

    #[test]
    fn test_parse_unknown() {
        for expr in ["x.upper()", "x[:-1]", "__import__('os')"] {
            assert!(matches!(
                VersionTransform::parse(expr),
                Err(ConfigError::UnknownTransform { .. })
            ));
        }
    }

    #[test]
    fn test_apply() {
        assert_eq!(VersionTransform::Identity.apply("v1.2.3"), "v1.2.3");
        assert_eq!(VersionTransform::SkipChars(1).apply("v1.2.3"), "1.2.3");
        assert_eq!(VersionTransform::SkipChars(10).apply("v1.2"), "");
        assert_eq!(VersionTransform::StripV.apply("V1.2.3"), "1.2.3");
        assert_eq!(VersionTransform::StripV.apply("1.2.3"), "1.2.3");
        assert_eq!(VersionTransform::Underscores.apply("1.80.0"), "1_80_0");
        assert_eq!(VersionTransform::Dashes.apply("1.80.0"), "1-80-0");
    }
}
