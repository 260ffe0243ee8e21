use core::fmt::{Display, Formatter, Result as FmtResult};
use serde::Serialize;

/// A dotted-numeric `major.minor.patch` version. Missing trailing components are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VersionTriple {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionTriple {
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }

    /// Parse one to three dot-separated numeric components, after stripping an optional
    /// leading `v`. Returns a description of the problem on failure.
    pub fn parse(text: &str) -> Result<Self, String> {
        let text = strip_tag_prefix(text.trim());
        if text.is_empty() {
            return Err("version is empty".to_string());
        }

        let mut components = [0_u64; 3];
        let mut count = 0;
        for part in text.split('.') {
            if count == components.len() {
                return Err(format!("'{text}' has more than three components"));
            }

            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("'{part}' in '{text}' is not a number"));
            }

            components[count] = part.parse().map_err(|_| format!("'{part}' in '{text}' is too large"))?;
            count += 1;
        }

        let [major, minor, patch] = components;
        Ok(Self { major, minor, patch })
    }
}

impl Display for VersionTriple {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Strip a git-tag style leading `v` (e.g. `v1.2.3`).
#[must_use]
pub fn strip_tag_prefix(text: &str) -> &str {
    text.strip_prefix('v').unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_triple() {
        assert_eq!(VersionTriple::parse("1.2.3").unwrap(), VersionTriple::new(1, 2, 3));
    }

    #[test]
    fn test_parse_defaults_missing_components() {
        assert_eq!(VersionTriple::parse("2").unwrap(), VersionTriple::new(2, 0, 0));
        assert_eq!(VersionTriple::parse("2.5").unwrap(), VersionTriple::new(2, 5, 0));
    }

    #[test]
    fn test_parse_strips_tag_prefix() {
        assert_eq!(VersionTriple::parse("v0.9.1").unwrap(), VersionTriple::new(0, 9, 1));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(VersionTriple::parse("1.2.x").is_err());
        assert!(VersionTriple::parse("1..2").is_err());
        assert!(VersionTriple::parse("1.2.3-beta").is_err());
        assert!(VersionTriple::parse("").is_err());
        assert!(VersionTriple::parse("+1").is_err());
    }

    #[test]
    fn test_parse_rejects_too_many_components() {
        assert!(VersionTriple::parse("1.2.3.4").is_err());
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(VersionTriple::parse("1.10.0").unwrap() > VersionTriple::parse("1.9.9").unwrap());
        assert!(VersionTriple::parse("2").unwrap() > VersionTriple::parse("1.99.99").unwrap());
    }
}
