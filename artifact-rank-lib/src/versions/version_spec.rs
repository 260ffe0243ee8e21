use super::version_triple::{VersionTriple, strip_tag_prefix};
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use serde::Serialize;

/// A parsed version query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VersionSpec {
    /// `*`: every version.
    Any,

    /// `1.2.3`: the same text, after stripping a leading `v`.
    Exact { version: String },

    /// `A-B`: inclusive numeric range.
    Bounded { low: VersionTriple, high: VersionTriple },

    /// `~X.Y.Z`: same major and minor, patch at least `Z`.
    Tilde { base: VersionTriple },

    /// `^X.Y.Z`: same major, minor.patch at least `Y.Z`.
    Caret { base: VersionTriple },
}

/// A version query could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionParseError {
    pub spec: String,
    pub reason: String,
}

impl Display for VersionParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "invalid version query '{}': {}", self.spec, self.reason)
    }
}

impl core::error::Error for VersionParseError {}

impl VersionSpec {
    /// Parse a version query.
    ///
    /// # Errors
    ///
    /// Returns [`VersionParseError`] for empty queries, non-numeric components,
    /// empty range bounds, and ranges whose low end exceeds the high end.
    pub fn parse(spec: &str) -> Result<Self, VersionParseError> {
        let fail = |reason: String| VersionParseError {
            spec: spec.to_string(),
            reason,
        };

        let text = spec.trim();
        if text.is_empty() {
            return Err(fail("query is empty".to_string()));
        }

        if text == "*" {
            return Ok(Self::Any);
        }

        if let Some(rest) = text.strip_prefix('~') {
            return VersionTriple::parse(rest).map(|base| Self::Tilde { base }).map_err(fail);
        }

        if let Some(rest) = text.strip_prefix('^') {
            return VersionTriple::parse(rest).map(|base| Self::Caret { base }).map_err(fail);
        }

        if let Some((low, high)) = text.split_once('-') {
            if low.trim().is_empty() || high.trim().is_empty() {
                return Err(fail("range has an empty bound".to_string()));
            }

            let low = VersionTriple::parse(low).map_err(fail)?;
            let high = VersionTriple::parse(high).map_err(fail)?;
            if low > high {
                return Err(fail(format!("range is inverted ({low} > {high})")));
            }

            return Ok(Self::Bounded { low, high });
        }

        let _ = VersionTriple::parse(text).map_err(fail)?;
        Ok(Self::Exact {
            version: strip_tag_prefix(text).to_string(),
        })
    }

    /// Test a concrete version string against this query.
    ///
    /// Versions that are not dotted-numeric never satisfy a range query.
    #[must_use]
    pub fn matches(&self, version: &str) -> bool {
        let version = version.trim();
        match self {
            Self::Any => true,
            Self::Exact { version: wanted } => strip_tag_prefix(version) == wanted,
            Self::Bounded { low, high } => VersionTriple::parse(version).is_ok_and(|v| *low <= v && v <= *high),
            Self::Tilde { base } => {
                VersionTriple::parse(version).is_ok_and(|v| v.major == base.major && v.minor == base.minor && v.patch >= base.patch)
            }
            Self::Caret { base } => {
                VersionTriple::parse(version).is_ok_and(|v| v.major == base.major && (v.minor, v.patch) >= (base.minor, base.patch))
            }
        }
    }
}

impl FromStr for VersionSpec {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, VersionParseError> {
        Self::parse(s)
    }
}

impl Display for VersionSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Exact { version } => f.write_str(version),
            Self::Bounded { low, high } => write!(f, "{low}-{high}"),
            Self::Tilde { base } => write!(f, "~{base}"),
            Self::Caret { base } => write!(f, "^{base}"),
        }
    }
}

/// Filter candidate versions by a query, keeping their original order.
///
/// # Errors
///
/// Returns [`VersionParseError`] when the query itself is malformed.
pub fn match_versions<'a, I>(query: &str, candidates: I) -> Result<Vec<String>, VersionParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let spec = VersionSpec::parse(query)?;
    Ok(candidates.into_iter().filter(|c| spec.matches(c)).map(str::to_string).collect())
}
