use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Longest identifier accepted by [`ArtifactId::parse`].
pub const MAX_ID_LEN: usize = 128;

/// Opaque, validated identifier of a registry artifact.
///
/// Identifiers are 1 to [`MAX_ID_LEN`] characters drawn from `[A-Za-z0-9._-]`
/// and must start with an ASCII alphanumeric character. Surrounding whitespace
/// is trimmed before validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactId(Arc<str>);

impl ArtifactId {
    /// Validate and wrap an identifier.
    ///
    /// Returns the reason for rejection when the text is not a valid identifier.
    pub fn parse(text: &str) -> Result<Self, String> {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Err("identifier is empty".to_string());
        }

        if trimmed.len() > MAX_ID_LEN {
            return Err(format!("identifier is longer than {MAX_ID_LEN} characters"));
        }

        if !trimmed.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            return Err(format!("identifier '{trimmed}' must start with a letter or digit"));
        }

        if let Some(bad) = trimmed.chars().find(|c| !is_id_char(*c)) {
            return Err(format!("identifier '{trimmed}' contains invalid character '{bad}'"));
        }

        Ok(Self(Arc::from(trimmed)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

impl Display for ArtifactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl FromStr for ArtifactId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ArtifactId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        Self::parse(&value)
    }
}

impl From<ArtifactId> for String {
    fn from(id: ArtifactId) -> Self {
        id.0.to_string()
    }
}

impl AsRef<str> for ArtifactId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
