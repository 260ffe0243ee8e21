use crate::facts::ArtifactId;
use crate::metrics::Cancelled;
use crate::search::RegexError;
use crate::versions::VersionParseError;
use core::fmt::{self, Display};

/// An artifact id that is not present in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundError {
    pub id: String,
}

impl NotFoundError {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl From<&ArtifactId> for NotFoundError {
    fn from(id: &ArtifactId) -> Self {
        Self::new(id.as_str())
    }
}

impl Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "artifact '{}' not found", self.id)
    }
}

impl core::error::Error for NotFoundError {}

/// Errors returned by [`Engine`](crate::Engine) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    NotFound(NotFoundError),
    VersionParse(VersionParseError),
    Regex(RegexError),
    Cancelled,
}

impl Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(e) => e.fmt(f),
            Self::VersionParse(e) => e.fmt(f),
            Self::Regex(e) => e.fmt(f),
            Self::Cancelled => Cancelled.fmt(f),
        }
    }
}

impl core::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::NotFound(e) => Some(e),
            Self::VersionParse(e) => Some(e),
            Self::Regex(e) => Some(e),
            Self::Cancelled => None,
        }
    }
}

impl From<NotFoundError> for EngineError {
    fn from(e: NotFoundError) -> Self {
        Self::NotFound(e)
    }
}

impl From<VersionParseError> for EngineError {
    fn from(e: VersionParseError) -> Self {
        Self::VersionParse(e)
    }
}

impl From<RegexError> for EngineError {
    fn from(e: RegexError) -> Self {
        Self::Regex(e)
    }
}

impl From<Cancelled> for EngineError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}
