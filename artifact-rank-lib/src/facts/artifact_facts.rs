use super::{Activity, ArtifactId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

/// What sort of thing an artifact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Model,
    Dataset,
    Code,
}

/// How a parent relates to the artifact that references it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    BaseModel,
    FineTuningDataset,
    CodeDependency,
}

/// Where in the source metadata a lineage reference was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    /// The artifact a lineage query started from.
    Root,
    BaseModel,
    ConfigJson,
    ModelCard,
    Metadata,
}

/// The thing a parent reference points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentTarget {
    Artifact(ArtifactId),
    External(Url),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentRef {
    pub target: ParentTarget,
    pub relationship: Relationship,
    pub source_tag: SourceTag,
}

impl ParentRef {
    /// The referenced artifact id, if this reference points inside the registry.
    #[must_use]
    pub const fn artifact_id(&self) -> Option<&ArtifactId> {
        match &self.target {
            ParentTarget::Artifact(id) => Some(id),
            ParentTarget::External(_) => None,
        }
    }
}

/// Result of running an artifact's usage instructions at ingest time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum DemoOutcome {
    RunsUnmodified,
    RunsWithChanges,
    Fails,
}

/// Canonical, immutable description of one artifact version.
///
/// Facts are produced by [`normalize`](super::normalize) and shared behind an `Arc`.
/// A new version of an artifact is a new `ArtifactFacts`, never a mutation of an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactFacts {
    pub id: ArtifactId,
    pub name: String,
    pub kind: ArtifactKind,
    pub version: String,
    pub source_url: Option<Url>,
    pub readme_text: String,
    pub parent_refs: Vec<ParentRef>,
    pub size_bytes: Option<u64>,
    pub license_id: Option<String>,
    pub activity: Option<Activity>,
    pub demo_outcome: Option<DemoOutcome>,
}

impl ArtifactFacts {
    /// Parent references that point at other registry artifacts, in declaration order.
    pub fn parent_ids(&self) -> impl Iterator<Item = &ArtifactId> {
        self.parent_refs.iter().filter_map(ParentRef::artifact_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn test_kind_parses_case_insensitively() {
        assert_eq!(ArtifactKind::from_str("MODEL").unwrap(), ArtifactKind::Model);
        assert_eq!(ArtifactKind::from_str("dataset").unwrap(), ArtifactKind::Dataset);
        assert!(ArtifactKind::from_str("notebook").is_err());
    }

    #[test]
    fn test_tags_display_as_snake_case() {
        assert_eq!(SourceTag::ConfigJson.to_string(), "config_json");
        assert_eq!(Relationship::FineTuningDataset.to_string(), "fine_tuning_dataset");
    }

    #[test]
    fn test_parent_ids_skips_external_refs() {
        let facts = ArtifactFacts {
            id: ArtifactId::parse("child").unwrap(),
            name: "child".into(),
            kind: ArtifactKind::Model,
            version: "1.0.0".into(),
            source_url: None,
            readme_text: String::new(),
            parent_refs: vec![
                ParentRef {
                    target: ParentTarget::External(Url::parse("https://example.com/weights").unwrap()),
                    relationship: Relationship::BaseModel,
                    source_tag: SourceTag::ModelCard,
                },
                ParentRef {
                    target: ParentTarget::Artifact(ArtifactId::parse("parent").unwrap()),
                    relationship: Relationship::BaseModel,
                    source_tag: SourceTag::ConfigJson,
                },
            ],
            size_bytes: None,
            license_id: None,
            activity: None,
            demo_outcome: None,
        };

        let ids: Vec<_> = facts.parent_ids().map(ArtifactId::as_str).collect();
        assert_eq!(ids, vec!["parent"]);
    }
}
