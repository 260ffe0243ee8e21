//! Conversion of heterogeneous source metadata into canonical [`ArtifactFacts`].

use super::{Activity, ArtifactFacts, ArtifactId, ArtifactKind, DemoOutcome, ParentRef, ParentTarget, Relationship, SourceTag};
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use url::Url;

const LOG_TARGET: &str = "normalizer";

/// Version assigned to artifacts whose source metadata does not declare one.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Metadata for one artifact as delivered by an ingestion source.
///
/// Every field is optional at this level; [`normalize`] decides which ones are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMetadata {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type", alias = "kind")]
    pub kind: Option<String>,
    pub version: Option<String>,
    pub url: Option<String>,
    pub readme: Option<String>,
    pub base_model: Option<String>,
    pub datasets: Vec<String>,
    pub code_repository: Option<String>,
    pub config: Option<Map<String, Value>>,
    pub card_data: Option<Map<String, Value>>,
    pub size_bytes: Option<u64>,
    pub license: Option<String>,
    pub activity: Option<Activity>,
    pub demo_outcome: Option<String>,
}

/// A required metadata field was missing or invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedMetadataError {
    pub field: &'static str,
    pub reason: String,
}

impl MalformedMetadataError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl Display for MalformedMetadataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "malformed metadata: field '{}': {}", self.field, self.reason)
    }
}

impl core::error::Error for MalformedMetadataError {}

/// Normalize raw source metadata into an [`ArtifactFacts`] record.
///
/// Pure and deterministic. Absent optional fields are defaulted; only `id`, `name`,
/// `type`, and a present-but-unparseable `url` cause a failure.
pub fn normalize(raw: &RawMetadata) -> Result<ArtifactFacts, MalformedMetadataError> {
    let id = raw
        .id
        .as_deref()
        .ok_or_else(|| MalformedMetadataError::new("id", "missing"))
        .and_then(|text| ArtifactId::parse(text).map_err(|reason| MalformedMetadataError::new("id", reason)))?;

    let name = required_text(raw.name.as_deref(), "name")?;

    let kind_text = required_text(raw.kind.as_deref(), "type")?;
    let kind = ArtifactKind::from_str(&kind_text)
        .map_err(|_| MalformedMetadataError::new("type", format!("unknown artifact type '{kind_text}'")))?;

    let version = optional_text(raw.version.as_deref()).unwrap_or_else(|| DEFAULT_VERSION.to_string());

    let source_url = optional_text(raw.url.as_deref())
        .map(|text| Url::parse(&text).map_err(|e| MalformedMetadataError::new("url", format!("'{text}' is not a valid URL: {e}"))))
        .transpose()?;

    let demo_outcome = optional_text(raw.demo_outcome.as_deref()).and_then(|text| {
        DemoOutcome::from_str(&text)
            .inspect_err(|_| log::debug!(target: LOG_TARGET, "Ignoring unknown demo outcome '{text}' for '{id}'"))
            .ok()
    });

    let parent_refs = collect_parent_refs(raw, &id);

    Ok(ArtifactFacts {
        id,
        name,
        kind,
        version,
        source_url,
        readme_text: raw.readme.clone().unwrap_or_default(),
        parent_refs,
        size_bytes: raw.size_bytes,
        license_id: optional_text(raw.license.as_deref()),
        activity: raw.activity.clone(),
        demo_outcome,
    })
}

fn required_text(value: Option<&str>, field: &'static str) -> Result<String, MalformedMetadataError> {
    match value.map(str::trim) {
        None => Err(MalformedMetadataError::new(field, "missing")),
        Some("") => Err(MalformedMetadataError::new(field, "empty")),
        Some(text) => Ok(text.to_string()),
    }
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|text| !text.is_empty()).map(str::to_string)
}

/// Gather lineage references from every structured source, in priority order.
fn collect_parent_refs(raw: &RawMetadata, own_id: &ArtifactId) -> Vec<ParentRef> {
    let mut candidates: Vec<(&str, Relationship, SourceTag)> = Vec::new();

    if let Some(base) = raw.base_model.as_deref() {
        candidates.push((base, Relationship::BaseModel, SourceTag::BaseModel));
    }

    if let Some(config) = &raw.config {
        for key in ["_name_or_path", "base_model_name_or_path"] {
            candidates.extend(
                config
                    .get(key)
                    .into_iter()
                    .flat_map(string_values)
                    .map(|s| (s, Relationship::BaseModel, SourceTag::ConfigJson)),
            );
        }
    }

    if let Some(card) = &raw.card_data {
        candidates.extend(
            card.get("base_model")
                .into_iter()
                .flat_map(string_values)
                .map(|s| (s, Relationship::BaseModel, SourceTag::ModelCard)),
        );
    }

    candidates.extend(
        raw.datasets
            .iter()
            .map(|s| (s.as_str(), Relationship::FineTuningDataset, SourceTag::ModelCard)),
    );

    if let Some(card) = &raw.card_data {
        candidates.extend(
            card.get("datasets")
                .into_iter()
                .flat_map(string_values)
                .map(|s| (s, Relationship::FineTuningDataset, SourceTag::ModelCard)),
        );
    }

    if let Some(code) = raw.code_repository.as_deref() {
        candidates.push((code, Relationship::CodeDependency, SourceTag::Metadata));
    }

    let mut seen = HashSet::new();
    let mut refs = Vec::new();
    for (text, relationship, source_tag) in candidates {
        let Some(target) = resolve_target(text) else {
            log::debug!(target: LOG_TARGET, "Dropping unusable lineage reference '{text}' of '{own_id}'");
            continue;
        };

        if matches!(&target, ParentTarget::Artifact(id) if id == own_id) {
            continue;
        }

        if seen.insert(target.clone()) {
            refs.push(ParentRef {
                target,
                relationship,
                source_tag,
            });
        }
    }

    refs
}

/// A JSON value that may hold either a single string or a list of strings.
fn string_values(value: &Value) -> Vec<&str> {
    match value {
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn resolve_target(text: &str) -> Option<ParentTarget> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.starts_with("http://") || text.starts_with("https://") {
        return Url::parse(text).ok().map(ParentTarget::External);
    }

    // Hub-style `owner/name` references keep only the name.
    let last = text.trim_end_matches('/').rsplit('/').next().unwrap_or(text);
    ArtifactId::parse(last).ok().map(ParentTarget::Artifact)
}
