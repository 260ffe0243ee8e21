use super::{ArtifactFacts, ArtifactId, RawMetadata, normalize};
use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

const LOG_TARGET: &str = "  registry";

/// Read-only view of the artifacts known to the surrounding system.
///
/// The engine never writes through this trait; ingestion and persistence live elsewhere.
pub trait Registry: Send + Sync {
    /// Look up one artifact by id.
    fn get(&self, id: &ArtifactId) -> Option<Arc<ArtifactFacts>>;

    /// Every known artifact, in a stable order.
    fn list_all(&self) -> Vec<Arc<ArtifactFacts>>;
}

impl<R: Registry + ?Sized> Registry for Arc<R> {
    fn get(&self, id: &ArtifactId) -> Option<Arc<ArtifactFacts>> {
        (**self).get(id)
    }

    fn list_all(&self) -> Vec<Arc<ArtifactFacts>> {
        (**self).list_all()
    }
}

/// An in-memory [`Registry`] that preserves insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    order: Vec<Arc<ArtifactFacts>>,
    by_id: HashMap<ArtifactId, Arc<ArtifactFacts>>,
}

impl MemoryRegistry {
    /// Build a registry from facts. When two records share an id, the later one wins
    /// but keeps the position of the first.
    #[must_use]
    pub fn new(facts: impl IntoIterator<Item = ArtifactFacts>) -> Self {
        let mut registry = Self::default();
        for item in facts {
            let item = Arc::new(item);
            if let Some(previous) = registry.by_id.insert(item.id.clone(), Arc::clone(&item)) {
                log::warn!(target: LOG_TARGET, "Artifact '{}' appears more than once, keeping the last record", previous.id);
                if let Some(slot) = registry.order.iter_mut().find(|f| f.id == item.id) {
                    *slot = item;
                }
            } else {
                registry.order.push(item);
            }
        }

        registry
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Registry for MemoryRegistry {
    fn get(&self, id: &ArtifactId) -> Option<Arc<ArtifactFacts>> {
        self.by_id.get(id).map(Arc::clone)
    }

    fn list_all(&self) -> Vec<Arc<ArtifactFacts>> {
        self.order.clone()
    }
}

/// Outcome of loading a registry snapshot from disk.
#[derive(Debug)]
pub struct LoadedRegistry {
    pub registry: MemoryRegistry,

    /// Human-readable reasons for each record that failed normalization.
    pub rejected: Vec<String>,
}

/// Load a registry snapshot: a JSON array of raw metadata records.
///
/// Records that fail normalization are skipped and reported in [`LoadedRegistry::rejected`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of records.
pub fn load_registry(path: &Utf8Path) -> Result<LoadedRegistry> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading registry snapshot '{path}'"))?;
    let records: Vec<RawMetadata> = serde_json::from_str(&text).into_app_err_with(|| format!("parsing registry snapshot '{path}'"))?;

    let mut rejected = Vec::new();
    let facts: Vec<_> = records
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match normalize(raw) {
            Ok(facts) => Some(facts),
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Skipping record #{index} in '{path}': {e}");
                rejected.push(format!("record #{index}: {e}"));
                None
            }
        })
        .collect();

    log::info!(target: LOG_TARGET, "Loaded {} artifact(s) from '{path}'", facts.len());

    Ok(LoadedRegistry {
        registry: MemoryRegistry::new(facts),
        rejected,
    })
}
