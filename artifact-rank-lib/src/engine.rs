use crate::config::EngineConfig;
use crate::error::{EngineError, NotFoundError};
use crate::facts::{ArtifactFacts, ArtifactId, Registry};
use crate::lineage::{CostEntry, LineageGraph, build_lineage, compute_cost};
use crate::metrics::{Cancelled, CancellationToken, Evaluator, RatingSubject, WorkerPool, default_metrics};
use crate::scoring::{RatingRecord, aggregate, net_score};
use crate::search::{BoundedRegex, SearchLimits};
use crate::versions::{VersionSpec, match_versions};
use futures_util::future::try_join_all;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

const LOG_TARGET: &str = "    engine";

/// The operations exposed over a read-only artifact registry.
///
/// An engine holds no per-request state: every call reads the registry afresh, and
/// concurrent calls share only the evaluator's worker pool.
#[derive(Debug)]
pub struct Engine<R> {
    registry: R,
    evaluator: Evaluator,
    search_limits: SearchLimits,
}

impl<R: Registry> Engine<R> {
    #[must_use]
    pub fn new(registry: R, config: &EngineConfig) -> Self {
        let evaluator = Evaluator::new(default_metrics(), WorkerPool::new(config.worker_pool_size), config.metric_timeout);
        Self::with_evaluator(registry, evaluator, config.search_limits())
    }

    #[must_use]
    pub const fn with_evaluator(registry: R, evaluator: Evaluator, search_limits: SearchLimits) -> Self {
        Self {
            registry,
            evaluator,
            search_limits,
        }
    }

    /// Rate one artifact.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if `id` is not in the registry.
    pub async fn rate(&self, id: &str) -> Result<RatingRecord, EngineError> {
        self.rate_with_cancellation(id, &CancellationToken::new()).await
    }

    /// Rate one artifact, giving up as soon as `cancellation` fires.
    ///
    /// Direct registry parents are scored first so the tree score can average their net scores.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if `id` is not in the registry, or
    /// [`EngineError::Cancelled`] if the rating was cancelled.
    pub async fn rate_with_cancellation(&self, id: &str, cancellation: &CancellationToken) -> Result<RatingRecord, EngineError> {
        let facts = self.lookup(id)?;
        log::info!(target: LOG_TARGET, "Rating '{}'", facts.id);

        let parent_scores = self.parent_scores(&facts, cancellation).await?;
        let subject = RatingSubject::new(facts, parent_scores);
        let evaluation = self.evaluator.evaluate_all(&subject, cancellation).await?;

        Ok(aggregate(evaluation))
    }

    async fn parent_scores(&self, facts: &ArtifactFacts, cancellation: &CancellationToken) -> Result<Vec<f64>, Cancelled> {
        let mut seen = HashSet::new();
        let parents: Vec<_> = facts
            .parent_ids()
            .filter(|id| **id != facts.id && seen.insert(*id))
            .filter_map(|id| self.registry.get(id))
            .collect();

        let evaluations = try_join_all(
            parents
                .into_iter()
                .map(|parent| async move { self.evaluator.evaluate_all(&RatingSubject::standalone(parent), cancellation).await }),
        )
        .await?;

        Ok(evaluations.iter().map(|e| net_score(&e.results)).collect())
    }

    /// Filter `candidates` down to the versions matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::VersionParse`] if `query` is not a valid version query.
    #[expect(clippy::unused_self, reason = "kept alongside the other engine operations")]
    pub fn match_versions<'a, I>(&self, query: &str, candidates: I) -> Result<Vec<String>, EngineError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Ok(match_versions(query, candidates)?)
    }

    /// Registry artifacts named `name` whose version matches `query`, in registry order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::VersionParse`] if `query` is not a valid version query.
    pub fn versions_of(&self, name: &str, query: &str) -> Result<Vec<Arc<ArtifactFacts>>, EngineError> {
        let spec = VersionSpec::parse(query)?;
        Ok(self
            .registry
            .list_all()
            .into_iter()
            .filter(|f| f.name == name && spec.matches(&f.version))
            .collect())
    }

    /// The lineage graph rooted at `id`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if `id` is not in the registry.
    pub fn lineage(&self, id: &str) -> Result<LineageGraph, EngineError> {
        let id = parse_id(id)?;
        Ok(build_lineage(&id, &self.registry)?)
    }

    /// Download cost of `id`, optionally with every artifact in its lineage.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if `id` is not in the registry.
    pub fn cost(&self, id: &str, include_dependencies: bool) -> Result<BTreeMap<ArtifactId, CostEntry>, EngineError> {
        let id = parse_id(id)?;
        Ok(compute_cost(&id, include_dependencies, &self.registry)?)
    }

    /// Artifacts whose name or README matches `pattern`, in registry order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Regex`] if the pattern is refused.
    pub async fn search(&self, pattern: &str) -> Result<Vec<Arc<ArtifactFacts>>, EngineError> {
        let regex = BoundedRegex::compile(pattern, &self.search_limits)?;
        Ok(regex.search(self.registry.list_all()).await)
    }

    /// Every artifact in the registry, in registry order.
    #[must_use]
    pub fn list(&self) -> Vec<Arc<ArtifactFacts>> {
        self.registry.list_all()
    }

    fn lookup(&self, id: &str) -> Result<Arc<ArtifactFacts>, NotFoundError> {
        let id = parse_id(id)?;
        self.registry.get(&id).ok_or_else(|| NotFoundError::from(&id))
    }
}

fn parse_id(id: &str) -> Result<ArtifactId, NotFoundError> {
    ArtifactId::parse(id).map_err(|_| NotFoundError::new(id))
}
