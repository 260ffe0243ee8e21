use super::{MetricName, MetricValue};
use crate::Result;
use crate::facts::ArtifactFacts;
use std::sync::Arc;

/// Everything a metric may look at when scoring an artifact.
///
/// Cloning is cheap; each concurrent metric task gets its own handle to the same snapshot.
#[derive(Debug, Clone)]
pub struct RatingSubject {
    pub facts: Arc<ArtifactFacts>,

    /// Net scores of the artifact's direct registry parents.
    pub parent_scores: Arc<[f64]>,
}

impl RatingSubject {
    #[must_use]
    pub fn new(facts: Arc<ArtifactFacts>, parent_scores: impl Into<Arc<[f64]>>) -> Self {
        Self {
            facts,
            parent_scores: parent_scores.into(),
        }
    }

    /// A subject with no known parents.
    #[must_use]
    pub fn standalone(facts: Arc<ArtifactFacts>) -> Self {
        Self::new(facts, Vec::new())
    }
}

/// A named scoring function.
///
/// Implementations must be pure: the same subject always yields the same value. A metric
/// that cannot judge an artifact returns [`MetricValue::not_computable`] rather than an error;
/// errors are reserved for genuine failures and are recorded against the metric by the evaluator.
pub trait Metric: Send + Sync + core::fmt::Debug {
    fn name(&self) -> MetricName;

    fn score(&self, subject: &RatingSubject) -> Result<MetricValue>;
}
