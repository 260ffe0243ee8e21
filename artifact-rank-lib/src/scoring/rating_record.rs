use crate::facts::ArtifactId;
use crate::metrics::{MetricName, MetricResult};
use serde::Serialize;

/// The full rating of one artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingRecord {
    pub artifact_id: ArtifactId,

    /// Weighted average of the computable metrics, in `[0, 1]`.
    pub net_score: f64,

    /// Wall-clock time spent evaluating all metrics.
    pub net_score_latency_ms: u64,

    /// One result per metric, in registration order.
    pub metrics: Vec<MetricResult>,
}

impl RatingRecord {
    #[must_use]
    pub fn metric(&self, name: MetricName) -> Option<&MetricResult> {
        self.metrics.iter().find(|m| m.name == name)
    }
}
