use super::{MetricName, MetricValue};
use core::time::Duration;
use serde::Serialize;

/// The outcome of running one metric against one artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    pub name: MetricName,
    pub value: MetricValue,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MetricResult {
    #[must_use]
    pub fn new(name: MetricName, value: MetricValue, latency: Duration) -> Self {
        Self {
            name,
            value,
            latency_ms: millis(latency),
            error: None,
        }
    }

    /// A metric that could not run to completion; recorded as not computable.
    #[must_use]
    pub fn failed(name: MetricName, latency: Duration, error: impl Into<String>) -> Self {
        Self {
            name,
            value: MetricValue::not_computable(),
            latency_ms: millis(latency),
            error: Some(error.into()),
        }
    }

    /// The scalar that feeds the net score, or `None` when this result must be left out.
    #[must_use]
    pub fn contribution(&self) -> Option<f64> {
        if self.error.is_some() || self.value.is_not_computable() {
            None
        } else {
            Some(self.value.to_scalar())
        }
    }
}

pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
