use super::metric_result::millis;
use super::{CancellationToken, Metric, MetricResult, RatingSubject, WorkerPool};
use crate::facts::ArtifactId;
use core::any::Any;
use core::fmt;
use core::time::Duration;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::{JoinError, JoinSet, spawn_blocking};

const LOG_TARGET: &str = "   metrics";

/// Returned when a rating is cancelled before every metric has reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the rating was cancelled")
    }
}

impl core::error::Error for Cancelled {}

/// Every metric's result for one artifact, in registration order.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub artifact_id: ArtifactId,
    pub results: Vec<MetricResult>,

    /// Wall-clock time of the whole fan-out.
    pub elapsed: Duration,
}

/// Runs a fixed set of metrics concurrently against one artifact at a time.
#[derive(Debug)]
pub struct Evaluator {
    metrics: Vec<Arc<dyn Metric>>,
    pool: Arc<WorkerPool>,
    metric_timeout: Duration,
}

impl Evaluator {
    #[must_use]
    pub fn new(metrics: Vec<Arc<dyn Metric>>, pool: Arc<WorkerPool>, metric_timeout: Duration) -> Self {
        Self {
            metrics,
            pool,
            metric_timeout,
        }
    }

    /// Score `subject` with every registered metric.
    ///
    /// Each metric runs on a blocking thread once a pool slot is free, bounded by the
    /// per-metric timeout. A metric that panics, fails, or times out is reported as not
    /// computable with an error message; it never fails the evaluation as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if `cancellation` fires before all metrics have reported.
    /// Outstanding tasks are aborted; a metric already running on a blocking thread runs
    /// to completion in the background and its result is discarded.
    pub async fn evaluate_all(&self, subject: &RatingSubject, cancellation: &CancellationToken) -> Result<Evaluation, Cancelled> {
        if cancellation.is_cancelled() {
            return Err(Cancelled);
        }

        let artifact_id = subject.facts.id.clone();
        log::debug!(target: LOG_TARGET, "Evaluating {} metrics for '{artifact_id}'", self.metrics.len());

        let start = Instant::now();
        let mut tasks = JoinSet::new();
        for (index, metric) in self.metrics.iter().enumerate() {
            let metric = Arc::clone(metric);
            let subject = subject.clone();
            let pool = Arc::clone(&self.pool);
            let timeout = self.metric_timeout;
            let _ = tasks.spawn(async move { (index, run_metric(metric, subject, &pool, timeout).await) });
        }

        let mut slots: Vec<Option<MetricResult>> = vec![None; self.metrics.len()];
        loop {
            tokio::select! {
                biased;

                () = cancellation.cancelled() => {
                    log::debug!(target: LOG_TARGET, "Evaluation of '{artifact_id}' cancelled");
                    tasks.abort_all();
                    return Err(Cancelled);
                }

                next = tasks.join_next() => match next {
                    None => break,
                    Some(Ok((index, result))) => slots[index] = Some(result),
                    Some(Err(e)) => log::warn!(target: LOG_TARGET, "Metric task for '{artifact_id}' did not complete: {e}"),
                },
            }
        }

        let results = self
            .metrics
            .iter()
            .zip(slots)
            .map(|(metric, slot)| slot.unwrap_or_else(|| MetricResult::failed(metric.name(), Duration::ZERO, "metric task did not complete")))
            .collect();

        let elapsed = start.elapsed();
        log::debug!(target: LOG_TARGET, "Evaluated '{artifact_id}' in {}ms", millis(elapsed));

        Ok(Evaluation {
            artifact_id,
            results,
            elapsed,
        })
    }
}

async fn run_metric(metric: Arc<dyn Metric>, subject: RatingSubject, pool: &WorkerPool, timeout: Duration) -> MetricResult {
    let name = metric.name();
    let permit = pool.acquire().await;

    // The slot stays taken until the blocking work ends, even after a timeout or abort.
    let start = Instant::now();
    let outcome = tokio::time::timeout(
        timeout,
        spawn_blocking(move || {
            let _permit = permit;
            metric.score(&subject)
        }),
    )
    .await;
    let latency = start.elapsed();

    match outcome {
        Ok(Ok(Ok(value))) => MetricResult::new(name, value.sanitized(), latency),
        Ok(Ok(Err(e))) => {
            log::warn!(target: LOG_TARGET, "Metric '{name}' failed: {e:#}");
            MetricResult::failed(name, latency, format!("{e:#}"))
        }
        Ok(Err(e)) => {
            let message = join_error_message(e);
            log::warn!(target: LOG_TARGET, "Metric '{name}' panicked: {message}");
            MetricResult::failed(name, latency, format!("metric panicked: {message}"))
        }
        Err(_) => {
            log::warn!(target: LOG_TARGET, "Metric '{name}' timed out after {}ms", millis(timeout));
            MetricResult::failed(name, latency, format!("metric timed out after {}ms", millis(timeout)))
        }
    }
}

fn join_error_message(error: JoinError) -> String {
    match error.try_into_panic() {
        Ok(payload) => panic_message(payload.as_ref()),
        Err(e) => e.to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
