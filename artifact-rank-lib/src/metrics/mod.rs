//! Metric definitions and concurrent evaluation
//!
//! This module scores a single artifact along a fixed set of quality dimensions. Each
//! dimension is a [`Metric`] that reads an immutable [`RatingSubject`] and returns a
//! [`MetricValue`]; the [`Evaluator`] runs them all concurrently and collects one
//! [`MetricResult`] per metric.
//!
//! # Implementation Model
//!
//! - **Metric set**: [`default_metrics`] returns the explicit, statically constructed list
//!   of metrics in reporting order. There is no global registry; each evaluator owns its list.
//! - **Values**: scalars lie in `[0, 1]`. A metric that has nothing to judge reports the
//!   [`NOT_COMPUTABLE`] sentinel (`-1`), which downstream aggregation leaves out. The size
//!   metric reports one value per [`Platform`].
//! - **Isolation**: the evaluator runs every metric on a blocking thread, bounded by a shared
//!   [`WorkerPool`] and a per-metric timeout. Panics, errors, and timeouts are recorded on
//!   the metric's result instead of failing the rating.
//! - **Ordering**: results are reported in registration order, whatever order the metrics
//!   finished in.
//! - **Cancellation**: a [`CancellationToken`] aborts an in-flight evaluation.

mod cancellation;
mod evaluator;
mod metric;
mod metric_def;
mod metric_name;
mod metric_result;
mod metric_value;
mod readme;
mod reviewedness;
mod worker_pool;

pub use cancellation::CancellationToken;
pub use evaluator::{Cancelled, Evaluation, Evaluator};
pub use metric::{Metric, RatingSubject};
pub use metric_def::{
    BusFactorMetric, CodeQualityMetric, DatasetAndCodeMetric, DatasetQualityMetric, LicenseMetric, PerformanceClaimsMetric,
    RampUpMetric, ReproducibilityMetric, ReviewednessMetric, SizeMetric, TreeScoreMetric, default_metrics,
};
pub use metric_name::MetricName;
pub use metric_result::MetricResult;
pub(crate) use metric_result::millis;
pub use metric_value::{MetricValue, NOT_COMPUTABLE, Platform, is_not_computable};
pub use reviewedness::reviewedness;
pub use worker_pool::WorkerPool;
