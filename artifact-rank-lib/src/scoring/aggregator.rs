use super::{RatingRecord, weight};
use crate::metrics::{Evaluation, MetricResult, millis};

const LOG_TARGET: &str = "   scoring";

/// Weighted net score over `results`.
///
/// Results carrying an error or the not-computable sentinel are left out of both the
/// numerator and the denominator. Terms are summed in slice order, so the same results
/// always produce a bit-identical score. When nothing weighted is computable the score is zero.
#[must_use]
pub fn net_score(results: &[MetricResult]) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for result in results {
        let w = weight(result.name);
        if w <= 0.0 {
            continue;
        }

        if let Some(value) = result.contribution() {
            weighted_sum += w * value;
            total_weight += w;
        }
    }

    if total_weight <= 0.0 {
        return 0.0;
    }

    (weighted_sum / total_weight).clamp(0.0, 1.0)
}

/// Turn an evaluation into a rating record.
#[must_use]
pub fn aggregate(evaluation: Evaluation) -> RatingRecord {
    let net_score = net_score(&evaluation.results);
    log::debug!(target: LOG_TARGET, "Net score for '{}' is {net_score:.3}", evaluation.artifact_id);

    RatingRecord {
        artifact_id: evaluation.artifact_id,
        net_score,
        net_score_latency_ms: millis(evaluation.elapsed),
        metrics: evaluation.results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::ArtifactId;
    use crate::metrics::{MetricName, MetricValue, NOT_COMPUTABLE, Platform};
    use core::time::Duration;
    use std::collections::BTreeMap;

    fn result(name: MetricName, value: f64) -> MetricResult {
        MetricResult::new(name, MetricValue::Scalar(value), Duration::ZERO)
    }

    #[test]
    fn test_nothing_computable_scores_zero() {
        let results = vec![
            result(MetricName::License, NOT_COMPUTABLE),
            MetricResult::failed(MetricName::RampUpTime, Duration::ZERO, "boom"),
        ];
        assert!(net_score(&results).abs() < f64::EPSILON);
        assert!(net_score(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sentinels_leave_the_denominator() {
        let results = vec![
            result(MetricName::License, 1.0),
            result(MetricName::RampUpTime, 0.0),
            result(MetricName::BusFactor, NOT_COMPUTABLE),
        ];
        let expected = 0.20 / (0.20 + 0.15);
        assert!((net_score(&results) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weight_metrics_do_not_move_the_score() {
        let base = vec![result(MetricName::License, 0.5)];
        let mut with_extra = base.clone();
        with_extra.push(result(MetricName::TreeScore, 1.0));
        with_extra.push(result(MetricName::Reviewedness, 0.0));
        assert_eq!(net_score(&base).to_bits(), net_score(&with_extra).to_bits());
    }

    #[test]
    fn test_per_platform_size_is_averaged() {
        let size = MetricResult::new(
            MetricName::SizeScore,
            MetricValue::PerPlatform(BTreeMap::from([
                (Platform::RaspberryPi, 0.0),
                (Platform::JetsonNano, 0.5),
                (Platform::DesktopPc, 1.0),
                (Platform::AwsServer, NOT_COMPUTABLE),
            ])),
            Duration::ZERO,
        );
        assert!((net_score(&[size]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_keeps_order_and_latency() {
        let evaluation = Evaluation {
            artifact_id: ArtifactId::parse("m").unwrap(),
            results: vec![result(MetricName::TreeScore, 0.3), result(MetricName::License, 1.0)],
            elapsed: Duration::from_millis(42),
        };

        let record = aggregate(evaluation);
        assert_eq!(record.net_score_latency_ms, 42);
        assert!((record.net_score - 1.0).abs() < f64::EPSILON);
        assert_eq!(record.metrics[0].name, MetricName::TreeScore);
        assert!(record.metric(MetricName::License).is_some());
        assert!(record.metric(MetricName::BusFactor).is_none());
    }
}
