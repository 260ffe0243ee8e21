use crate::metrics::MetricName;

/// Contribution of each metric to the net score.
///
/// The weighted metrics sum to one. Metrics with zero weight are still computed and
/// reported but never move the net score.
#[must_use]
pub const fn weight(name: MetricName) -> f64 {
    match name {
        MetricName::License => 0.20,
        MetricName::RampUpTime => 0.15,
        MetricName::BusFactor | MetricName::PerformanceClaims => 0.12,
        MetricName::DatasetQuality => 0.11,
        MetricName::SizeScore | MetricName::DatasetAndCodeScore | MetricName::CodeQuality => 0.10,
        MetricName::Reproducibility | MetricName::Reviewedness | MetricName::TreeScore => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = MetricName::iter().map(weight).sum();
        assert!((total - 1.0).abs() < 1e-9, "weights sum to {total}");
    }

    #[test]
    fn test_report_only_metrics_have_no_weight() {
        for name in [MetricName::Reproducibility, MetricName::Reviewedness, MetricName::TreeScore] {
            assert!(weight(name).abs() < f64::EPSILON);
        }
    }
}
