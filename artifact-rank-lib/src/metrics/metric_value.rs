use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumIter};

/// Value reported by a metric that could not be computed for an artifact.
///
/// Distinct from a genuine score of zero: sentinel values are left out of the net score.
pub const NOT_COMPUTABLE: f64 = -1.0;

/// Deployment targets the size metric is reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    RaspberryPi,
    JetsonNano,
    DesktopPc,
    AwsServer,
}

impl Platform {
    /// Largest artifact, in bytes, that still scores above zero on this platform.
    #[must_use]
    pub const fn budget_bytes(self) -> u64 {
        const GIB: u64 = 1024 * 1024 * 1024;
        match self {
            Self::RaspberryPi => GIB,
            Self::JetsonNano => 4 * GIB,
            Self::DesktopPc => 16 * GIB,
            Self::AwsServer => 64 * GIB,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Scalar(f64),
    PerPlatform(BTreeMap<Platform, f64>),
}

impl MetricValue {
    #[must_use]
    pub const fn not_computable() -> Self {
        Self::Scalar(NOT_COMPUTABLE)
    }

    /// Reduce to a single score, averaging computable per-platform entries.
    ///
    /// Returns [`NOT_COMPUTABLE`] when nothing is computable.
    #[must_use]
    pub fn to_scalar(&self) -> f64 {
        match self {
            Self::Scalar(v) => *v,
            Self::PerPlatform(map) => {
                let computable: Vec<f64> = map.values().copied().filter(|v| !is_not_computable(*v)).collect();
                if computable.is_empty() {
                    NOT_COMPUTABLE
                } else {
                    #[expect(clippy::cast_precision_loss, reason = "a handful of platforms")]
                    let count = computable.len() as f64;
                    computable.iter().sum::<f64>() / count
                }
            }
        }
    }

    #[must_use]
    pub fn is_not_computable(&self) -> bool {
        is_not_computable(self.to_scalar())
    }

    /// Force every entry into `[0, 1]`, keeping sentinels and mapping non-finite values to the sentinel.
    #[must_use]
    pub fn sanitized(self) -> Self {
        match self {
            Self::Scalar(v) => Self::Scalar(sanitize(v)),
            Self::PerPlatform(map) => Self::PerPlatform(map.into_iter().map(|(k, v)| (k, sanitize(v))).collect()),
        }
    }
}

#[must_use]
pub fn is_not_computable(value: f64) -> bool {
    value.to_bits() == NOT_COMPUTABLE.to_bits()
}

fn sanitize(value: f64) -> f64 {
    if !value.is_finite() || is_not_computable(value) {
        NOT_COMPUTABLE
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_scalar_averages_computable_platforms() {
        let value = MetricValue::PerPlatform(BTreeMap::from([
            (Platform::RaspberryPi, 0.2),
            (Platform::JetsonNano, 0.6),
            (Platform::DesktopPc, NOT_COMPUTABLE),
        ]));
        assert!((value.to_scalar() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_to_scalar_all_sentinel_is_sentinel() {
        let value = MetricValue::PerPlatform(BTreeMap::from([(Platform::AwsServer, NOT_COMPUTABLE)]));
        assert!(value.is_not_computable());
        assert!(MetricValue::PerPlatform(BTreeMap::new()).is_not_computable());
    }

    #[test]
    fn test_sanitized_clamps_but_keeps_sentinel() {
        assert_eq!(MetricValue::Scalar(1.7).sanitized(), MetricValue::Scalar(1.0));
        assert_eq!(MetricValue::Scalar(-0.3).sanitized(), MetricValue::Scalar(0.0));
        assert_eq!(MetricValue::Scalar(f64::NAN).sanitized(), MetricValue::not_computable());
        assert_eq!(MetricValue::not_computable().sanitized(), MetricValue::not_computable());
    }

    #[test]
    fn test_serializes_untagged() {
        assert_eq!(serde_json::to_string(&MetricValue::Scalar(0.5)).unwrap(), "0.5");
        let map = MetricValue::PerPlatform(BTreeMap::from([(Platform::DesktopPc, 1.0)]));
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"desktop_pc":1.0}"#);
    }

    #[test]
    fn test_budgets_increase() {
        assert!(Platform::RaspberryPi.budget_bytes() < Platform::JetsonNano.budget_bytes());
        assert!(Platform::DesktopPc.budget_bytes() < Platform::AwsServer.budget_bytes());
    }
}
