use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Names of the metrics computed for every artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    License,
    RampUpTime,
    BusFactor,
    PerformanceClaims,
    SizeScore,
    DatasetAndCodeScore,
    DatasetQuality,
    CodeQuality,
    Reproducibility,
    Reviewedness,
    TreeScore,
}

impl MetricName {
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::License => "Compatibility of the declared license with LGPL-2.1",
            Self::RampUpTime => "How quickly a newcomer can start using the artifact from its README",
            Self::BusFactor => "How many contributors the artifact's development depends on",
            Self::PerformanceClaims => "Whether the README backs its performance claims with evaluation results",
            Self::SizeScore => "How comfortably the artifact fits on each deployment platform",
            Self::DatasetAndCodeScore => "Whether the training dataset and the training code are identified",
            Self::DatasetQuality => "How well the associated dataset is documented",
            Self::CodeQuality => "Signals of testing, linting, and maintenance in the associated code",
            Self::Reproducibility => "Whether the artifact runs from its usage instructions alone",
            Self::Reviewedness => "Share of code additions that arrived through approved, merged changes",
            Self::TreeScore => "Average net score of the artifact's direct parents",
        }
    }
}
