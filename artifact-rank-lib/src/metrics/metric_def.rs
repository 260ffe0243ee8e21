use super::readme::{fraction, has_code_block, has_numeric_table, has_section, keyword_hits, section_text, word_count};
use super::reviewedness::reviewedness;
use super::{Metric, MetricName, MetricValue, NOT_COMPUTABLE, Platform, RatingSubject, is_not_computable};
use crate::Result;
use crate::facts::{ArtifactKind, DemoOutcome, Relationship};
use std::collections::BTreeMap;
use std::sync::Arc;
use strum::IntoEnumIterator;

macro_rules! metric_def {
    ($(#[$meta:meta])* $ty:ident, $name:ident, |$subject:ident| $body:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        impl Metric for $ty {
            fn name(&self) -> MetricName {
                MetricName::$name
            }

            fn score(&self, $subject: &RatingSubject) -> Result<MetricValue> {
                Ok($body)
            }
        }
    };
}

/// The full metric set, in reporting order.
#[must_use]
pub fn default_metrics() -> Vec<Arc<dyn Metric>> {
    vec![
        Arc::new(LicenseMetric),
        Arc::new(RampUpMetric),
        Arc::new(BusFactorMetric),
        Arc::new(PerformanceClaimsMetric),
        Arc::new(SizeMetric),
        Arc::new(DatasetAndCodeMetric),
        Arc::new(DatasetQualityMetric),
        Arc::new(CodeQualityMetric),
        Arc::new(ReproducibilityMetric),
        Arc::new(ReviewednessMetric),
        Arc::new(TreeScoreMetric),
    ]
}

/// Licenses known to be compatible with LGPL-2.1 distribution.
const COMPATIBLE_LICENSES: &[&str] = &[
    "MIT",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "ISC",
    "Zlib",
    "Unlicense",
    "CC0-1.0",
    "BSL-1.0",
    "Apache-2.0",
    "MPL-2.0",
    "LGPL-2.1",
    "LGPL-2.1-only",
    "LGPL-2.1-or-later",
];

const LGPL_PHRASES: &[&str] = &["lgpl-2.1", "lgpl 2.1", "lgplv2.1"];
const COMPATIBLE_PHRASES: &[&str] = &["mit license", "apache", "bsd", "isc license", "unlicense", "cc0"];
const INCOMPATIBLE_PHRASES: &[&str] = &["gpl", "non-commercial", "noncommercial", "cc-by-nc", "proprietary", "all rights reserved"];

fn license_score(text: &str) -> f64 {
    let candidate = text.trim();
    if candidate.is_empty() {
        return 0.0;
    }

    if COMPATIBLE_LICENSES.iter().any(|known| known.eq_ignore_ascii_case(candidate)) {
        return 1.0;
    }

    if let Some(id) = spdx::license_id(candidate) {
        return if id.is_copyleft() || !id.is_osi_approved() { 0.0 } else { 1.0 };
    }

    let lower = candidate.to_lowercase();
    // "gpl" is a substring of every LGPL spelling, so those are settled first.
    if LGPL_PHRASES.iter().any(|p| lower.contains(p)) {
        return 1.0;
    }

    if INCOMPATIBLE_PHRASES.iter().any(|p| lower.contains(p)) {
        return 0.0;
    }

    if COMPATIBLE_PHRASES.iter().any(|p| lower.contains(p)) {
        return 1.0;
    }

    0.0
}

metric_def!(
    /// LGPL-2.1 compatibility of the declared license, falling back to the README's license section.
    LicenseMetric,
    License,
    |subject| {
        let facts = &subject.facts;
        let text = facts
            .license_id
            .clone()
            .or_else(|| section_text(&facts.readme_text, "licen"))
            .unwrap_or_default();
        MetricValue::Scalar(license_score(&text))
    }
);

metric_def!(RampUpMetric, RampUpTime, |subject| {
    let readme = subject.facts.readme_text.as_str();
    if readme.trim().is_empty() {
        MetricValue::Scalar(0.0)
    } else {
        let install = has_section(readme, &["install", "setup", "getting started"]);
        let usage = has_section(readme, &["usage", "quick", "example", "how to"]);
        let parts = [install, usage, has_code_block(readme)];
        let structure = fraction(parts.iter().filter(|p| **p).count(), parts.len());
        MetricValue::Scalar(0.75 * structure + 0.25 * fraction(word_count(readme), 300))
    }
});

metric_def!(
    /// Smallest number of contributors covering more than half of all commits, saturating at five.
    BusFactorMetric,
    BusFactor,
    |subject| {
        match &subject.facts.activity {
            None => MetricValue::not_computable(),
            Some(activity) => {
                let mut commits: Vec<u64> = activity.contributors.iter().map(|c| c.commits).filter(|c| *c > 0).collect();
                commits.sort_unstable_by(|a, b| b.cmp(a));
                let total: u128 = commits.iter().copied().map(u128::from).sum();

                let mut covered: u128 = 0;
                let mut needed = 0;
                for count in commits {
                    covered += u128::from(count);
                    needed += 1;
                    if covered > total - covered {
                        break;
                    }
                }

                MetricValue::Scalar(fraction(needed, 5))
            }
        }
    }
);

const PERFORMANCE_KEYWORDS: &[&str] = &[
    "benchmark",
    "accuracy",
    "f1",
    "bleu",
    "rouge",
    "perplexity",
    "precision",
    "recall",
    "leaderboard",
    "state-of-the-art",
];

metric_def!(PerformanceClaimsMetric, PerformanceClaims, |subject| {
    let readme = subject.facts.readme_text.as_str();
    let claims = has_section(readme, &["evaluation", "result", "benchmark", "performance"]) || keyword_hits(readme, PERFORMANCE_KEYWORDS) >= 2;
    let evidence = has_numeric_table(readme);
    MetricValue::Scalar(if claims { 0.5 } else { 0.0 } + if evidence { 0.5 } else { 0.0 })
});

metric_def!(
    /// Per-platform fit: `1 - size / budget`, clamped to `[0, 1]`.
    SizeMetric,
    SizeScore,
    |subject| {
        let scores: BTreeMap<Platform, f64> = Platform::iter()
            .map(|platform| {
                let score = subject.facts.size_bytes.map_or(NOT_COMPUTABLE, |size| {
                    #[expect(clippy::cast_precision_loss, reason = "sizes are far below 2^52 bytes")]
                    let ratio = size as f64 / platform.budget_bytes() as f64;
                    (1.0 - ratio).clamp(0.0, 1.0)
                });
                (platform, score)
            })
            .collect();
        MetricValue::PerPlatform(scores)
    }
);

metric_def!(
    /// Half credit each for an identified training dataset and identified source code.
    DatasetAndCodeMetric,
    DatasetAndCodeScore,
    |subject| {
        let facts = &subject.facts;
        let readme = facts.readme_text.as_str();

        let has_dataset = facts.kind == ArtifactKind::Dataset
            || facts.parent_refs.iter().any(|r| r.relationship == Relationship::FineTuningDataset)
            || keyword_hits(readme, &["dataset", "trained on", "training data"]) > 0;

        let code_host = facts
            .source_url
            .as_ref()
            .and_then(|url| url.host_str())
            .is_some_and(|host| matches!(host, "github.com" | "gitlab.com"));
        let has_code = facts.kind == ArtifactKind::Code
            || code_host
            || facts.parent_refs.iter().any(|r| r.relationship == Relationship::CodeDependency)
            || keyword_hits(readme, &["github.com", "gitlab.com"]) > 0;

        MetricValue::Scalar(if has_dataset { 0.5 } else { 0.0 } + if has_code { 0.5 } else { 0.0 })
    }
);

const DATASET_DOC_KEYWORDS: &[&str] = &[
    "train",
    "validation",
    "test split",
    "examples",
    "samples",
    "rows",
    "license",
    "source",
    "collected",
    "annotat",
    "bias",
    "limitation",
];

metric_def!(DatasetQualityMetric, DatasetQuality, |subject| {
    let facts = &subject.facts;
    if facts.kind == ArtifactKind::Code {
        MetricValue::not_computable()
    } else {
        MetricValue::Scalar(fraction(keyword_hits(&facts.readme_text, DATASET_DOC_KEYWORDS), 6))
    }
});

const CODE_QUALITY_KEYWORDS: &[&str] = &[
    "pytest",
    "unittest",
    "unit test",
    "continuous integration",
    "github actions",
    "lint",
    "flake8",
    "ruff",
    "mypy",
    "type hint",
    "requirements.txt",
    "pip install",
    "docker",
];

metric_def!(CodeQualityMetric, CodeQuality, |subject| {
    let facts = &subject.facts;
    if facts.kind == ArtifactKind::Dataset {
        MetricValue::not_computable()
    } else {
        let reviewed_changes = facts
            .activity
            .as_ref()
            .is_some_and(|a| a.changes.iter().any(|c| c.merged && c.approved));
        let base = 0.8 * fraction(keyword_hits(&facts.readme_text, CODE_QUALITY_KEYWORDS), 4);
        MetricValue::Scalar(base + if reviewed_changes { 0.2 } else { 0.0 })
    }
});

metric_def!(
    /// Whether the demonstration code runs as written: 1, 0.5 with changes, 0 otherwise.
    ReproducibilityMetric,
    Reproducibility,
    |subject| {
        let facts = &subject.facts;
        let score = match facts.demo_outcome {
            Some(DemoOutcome::RunsUnmodified) => 1.0,
            Some(DemoOutcome::RunsWithChanges) => 0.5,
            Some(DemoOutcome::Fails) => 0.0,
            None if has_code_block(&facts.readme_text) => 0.5,
            None => 0.0,
        };
        MetricValue::Scalar(score)
    }
);

metric_def!(ReviewednessMetric, Reviewedness, |subject| {
    MetricValue::Scalar(reviewedness(subject.facts.activity.as_ref()))
});

metric_def!(
    /// Mean net score of the direct parents; not computable without parents.
    TreeScoreMetric,
    TreeScore,
    |subject| {
        let scores: Vec<f64> = subject.parent_scores.iter().copied().filter(|s| !is_not_computable(*s)).collect();
        if scores.is_empty() {
            MetricValue::not_computable()
        } else {
            #[expect(clippy::cast_precision_loss, reason = "parent counts are small")]
            let count = scores.len() as f64;
            MetricValue::Scalar(scores.iter().sum::<f64>() / count)
        }
    }
);
