use super::NOT_COMPUTABLE;
use crate::facts::{Activity, code_additions};

/// Fraction of code additions that arrived through changes that were both approved and merged.
///
/// - Only source files count; weights, data, and docs are excluded from both sides.
/// - Direct (unreviewed) commits count toward the total only.
/// - An unapproved merged change adds nothing to the reviewed side.
/// - Activity that touched no code at all is fully reviewed by definition (`1.0`).
/// - No merged change and no direct commit, or no activity record, is [`NOT_COMPUTABLE`].
#[must_use]
pub fn reviewedness(activity: Option<&Activity>) -> f64 {
    let Some(activity) = activity else {
        return NOT_COMPUTABLE;
    };

    let merged: Vec<_> = activity.changes.iter().filter(|c| c.merged).collect();
    if merged.is_empty() && activity.direct_commits.is_empty() {
        return NOT_COMPUTABLE;
    }

    let reviewed: u64 = merged.iter().filter(|c| c.approved).map(|c| c.code_additions()).sum();
    let total: u64 = merged.iter().map(|c| c.code_additions()).sum::<u64>() + code_additions(&activity.direct_commits);

    if total == 0 {
        return 1.0;
    }

    #[expect(clippy::cast_precision_loss, reason = "line counts are far below 2^52")]
    let ratio = reviewed as f64 / total as f64;
    ratio
}
