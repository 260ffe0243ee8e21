use super::{LineageGraph, build_lineage};
use crate::error::NotFoundError;
use crate::facts::{ArtifactId, Registry};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Download cost of one artifact, in megabytes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostEntry {
    /// The artifact's own size. Unknown sizes count as zero.
    pub standalone_cost_mb: f64,

    /// The artifact plus each distinct ancestor reachable from it, counted once.
    /// Saturates at `u64::MAX` bytes.
    pub total_cost_mb: f64,
}

/// Compute download costs rooted at `root`.
///
/// Without dependencies only the root is reported and its total equals its standalone
/// cost. With dependencies every artifact in the root's lineage gets an entry.
///
/// # Errors
///
/// Returns [`NotFoundError`] if `root` is not in the registry.
pub fn compute_cost<R: Registry + ?Sized>(
    root: &ArtifactId,
    include_dependencies: bool,
    registry: &R,
) -> Result<BTreeMap<ArtifactId, CostEntry>, NotFoundError> {
    if !include_dependencies {
        let facts = registry.get(root).ok_or_else(|| NotFoundError::from(root))?;
        let size = to_mb(facts.size_bytes.unwrap_or(0));
        return Ok(BTreeMap::from([(
            root.clone(),
            CostEntry {
                standalone_cost_mb: size,
                total_cost_mb: size,
            },
        )]));
    }

    let graph = build_lineage(root, registry)?;
    Ok(costs_over(&graph, registry))
}

fn costs_over<R: Registry + ?Sized>(graph: &LineageGraph, registry: &R) -> BTreeMap<ArtifactId, CostEntry> {
    let sizes: HashMap<&ArtifactId, u64> = graph
        .nodes
        .iter()
        .map(|n| (&n.artifact_id, registry.get(&n.artifact_id).and_then(|f| f.size_bytes).unwrap_or(0)))
        .collect();

    let mut parents: HashMap<&ArtifactId, Vec<&ArtifactId>> = HashMap::new();
    for edge in &graph.edges {
        parents.entry(&edge.to_id).or_default().push(&edge.from_id);
    }

    graph
        .nodes
        .iter()
        .map(|node| {
            let own = sizes.get(&node.artifact_id).copied().unwrap_or(0);

            let mut reached = HashSet::from([&node.artifact_id]);
            let mut stack = vec![&node.artifact_id];
            let mut total = own;
            while let Some(current) = stack.pop() {
                for parent in parents.get(current).into_iter().flatten() {
                    if reached.insert(*parent) {
                        total = total.saturating_add(sizes.get(*parent).copied().unwrap_or(0));
                        stack.push(*parent);
                    }
                }
            }

            (
                node.artifact_id.clone(),
                CostEntry {
                    standalone_cost_mb: to_mb(own),
                    total_cost_mb: to_mb(total),
                },
            )
        })
        .collect()
}

#[expect(clippy::cast_precision_loss, reason = "megabyte figures tolerate rounding")]
fn to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::MemoryRegistry;
    use crate::lineage::graph::tests::artifact;

    const MB: u64 = 1_048_576;

    fn id(s: &str) -> ArtifactId {
        ArtifactId::parse(s).unwrap()
    }

    #[test]
    fn test_diamond_counts_shared_ancestor_once() {
        let registry = MemoryRegistry::new([
            artifact("r", Some(10 * MB), &["p1", "p2"]),
            artifact("p1", Some(20 * MB), &["g"]),
            artifact("p2", Some(30 * MB), &["g"]),
            artifact("g", Some(100 * MB), &[]),
        ]);

        let costs = compute_cost(&id("r"), true, &registry).unwrap();
        assert_eq!(costs.len(), 4);
        assert!((costs[&id("r")].total_cost_mb - 160.0).abs() < 1e-9);
        assert!((costs[&id("r")].standalone_cost_mb - 10.0).abs() < 1e-9);
        assert!((costs[&id("p1")].total_cost_mb - 120.0).abs() < 1e-9);
        assert!((costs[&id("g")].total_cost_mb - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_without_dependencies_reports_root_only() {
        let registry = MemoryRegistry::new([artifact("r", Some(5 * MB), &["p"]), artifact("p", Some(MB), &[])]);

        let costs = compute_cost(&id("r"), false, &registry).unwrap();
        assert_eq!(costs.len(), 1);
        assert_eq!(
            costs[&id("r")],
            CostEntry {
                standalone_cost_mb: 5.0,
                total_cost_mb: 5.0,
            }
        );
    }

    #[test]
    fn test_cycle_counts_each_member_once() {
        let registry = MemoryRegistry::new([artifact("a", Some(MB), &["b"]), artifact("b", Some(2 * MB), &["a"])]);

        let costs = compute_cost(&id("a"), true, &registry).unwrap();
        assert!((costs[&id("a")].total_cost_mb - 3.0).abs() < 1e-9);
        assert!((costs[&id("b")].total_cost_mb - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_size_counts_as_zero() {
        let registry = MemoryRegistry::new([artifact("r", None, &["p"]), artifact("p", Some(MB / 2), &[])]);

        let costs = compute_cost(&id("r"), true, &registry).unwrap();
        assert!(costs[&id("r")].standalone_cost_mb.abs() < f64::EPSILON);
        assert!((costs[&id("r")].total_cost_mb - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_huge_sizes_saturate() {
        let half = u64::MAX / 2 + 1;
        let registry = MemoryRegistry::new([artifact("r", Some(half), &["p"]), artifact("p", Some(half), &[])]);

        let costs = compute_cost(&id("r"), true, &registry).unwrap();
        let root = costs[&id("r")];
        assert!(root.total_cost_mb.is_finite());
        assert!(root.total_cost_mb >= root.standalone_cost_mb);
        assert!((root.total_cost_mb - to_mb(u64::MAX)).abs() < 1.0);
    }

    #[test]
    fn test_unknown_root_is_not_found() {
        let registry = MemoryRegistry::new([]);
        assert!(compute_cost(&id("x"), false, &registry).is_err());
        assert!(compute_cost(&id("x"), true, &registry).is_err());
    }
}
