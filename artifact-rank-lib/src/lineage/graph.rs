use crate::error::NotFoundError;
use crate::facts::{ArtifactFacts, ArtifactId, ParentTarget, Registry, Relationship, SourceTag};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

const LOG_TARGET: &str = "   lineage";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineageNode {
    pub artifact_id: ArtifactId,
    pub name: String,

    /// Where the reference that first reached this node came from; `root` for the start node.
    pub source_tag: SourceTag,
}

/// A parent-to-child link between two registry artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LineageEdge {
    pub from_id: ArtifactId,
    pub to_id: ArtifactId,
    pub relationship: Relationship,
    pub source_tag: SourceTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// The reference points outside the registry.
    External,

    /// The reference names an id the registry does not hold.
    Missing,
}

/// A parent reference that could not be turned into an edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedRef {
    /// The artifact that holds the reference.
    pub from_id: ArtifactId,
    pub target: String,
    pub relationship: Relationship,
    pub source_tag: SourceTag,
    pub reason: UnresolvedReason,
}

/// The ancestry of one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineageGraph {
    pub root: ArtifactId,

    /// Every artifact reachable from the root, in discovery order, root first.
    pub nodes: Vec<LineageNode>,
    pub edges: Vec<LineageEdge>,
    pub unresolved: Vec<UnresolvedRef>,
}

impl LineageGraph {
    /// Parents of `id` within the graph.
    pub fn parents_of<'a>(&'a self, id: &'a ArtifactId) -> impl Iterator<Item = &'a ArtifactId> {
        self.edges.iter().filter(move |e| &e.to_id == id).map(|e| &e.from_id)
    }

    #[must_use]
    pub fn contains(&self, id: &ArtifactId) -> bool {
        self.nodes.iter().any(|n| &n.artifact_id == id)
    }
}

/// Walk parent references breadth-first from `root`.
///
/// Each artifact is expanded at most once, so cycles terminate. A reference to an artifact
/// that was already visited still produces an edge. Duplicate edges are collapsed, and
/// references that leave the registry are reported in [`LineageGraph::unresolved`].
///
/// # Errors
///
/// Returns [`NotFoundError`] if `root` itself is not in the registry.
pub fn build_lineage<R: Registry + ?Sized>(root: &ArtifactId, registry: &R) -> Result<LineageGraph, NotFoundError> {
    let root_facts = registry.get(root).ok_or_else(|| NotFoundError::from(root))?;

    let mut graph = LineageGraph {
        root: root.clone(),
        nodes: vec![node(&root_facts, SourceTag::Root)],
        edges: Vec::new(),
        unresolved: Vec::new(),
    };

    let mut visited = HashSet::from([root.clone()]);
    let mut seen_edges = HashSet::new();
    let mut queue = VecDeque::from([root_facts]);

    while let Some(child) = queue.pop_front() {
        for parent_ref in &child.parent_refs {
            let parent_id = match &parent_ref.target {
                ParentTarget::Artifact(id) => id,
                ParentTarget::External(url) => {
                    graph.unresolved.push(UnresolvedRef {
                        from_id: child.id.clone(),
                        target: url.to_string(),
                        relationship: parent_ref.relationship,
                        source_tag: parent_ref.source_tag,
                        reason: UnresolvedReason::External,
                    });
                    continue;
                }
            };

            let Some(parent) = registry.get(parent_id) else {
                log::debug!(target: LOG_TARGET, "'{}' references '{parent_id}', which is not in the registry", child.id);
                graph.unresolved.push(UnresolvedRef {
                    from_id: child.id.clone(),
                    target: parent_id.to_string(),
                    relationship: parent_ref.relationship,
                    source_tag: parent_ref.source_tag,
                    reason: UnresolvedReason::Missing,
                });
                continue;
            };

            let edge = LineageEdge {
                from_id: parent_id.clone(),
                to_id: child.id.clone(),
                relationship: parent_ref.relationship,
                source_tag: parent_ref.source_tag,
            };
            if seen_edges.insert((edge.from_id.clone(), edge.to_id.clone(), edge.relationship)) {
                graph.edges.push(edge);
            }

            if visited.insert(parent_id.clone()) {
                graph.nodes.push(node(&parent, parent_ref.source_tag));
                queue.push_back(parent);
            }
        }
    }

    log::debug!(
        target: LOG_TARGET,
        "Lineage of '{root}': {} node(s), {} edge(s), {} unresolved",
        graph.nodes.len(),
        graph.edges.len(),
        graph.unresolved.len()
    );

    Ok(graph)
}

fn node(facts: &Arc<ArtifactFacts>, source_tag: SourceTag) -> LineageNode {
    LineageNode {
        artifact_id: facts.id.clone(),
        name: facts.name.clone(),
        source_tag,
    }
}
