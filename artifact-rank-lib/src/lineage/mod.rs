//! Artifact lineage and download cost
//!
//! [`build_lineage`] walks `parent_refs` breadth-first through a [`Registry`](crate::facts::Registry),
//! keyed by artifact id with an explicit visited set, so reference cycles terminate and a
//! shared ancestor appears once. [`compute_cost`] sums sizes over the resulting graph.

mod cost;
mod graph;

pub use cost::{CostEntry, compute_cost};
pub use graph::{LineageEdge, LineageGraph, LineageNode, UnresolvedReason, UnresolvedRef, build_lineage};
