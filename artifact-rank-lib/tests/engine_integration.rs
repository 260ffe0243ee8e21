//! End-to-end tests of the engine over a registry snapshot loaded from disk.

mod support;

use artifact_rank_lib::facts::{ArtifactId, MemoryRegistry, load_registry};
use artifact_rank_lib::lineage::UnresolvedReason;
use artifact_rank_lib::metrics::{MetricName, MetricValue, is_not_computable};
use artifact_rank_lib::{Engine, EngineConfig, EngineError};
use strum::IntoEnumIterator;
use support::write_registry;

fn engine() -> (tempfile::TempDir, Engine<MemoryRegistry>) {
    let (dir, path) = write_registry();
    let loaded = load_registry(&path).unwrap();
    assert_eq!(loaded.rejected.len(), 1);
    (dir, Engine::new(loaded.registry, &EngineConfig::default()))
}

fn id(s: &str) -> ArtifactId {
    ArtifactId::parse(s).unwrap()
}

#[test]
fn test_load_skips_malformed_records() {
    let (_dir, engine) = engine();
    let ids: Vec<_> = engine.list().iter().map(|f| f.id.to_string()).collect();
    assert_eq!(ids, vec!["bert-base-uncased", "bookcorpus", "distilbert", "loop-a", "loop-b"]);
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_rate_reports_every_metric_in_order() {
    let (_dir, engine) = engine();
    let record = engine.rate("bert-base-uncased").await.unwrap();

    let names: Vec<_> = record.metrics.iter().map(|m| m.name).collect();
    assert_eq!(names, MetricName::iter().collect::<Vec<_>>());
    assert!((0.0..=1.0).contains(&record.net_score));
    assert!(record.net_score > 0.0);

    for metric in &record.metrics {
        assert!(metric.error.is_none(), "{} failed: {:?}", metric.name, metric.error);
        let scalar = metric.value.to_scalar();
        assert!(is_not_computable(scalar) || (0.0..=1.0).contains(&scalar), "{}: {scalar}", metric.name);
    }

    let reviewedness = record.metric(MetricName::Reviewedness).unwrap();
    assert_eq!(reviewedness.value, MetricValue::Scalar(300.0 / 400.0));

    let license = record.metric(MetricName::License).unwrap();
    assert_eq!(license.value, MetricValue::Scalar(1.0));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_rate_is_deterministic_and_tree_score_follows_parent() {
    let (_dir, engine) = engine();
    let parent = engine.rate("bert-base-uncased").await.unwrap();
    let first = engine.rate("distilbert").await.unwrap();
    let second = engine.rate("distilbert").await.unwrap();

    assert_eq!(first.net_score.to_bits(), second.net_score.to_bits());

    let tree = first.metric(MetricName::TreeScore).unwrap().value.to_scalar();
    assert!((tree - parent.net_score).abs() < 1e-12);

    let reproducibility = first.metric(MetricName::Reproducibility).unwrap();
    assert_eq!(reproducibility.value, MetricValue::Scalar(0.5));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_rate_unknown_artifact() {
    let (_dir, engine) = engine();
    assert!(matches!(engine.rate("broken").await, Err(EngineError::NotFound(_))));
}

#[test]
fn test_lineage_follows_base_model_and_datasets() {
    let (_dir, engine) = engine();
    let graph = engine.lineage("distilbert").unwrap();

    let nodes: Vec<_> = graph.nodes.iter().map(|n| n.artifact_id.to_string()).collect();
    assert_eq!(nodes, vec!["distilbert", "bert-base-uncased", "bookcorpus"]);
    assert_eq!(graph.unresolved.len(), 1);

    let edge = &graph.edges[0];
    assert_eq!(edge.from_id, id("bert-base-uncased"));
    assert_eq!(edge.to_id, id("distilbert"));
}

#[test]
fn test_lineage_cycle_terminates() {
    let (_dir, engine) = engine();
    let graph = engine.lineage("loop-a").unwrap();

    let nodes: Vec<_> = graph.nodes.iter().map(|n| n.artifact_id.to_string()).collect();
    assert_eq!(nodes, vec!["loop-a", "loop-b"]);
    assert_eq!(graph.edges.len(), 2);
}

#[test]
fn test_external_source_is_not_an_edge() {
    let (_dir, engine) = engine();
    let graph = engine.lineage("bert-base-uncased").unwrap();
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges.len(), 1);

    let [unresolved] = graph.unresolved.as_slice() else {
        panic!("expected one unresolved reference, got {:?}", graph.unresolved);
    };
    assert_eq!(unresolved.reason, UnresolvedReason::External);
    assert_eq!(unresolved.target, "https://github.com/google-research/bert");
    assert_eq!(unresolved.from_id, id("bert-base-uncased"));
}

#[test]
fn test_cost_with_and_without_dependencies() {
    let (_dir, engine) = engine();

    let costs = engine.cost("distilbert", true).unwrap();
    assert_eq!(costs.len(), 3);
    assert!((costs[&id("distilbert")].standalone_cost_mb - 250.0).abs() < 1e-9);
    assert!((costs[&id("distilbert")].total_cost_mb - 750.0).abs() < 1e-9);
    assert!((costs[&id("bert-base-uncased")].total_cost_mb - 500.0).abs() < 1e-9);

    let costs = engine.cost("distilbert", false).unwrap();
    assert_eq!(costs.len(), 1);
    assert!((costs[&id("distilbert")].total_cost_mb - 250.0).abs() < 1e-9);

    assert!(matches!(engine.cost("nope", true), Err(EngineError::NotFound(_))));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_search() {
    let (_dir, engine) = engine();

    let found: Vec<_> = engine.search(".*bert.*").await.unwrap().iter().map(|f| f.id.to_string()).collect();
    assert_eq!(found, vec!["bert-base-uncased", "distilbert"]);

    assert!(engine.search("^zzz$").await.unwrap().is_empty());

    let start = std::time::Instant::now();
    assert!(matches!(engine.search("(a{1,99999}){1,99999}$").await, Err(EngineError::Regex(_))));
    assert!(start.elapsed() < core::time::Duration::from_millis(250));
}

#[test]
fn test_versions() {
    let (_dir, engine) = engine();

    let matched = engine.match_versions("~1.2.0", ["1.2.0", "1.2.9", "1.3.0", "v1.2.4"]).unwrap();
    assert_eq!(matched, vec!["1.2.0", "1.2.9", "v1.2.4"]);

    let found = engine.versions_of("distilbert", "1.0.0-2.0.0").unwrap();
    assert_eq!(found.len(), 1);
    assert!(engine.versions_of("distilbert", "3.0.0").unwrap().is_empty());

    assert!(matches!(engine.match_versions("1.2.x", ["1.2.0"]), Err(EngineError::VersionParse(_))));
}
