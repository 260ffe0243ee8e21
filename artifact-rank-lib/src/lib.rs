#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for artifact-rank
//!
//! Turns ingested model, dataset, and code metadata into rated, queryable registry
//! entries: concurrent multi-metric scoring with a deterministic net score, a version
//! query language, cycle-safe lineage with download cost, and a guarded regex search.
//!
//! # Module Organization
//!
//! - [`facts`]: Canonical artifact facts, metadata normalization, and the registry
//! - [`versions`]: Version query parsing and matching
//! - [`metrics`]: Metric definitions and the concurrent evaluator
//! - [`scoring`]: Net score aggregation
//! - [`lineage`]: Lineage graphs and cost aggregation
//! - [`search`]: Bounded regular-expression search
//! - [`commands`]: Command-line interface
//!
//! The [`Engine`] ties these together behind the operations the command line exposes.

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod config;
mod engine;
mod error;
pub mod facts;
pub mod lineage;
pub mod metrics;
pub mod scoring;
pub mod search;
pub mod versions;

pub use crate::commands::{Host, run};
pub use crate::config::EngineConfig;
pub use crate::engine::Engine;
pub use crate::error::{EngineError, NotFoundError};
pub use crate::metrics::CancellationToken;
