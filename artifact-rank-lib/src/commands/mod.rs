//! Command-line interface for artifact-rank
//!
//! This module maps subcommands onto [`Engine`](crate::Engine) operations and prints their
//! results as pretty JSON through a [`Host`].
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **rate**: Compute every metric and the net score of one artifact
//! - **versions**: Filter candidate versions, or an artifact's registry versions, with a version query
//! - **lineage**: Trace an artifact's ancestry through the registry
//! - **cost**: Report download cost, optionally including the whole lineage
//! - **search**: Find artifacts by regular expression over names and READMEs
//! - **list**: List the registry
//! - **init**: Generate a default configuration file
//! - **validate**: Check that configuration and the registry snapshot load cleanly
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate handler. Registry-backed handlers initialize logging, load the
//! configuration (`artifact-rank.toml` by default), load the registry snapshot given by
//! `--registry`, and build an engine before running their operation.

mod common;
mod host;
mod init;
mod lineage;
mod rate;
mod run;
mod search;
mod validate;
mod versions;

pub use common::{ArtifactSummary, ConfigArgs, LogLevel, RegistryArgs};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use lineage::{CostArgs, LineageArgs, compute_artifact_cost, trace_lineage};
pub use rate::{RateArgs, rate_artifact};
pub use run::run;
pub use search::{ListArgs, SearchArgs, list_artifacts, search_artifacts};
pub use validate::{ValidateArgs, validate_inputs};
pub use versions::{VersionsArgs, match_artifact_versions};
