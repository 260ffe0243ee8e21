//! Command dispatch logic for artifact-rank

use super::{
    CostArgs, InitArgs, LineageArgs, ListArgs, RateArgs, SearchArgs, ValidateArgs, VersionsArgs, compute_artifact_cost, init_config,
    list_artifacts, match_artifact_versions, rate_artifact, search_artifacts, trace_lineage, validate_inputs,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "artifact-rank", author, version, long_about = None)]
#[command(about = "Rate, trace, and query model, dataset, and code artifacts")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: RankSubcommand,
}

#[derive(Subcommand, Debug)]
enum RankSubcommand {
    /// Compute the metrics and net score of an artifact
    Rate(Box<RateArgs>),
    /// Filter versions with a version query
    Versions(Box<VersionsArgs>),
    /// Trace the ancestry of an artifact
    Lineage(Box<LineageArgs>),
    /// Report the download cost of an artifact and optionally its ancestry
    Cost(Box<CostArgs>),
    /// Find artifacts whose name or README matches a regular expression
    Search(Box<SearchArgs>),
    /// List every artifact in the registry
    List(Box<ListArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Check that the configuration and registry snapshot load cleanly
    Validate(Box<ValidateArgs>),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        RankSubcommand::Rate(args) => rate_artifact(host, args).await,
        RankSubcommand::Versions(args) => match_artifact_versions(host, args),
        RankSubcommand::Lineage(args) => trace_lineage(host, args),
        RankSubcommand::Cost(args) => compute_artifact_cost(host, args),
        RankSubcommand::Search(args) => search_artifacts(host, args).await,
        RankSubcommand::List(args) => list_artifacts(host, args),
        RankSubcommand::Init(args) => init_config(host, args),
        RankSubcommand::Validate(args) => validate_inputs(host, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cost_flags() {
        let cli = Cli::parse_from(["artifact-rank", "cost", "bert", "--include-dependencies", "--registry", "r.json"]);
        let RankSubcommand::Cost(args) = cli.command else {
            panic!("expected the cost subcommand");
        };
        assert_eq!(args.id, "bert");
        assert!(args.include_dependencies);
        assert_eq!(args.registry.registry, "r.json");
    }

    #[test]
    fn test_versions_requires_candidates_or_name() {
        assert!(Cli::try_parse_from(["artifact-rank", "versions", "^1.0.0"]).is_err());
        assert!(Cli::try_parse_from(["artifact-rank", "versions", "^1.0.0", "1.2.0"]).is_ok());
        assert!(Cli::try_parse_from(["artifact-rank", "versions", "^1.0.0", "--name", "bert"]).is_ok());
    }
}
