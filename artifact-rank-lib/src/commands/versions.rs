use super::common::{ArtifactSummary, RegistryArgs, write_json};
use super::Host;
use crate::Result;
use crate::versions::match_versions;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct VersionsArgs {
    /// Version query: `*`, `1.2.3`, `1.0.0-2.0.0`, `~1.2.0`, or `^1.2.0`
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Candidate versions to filter
    #[arg(value_name = "CANDIDATE", required_unless_present = "name", conflicts_with = "name")]
    pub candidates: Vec<String>,

    /// Instead of filtering candidates, list the registry versions of the artifact with this name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    #[command(flatten)]
    pub registry: RegistryArgs,
}

pub fn match_artifact_versions<H: Host>(host: &mut H, args: &VersionsArgs) -> Result<()> {
    if let Some(name) = &args.name {
        let engine = args.registry.open_engine()?;
        let found = engine
            .versions_of(name, &args.query)
            .into_app_err_with(|| format!("listing versions of '{name}'"))?;
        let summaries: Vec<_> = found.iter().map(|f| ArtifactSummary::from(f.as_ref())).collect();
        return write_json(host, &summaries);
    }

    let _ = args.registry.config.load()?;
    let matched = match_versions(&args.query, args.candidates.iter().map(String::as_str)).into_app_err("matching versions")?;
    write_json(host, &matched)
}
