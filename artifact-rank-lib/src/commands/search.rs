use super::common::{ArtifactSummary, RegistryArgs, write_json};
use super::Host;
use crate::Result;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Regular expression matched against artifact names and READMEs
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    #[command(flatten)]
    pub registry: RegistryArgs,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,
}

pub async fn search_artifacts<H: Host>(host: &mut H, args: &SearchArgs) -> Result<()> {
    let engine = args.registry.open_engine()?;
    let found = engine
        .search(&args.pattern)
        .await
        .into_app_err_with(|| format!("searching for '{}'", args.pattern))?;
    let summaries: Vec<_> = found.iter().map(|f| ArtifactSummary::from(f.as_ref())).collect();
    write_json(host, &summaries)
}

pub fn list_artifacts<H: Host>(host: &mut H, args: &ListArgs) -> Result<()> {
    let engine = args.registry.open_engine()?;
    let all = engine.list();
    let summaries: Vec<_> = all.iter().map(|f| ArtifactSummary::from(f.as_ref())).collect();
    write_json(host, &summaries)
}
