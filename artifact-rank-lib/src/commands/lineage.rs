use super::common::{RegistryArgs, write_json};
use super::Host;
use crate::Result;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct LineageArgs {
    /// Id of the artifact whose ancestry to trace
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub registry: RegistryArgs,
}

#[derive(Parser, Debug)]
pub struct CostArgs {
    /// Id of the artifact to price
    #[arg(value_name = "ID")]
    pub id: String,

    /// Also report every artifact in the lineage, with totals that include their ancestors
    #[arg(long)]
    pub include_dependencies: bool,

    #[command(flatten)]
    pub registry: RegistryArgs,
}

pub fn trace_lineage<H: Host>(host: &mut H, args: &LineageArgs) -> Result<()> {
    let engine = args.registry.open_engine()?;
    let graph = engine.lineage(&args.id).into_app_err_with(|| format!("tracing lineage of '{}'", args.id))?;
    write_json(host, &graph)
}

pub fn compute_artifact_cost<H: Host>(host: &mut H, args: &CostArgs) -> Result<()> {
    let engine = args.registry.open_engine()?;
    let costs = engine
        .cost(&args.id, args.include_dependencies)
        .into_app_err_with(|| format!("computing cost of '{}'", args.id))?;
    write_json(host, &costs)
}
