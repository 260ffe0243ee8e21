use super::common::{RegistryArgs, write_json};
use super::Host;
use crate::Result;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct RateArgs {
    /// Id of the artifact to rate
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub registry: RegistryArgs,
}

pub async fn rate_artifact<H: Host>(host: &mut H, args: &RateArgs) -> Result<()> {
    let engine = args.registry.open_engine()?;
    let record = engine.rate(&args.id).await.into_app_err_with(|| format!("rating '{}'", args.id))?;
    write_json(host, &record)
}
