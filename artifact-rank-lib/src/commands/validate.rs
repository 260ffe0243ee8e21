use super::Host;
use super::common::RegistryArgs;
use crate::Result;
use crate::facts::load_registry;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,
}

/// Check that the configuration and the registry snapshot load cleanly
///
/// Malformed registry records are listed on the error stream and the process exits with status 1.
pub fn validate_inputs<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let _ = args.registry.config.load()?;
    let loaded = load_registry(&args.registry.registry)?;

    if loaded.rejected.is_empty() {
        let _ = writeln!(
            host.output(),
            "Registry '{}' is valid: {} artifact(s)",
            args.registry.registry,
            loaded.registry.len()
        );
        return Ok(());
    }

    {
        let mut err = host.error();
        let _ = writeln!(
            err,
            "❌ Registry '{}' has {} malformed record(s):",
            args.registry.registry,
            loaded.rejected.len()
        );
        for reason in &loaded.rejected {
            let _ = writeln!(err, "  {reason}");
        }
    }

    host.exit(1);
    Ok(())
}
