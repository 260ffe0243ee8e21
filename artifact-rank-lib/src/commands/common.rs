//! Argument handling and output shared by every subcommand.

use super::Host;
use crate::Result;
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::facts::{ArtifactFacts, ArtifactId, ArtifactKind, MemoryRegistry, load_registry};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use ohno::IntoAppError;
use serde::Serialize;
use std::io::Write;

const LOG_TARGET: &str = "  commands";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by the subcommands that read configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to configuration file (default is `artifact-rank.toml` in the current directory)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Arguments shared by the subcommands that query a registry snapshot
#[derive(Args, Debug)]
pub struct RegistryArgs {
    /// Registry snapshot: a JSON array of raw artifact metadata records
    #[arg(long, short = 'r', value_name = "PATH", default_value = "registry.json")]
    pub registry: Utf8PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,
}

impl ConfigArgs {
    /// Initialize logging and load the engine configuration.
    pub fn load(&self) -> Result<EngineConfig> {
        init_logging(self.log_level);
        EngineConfig::load(Utf8Path::new("."), self.config.as_ref())
    }
}

impl RegistryArgs {
    /// Initialize logging, load configuration and the registry snapshot, and build an engine.
    pub fn open_engine(&self) -> Result<Engine<MemoryRegistry>> {
        let config = self.config.load()?;
        let loaded = load_registry(&self.registry)?;

        if !loaded.rejected.is_empty() {
            log::warn!(
                target: LOG_TARGET,
                "Skipped {} malformed record(s) in '{}'",
                loaded.rejected.len(),
                self.registry
            );
        }

        Ok(Engine::new(loaded.registry, &config))
    }
}

fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .init();
}

/// A compact listing entry for an artifact.
#[derive(Debug, Serialize)]
pub struct ArtifactSummary<'a> {
    pub id: &'a ArtifactId,
    pub name: &'a str,
    pub kind: ArtifactKind,
    pub version: &'a str,
}

impl<'a> From<&'a ArtifactFacts> for ArtifactSummary<'a> {
    fn from(facts: &'a ArtifactFacts) -> Self {
        Self {
            id: &facts.id,
            name: &facts.name,
            kind: facts.kind,
            version: &facts.version,
        }
    }
}

/// Write `value` to the host's output as pretty-printed JSON.
pub fn write_json<H: Host, T: Serialize + ?Sized>(host: &mut H, value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value).into_app_err("serializing output")?;
    text.push('\n');
    host.output().write_all(text.as_bytes()).into_app_err("writing output")?;
    Ok(())
}
