//! Ballot daemon: builds an engine from config and replays operation scripts.

mod script;

use anyhow::Context;
use ballot_engine::{BallotEvent, EngineConfig, VotingEngine};
use ballot_store::MemoryStore;
use ballot_types::VoterId;
use ballot_utils::LogFormat;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ballot-daemon", about = "Weighted election engine")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, env = "BALLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Administrator identity.
    #[arg(long, env = "BALLOT_ADMINISTRATOR")]
    administrator: Option<String>,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "BALLOT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BALLOT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a JSON script of operations against a fresh in-memory engine.
    Run {
        /// JSON array of steps, e.g. `[{"caller": "admin", "op": "whoami"}]`.
        #[arg(long)]
        script: PathBuf,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn resolve_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(admin) = &cli.administrator {
        config.administrator = VoterId::parse(admin).context("invalid --administrator")?;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    config.validate()?;
    Ok(config)
}

fn log_event(event: &BallotEvent) {
    match serde_json::to_string(event) {
        Ok(json) => tracing::info!(event = %json, "ballot event"),
        Err(e) => tracing::warn!(error = %e, "failed to encode ballot event"),
    }
}

fn run(config: &EngineConfig, script_path: &Path) -> anyhow::Result<()> {
    let steps = script::load_script(script_path)?;
    let mut engine = VotingEngine::new(config, MemoryStore::new())?;
    engine.subscribe(Box::new(log_event));

    tracing::info!(
        administrator = %engine.administrator(),
        steps = steps.len(),
        script = %script_path.display(),
        "replaying script"
    );
    let outcomes = script::replay(&engine, &steps)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for outcome in &outcomes {
        serde_json::to_writer(&mut out, outcome)?;
        writeln!(out)?;
    }
    let rejected = outcomes.iter().filter(|o| !o.ok).count();
    tracing::info!(total = outcomes.len(), rejected, "replay finished");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    ballot_utils::init_logging(config.log_format, &config.log_level)?;

    match &cli.command {
        Command::Run { script } => run(&config, script),
        Command::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}
