//! Oracle daemon: command-line entry point for the staking oracle.

mod replay;

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

use oracle_ledger::sanity_check;
use oracle_node::NodeConfig;
use oracle_types::Record;
use oracle_utils::LogFormat;

#[derive(Parser)]
#[command(name = "oracle-daemon", about = "Staking oracle record ledger")]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(long, env = "ORACLE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Overrides the config file.
    #[arg(long, env = "ORACLE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json". Overrides the config file.
    #[arg(long, env = "ORACLE_LOG_FORMAT")]
    log_format: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run a JSON report script against in-memory collaborators and print
    /// every emitted event as a JSON line.
    Replay {
        script: PathBuf,

        /// Print Prometheus metrics after the replay.
        #[arg(long)]
        metrics: bool,
    },
    /// Run the plausibility bounds on a candidate record.
    Check {
        /// JSON file holding the previous accepted record.
        #[arg(long)]
        previous: PathBuf,

        /// JSON file holding the candidate record.
        #[arg(long)]
        candidate: PathBuf,
    },
    /// Print the default configuration as TOML.
    DefaultConfig,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<NodeConfig> {
    let Some(path) = path else {
        return Ok(NodeConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = NodeConfig::from_toml_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn read_record(path: &Path) -> anyhow::Result<Record> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read record {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("malformed record in {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let format: LogFormat = cli
        .log_format
        .as_deref()
        .unwrap_or(&config.log_format)
        .parse()
        .map_err(anyhow::Error::msg)?;
    oracle_utils::init_tracing_with(level, format);

    match cli.command {
        Command::Replay { script, metrics } => {
            let contents = std::fs::read_to_string(&script)
                .with_context(|| format!("failed to read script {}", script.display()))?;
            let script = replay::Script::from_json(&contents)?;
            let replay = replay::run(&config, script)?;

            for event in &replay.events {
                println!("{}", serde_json::to_string(event)?);
            }
            for failure in &replay.failures {
                println!(
                    "{}",
                    serde_json::json!({
                        "event": "step_refused",
                        "step": failure.step,
                        "reason": failure.reason,
                    })
                );
            }
            if metrics {
                print!("{}", replay.node.metrics().encode()?);
            }
        }
        Command::Check {
            previous,
            candidate,
        } => {
            let previous = read_record(&previous)?;
            let candidate = read_record(&candidate)?;
            match sanity_check(&previous, &candidate, &config.bounds) {
                Ok(()) => println!("ok"),
                Err(violation) => anyhow::bail!("candidate out of bounds: {violation}"),
            }
        }
        Command::DefaultConfig => {
            print!("{}", NodeConfig::default().to_toml_string()?);
        }
    }

    Ok(())
}
