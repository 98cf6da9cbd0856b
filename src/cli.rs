use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogConfig};
use crate::interpreter::{CommandRegistry, Interpreter, Script};
use crate::runner::{self, TokioClock};

#[derive(Debug, Parser)]
#[command(name = "cadence")]
#[command(about = "Cadence - tick-driven script runner", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a script until it finishes
    Run {
        /// Script file (JSON)
        script: PathBuf,

        /// Milliseconds between ticks
        #[arg(long = "tick-ms")]
        tick_ms: Option<u64>,

        /// Stop after this many ticks (0 = unbounded)
        #[arg(long = "max-ticks")]
        max_ticks: Option<u64>,

        /// Retry failing commands on the next tick instead of aborting
        #[arg(long = "keep-going")]
        keep_going: bool,
    },

    /// Load a script and verify every command it uses exists
    Check {
        /// Script file (JSON)
        script: PathBuf,
    },

    /// Print the effective configuration
    Config,
}

/// Run the CLI by parsing process arguments
pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli).await
}

/// Run the CLI with provided arguments
pub async fn run_cli_from_args(args: Vec<String>) -> Result<()> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli).await
}

async fn run_cli_with_args(cli: Cli) -> Result<()> {
    // Load config before any command so config errors are shown first
    let (tick_ms, max_ticks, keep_going) = match &cli.command {
        Commands::Run {
            tick_ms,
            max_ticks,
            keep_going,
            ..
        } => (*tick_ms, *max_ticks, *keep_going),
        _ => (None, None, false),
    };
    let config = Config::builder()
        .config_path(cli.config.clone())
        .tick_interval_ms(tick_ms)
        .max_ticks(max_ticks)
        .stop_on_error(keep_going.then_some(false))
        .build()
        .context("Failed to load configuration")?;

    init_tracing(&config.log);

    match cli.command {
        Commands::Run { script, .. } => {
            let script = load_script(&script)?;
            let mut interpreter =
                Interpreter::with_clock(script, CommandRegistry::new(), TokioClock::new());

            let summary = runner::run_script(&mut interpreter, &config.runner).await?;

            if summary.finished {
                println!("Finished in {} ticks", summary.ticks);
            } else {
                println!(
                    "Stopped after {} ticks at command {}",
                    summary.ticks,
                    interpreter.cursor()
                );
            }
            if summary.errors > 0 {
                println!("Script errors: {}", summary.errors);
            }

            println!("\nBindings:");
            for (name, value) in summary.namespace.sorted() {
                println!("  {} = {}", name, value.to_json());
            }
        }

        Commands::Check { script: path } => {
            let script = load_script(&path)?;
            let unknown = unknown_commands(&script, &CommandRegistry::with_builtins());
            if !unknown.is_empty() {
                anyhow::bail!(
                    "{}: unknown command(s): {}",
                    path.display(),
                    unknown.join(", ")
                );
            }
            println!("{}: {} command(s), OK", path.display(), script.len());
        }

        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

/// Install the stderr log subscriber
///
/// RUST_LOG wins over the configured level. Safe to call more than once.
pub fn init_tracing(log: &LogConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_script(path: &Path) -> Result<Script> {
    Script::from_path(path).with_context(|| format!("Failed to load script: {:?}", path))
}

/// Command names used by `script` that `registry` cannot resolve
pub fn unknown_commands<'a>(script: &'a Script, registry: &CommandRegistry) -> Vec<&'a str> {
    script
        .command_names()
        .into_iter()
        .filter(|name| !registry.contains(name))
        .collect()
}
