//! # Lanewise CLI
//!
//! Inspect SIMD target dispatch on this machine and run the dispatched sorts
//! on generated data.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lanewise_core::{DispatchConfig, LanewiseConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::SortArgs;

/// Lanewise - runtime SIMD dispatch and vectorized sorting
#[derive(Parser, Debug)]
#[command(name = "lanewise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "LANEWISE_CONFIG")]
    config: Option<PathBuf>,

    /// Targets dispatch must never select, comma-separated (e.g. avx512,avx2)
    #[arg(long, global = true, value_delimiter = ',')]
    disable: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List SIMD targets: compiled, detected by the CPU, enabled for dispatch
    Targets {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Sort generated keys with the dispatched kernel and verify the result
    Sort(SortArgs),

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        LanewiseConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let env_dispatch = DispatchConfig::from_env().context("Invalid LANEWISE_DISABLED_TARGETS")?;
    config
        .dispatch
        .disabled_targets
        .extend(env_dispatch.disabled_targets);
    config.dispatch.disabled_targets.extend(cli.disable);

    init_tracing(&config.logging.level);

    lanewise_core::configure(&config.dispatch).context("Invalid dispatch configuration")?;

    match cli.command {
        Commands::Targets { json } => commands::targets(json),
        Commands::Sort(args) => commands::sort(&args),
        Commands::Config => commands::config(&config),
    }
}

/// Installs the subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
