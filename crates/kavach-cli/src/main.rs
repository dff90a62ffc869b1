mod cmd;
mod config_path;
mod output;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kavach",
    about = "KAVACH-X crane safety dashboard telemetry simulation engine",
    version,
    propagate_version = true
)]
struct Cli {
    /// Engine config file (default: ./kavach.yaml if present, else built-in defaults)
    #[arg(long, global = true, env = "KAVACH_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve snapshots over HTTP and SSE
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3141")]
        port: u16,

        /// Wait for POST /api/engine/start instead of ticking immediately
        #[arg(long)]
        no_autostart: bool,

        /// Seed the random source for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run the engine headless and print each snapshot
    Simulate {
        /// Number of ticks to run
        #[arg(long, default_value = "10")]
        ticks: u64,

        /// Seed the random source for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Pace ticks at the configured interval instead of running back to back
        #[arg(long)]
        realtime: bool,
    },

    /// Print the initial snapshot
    Snapshot,

    /// Inspect and validate the engine configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = config_path::load_config(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Serve {
                port,
                no_autostart,
                seed,
            } => cmd::serve::run(config, port, !no_autostart, seed),
            Commands::Simulate {
                ticks,
                seed,
                realtime,
            } => cmd::simulate::run(config, ticks, seed, realtime, cli.json),
            Commands::Snapshot => cmd::snapshot::run(config, cli.json),
            Commands::Config { subcommand } => cmd::config::run(config, subcommand, cli.json),
        }
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
