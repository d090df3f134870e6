use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use talon::commands;
use talon::config::Config;

#[derive(Parser)]
#[command(
    name = "talon",
    version,
    about = "Polling bot that books clinic appointment slots on a web portal",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the configured rooms until every one yields a claimed ticket
    Run,

    /// List current availability for the configured rooms without claiming
    Probe,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_file(&cli.config)?;
    config.validate()?;

    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.log.format.clone());
    setup_tracing(&log_format, &config.log.level, cli.verbose)?;

    tracing::info!(config = %cli.config.display(), "talon starting");

    match cli.command {
        Commands::Run => commands::run(config).await?,
        Commands::Probe => commands::probe(config).await?,
    }

    tracing::info!("talon completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("talon=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new(format!("talon={level},warn"))
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
