//! CLI for recategorizing stored articles
//!
//! Prints the same JSON reports as the `/classify/*` endpoints. Logs go to
//! stderr so stdout stays machine-readable.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use server_core::config::Config;
use server_core::kernel::ServerDeps;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "recategorize")]
#[command(about = "Keyword-based article recategorization")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the projected category distribution without writing
    Preview,

    /// Recategorize one batch of articles
    Execute {
        #[arg(long, default_value_t = newsdesk::DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },

    /// Show stored-label coverage
    Distribution,
}

fn output<T: Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to encode report")?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,newsdesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let deps = ServerDeps::from_config(&config).await?;
    let recategorizer = &deps.recategorizer;

    match cli.command {
        Commands::Preview => output(&recategorizer.preview().await?),
        Commands::Execute { batch_size } => output(&recategorizer.execute(batch_size).await?),
        Commands::Distribution => output(&recategorizer.distribution().await?),
    }
}
