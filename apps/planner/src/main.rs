mod commands;
mod config;
mod errors;
mod llm_client;
mod planner;
mod routes;
mod state;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::commands::generate::GenerateArgs;
use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "badminton-planner",
    version,
    about = "Badminton training plan generator (CSV)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the plan form with CSV download
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Model name (overrides PLANNER_MODEL)
        #[arg(long)]
        model: Option<String>,
    },
    /// Generate a plan and write it to a CSV file
    Generate(GenerateArgs),
    /// Print a beginner 7-day plan (days D1..D7)
    Quick {
        /// Model name (overrides PLANNER_MODEL)
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("badminton-planner v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { port, model } => commands::serve::run(&config, port, model).await,
        Commands::Generate(args) => commands::generate::run(&config, args).await,
        Commands::Quick { model } => commands::quick::run(&config, model).await,
    }
}
