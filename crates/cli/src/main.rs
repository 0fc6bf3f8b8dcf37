use anyhow::Result;
use clap::{Parser, Subcommand};
use rotadb_core::DeployConfig;
use rotadb_schema::Applier;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rotadb")]
#[command(about = "Login-hardening schema deployment for the rota database", long_about = None)]
struct Cli {
    /// Target connection string; defaults to ROTADB_DATABASE_URL or DATABASE_URL
    #[arg(long, global = true, value_name = "URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema steps and verify the result
    Apply,
    /// Run the read-only verification query
    Verify {
        #[arg(long)]
        json: bool,
    },
    /// Show which steps the migration ledger records as applied
    Status {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    // Diagnostics go to stderr; stdout carries only the progress lines and
    // reports the operator is meant to read.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DeployConfig::resolve(cli.database_url)?;
    let applier = Applier::connect(&config.database_url).await?;

    let outcome = match cli.command {
        Commands::Apply => commands::apply::run(&applier).await,
        Commands::Verify { json } => commands::verify::run(&applier, json).await,
        Commands::Status { json } => commands::status::run(&applier, json).await,
    };

    applier.close().await;
    outcome
}
