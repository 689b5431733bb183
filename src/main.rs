use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use duel_ledger::aggregate::{run_aggregation, AggregationStores};
use duel_ledger::api::state::AppState;
use duel_ledger::config::AppConfig;
use duel_ledger::storage::StorageConfig;

#[derive(Parser)]
#[command(name = "duel-ledger")]
#[command(about = "Match ledger and win-rate aggregation for card game ladders")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run the global aggregation job once and exit
    Aggregate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config file is optional; defaults apply when it is absent.
    let config_path = PathBuf::from(&cli.config);
    let mut config = if config_path.exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(dir);
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting duel-ledger v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Serve { host, port } => {
            let state = AppState::new(storage);
            let app = duel_ledger::api::build_router(state);

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Aggregate => {
            let stores = AggregationStores::from_config(&storage);
            let summary = run_aggregation(&stores)?;

            println!("\n=== Aggregation Results ===");
            println!("Processed seasons: {}", summary.processed_seasons);
            println!("Total records:     {}", summary.total_records);
            println!("Failed seasons:    {}", summary.failed_seasons);

            if summary.failed_seasons > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
