use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tally_core::config::CoordinatorConfig;
use tally_http::server::{ServerConfig, start_coordinator_server};

/// Tally coordinator service: accepts expressions and dispatches them to
/// registered agents
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "TALLY_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080, env = "TALLY_PORT")]
    port: u16,

    /// Path to a JSON configuration file (dispatch settings, preregistered agents)
    #[arg(short, long, env = "TALLY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let coordinator_config = match &cli.config {
        Some(path) => CoordinatorConfig::from_file(path)?,
        None => CoordinatorConfig::default(),
    };

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
    };
    start_coordinator_server(config, coordinator_config).await
}
