use clap::Parser;
use tracing_subscriber::EnvFilter;

use tally_http::server::{ServerConfig, start_agent_server};

/// Tally agent service: evaluates the expressions the coordinator posts to
/// it
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "TALLY_AGENT_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8081, env = "TALLY_AGENT_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    start_agent_server(ServerConfig {
        host: cli.host,
        port: cli.port,
    })
    .await
}
