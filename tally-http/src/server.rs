//! Server assembly for the coordinator and agent services.

use std::net::SocketAddr;

use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::{create_agent_router, create_coordinator_router};
use tally_core::agent_registry::AgentRegistry;
use tally_core::config::CoordinatorConfig;
use tally_core::dispatcher::Dispatcher;
use tally_core::expression_store::ExpressionStore;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Default configuration for the agent service.
    pub fn agent_default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8081,
        }
    }
}

/// Shared state for the coordinator's request handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: ExpressionStore,
    pub registry: AgentRegistry,
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Builds coordinator state, preregistering any agents named in the
    /// configuration.
    pub async fn from_config(config: &CoordinatorConfig) -> Self {
        let store = ExpressionStore::new();
        let registry = AgentRegistry::new();
        for agent in &config.agents {
            registry.register(agent.clone()).await;
        }
        let dispatcher = Dispatcher::new(store.clone(), registry.clone(), config.dispatch.clone());
        Self {
            store,
            registry,
            dispatcher,
        }
    }
}

/// Start the coordinator HTTP server.
pub async fn start_coordinator_server(
    config: ServerConfig,
    coordinator_config: CoordinatorConfig,
) -> anyhow::Result<()> {
    let state = AppState::from_config(&coordinator_config).await;
    info!(
        preregistered_agents = coordinator_config.agents.len(),
        "initialized coordinator state"
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_coordinator_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port).parse::<SocketAddr>()?;
    info!("starting coordinator on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Start the agent HTTP server.
pub async fn start_agent_server(config: ServerConfig) -> anyhow::Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_agent_router()
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port).parse::<SocketAddr>()?;
    info!("starting agent on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received, draining connections"),
        Err(err) => tracing::error!(%err, "failed to listen for shutdown signal"),
    }
}
