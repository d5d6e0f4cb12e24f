//! Daemon entry point for the sadapurne server.
//!
//! Loads configuration from `.env`, the environment and CLI flags, connects the
//! lookup service to Supabase, and runs every enabled transport. The first
//! transport failure ends the process.

mod config;

use sadapurne_api::{ApiServer, ApiServerConfig};
use sadapurne_core::control::LookupService;
use sadapurne_core::store::PostgrestStore;
use sadapurne_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tokio::task::JoinSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::SadapurneConfig;

type ServeResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = SadapurneConfig::from_args()?;
    info!(?config, "starting sadapurne");

    let store = PostgrestStore::new(config.postgrest())?;
    let lookup = LookupService::new(store);

    let mut servers: JoinSet<ServeResult> = JoinSet::new();
    if config.api_serve {
        let api_config =
            ApiServerConfig::new(config.api_addr).with_max_body_bytes(config.api_max_body_bytes);
        let server = ApiServer::new(lookup.clone(), api_config);
        servers.spawn(server.serve());
    }
    if config.mcp_serve {
        let mcp_config = McpHttpServerConfig::new(config.mcp_http_addr);
        servers.spawn(serve_streamable_http(lookup.clone(), mcp_config));
    }
    if config.enable_stdio {
        servers.spawn(serve_stdio(lookup));
    }

    while let Some(joined) = servers.join_next().await {
        joined??;
    }
    Ok(())
}
