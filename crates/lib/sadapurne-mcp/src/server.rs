//! MCP server runners for sadapurne.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use sadapurne_core::control::LookupService;
use sadapurne_core::store::ProducerSource;
use tracing::info;

use crate::SadapurneMcp;

/// Configuration for the MCP streamable HTTP server.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
        }
    }
}

/// Serves the MCP server over stdio until the client disconnects.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio<S: ProducerSource>(
    lookup: LookupService<S>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service = SadapurneMcp::new(lookup);
    let (stdin, stdout) = stdio();
    info!("sadapurne mcp serving on stdio");
    let running = serve_server(service, (stdin, stdout)).await?;
    let _ = running.waiting().await?;
    Ok(())
}

/// Serves the MCP server using streamable HTTP transport under `/mcp`.
///
/// # Errors
/// Returns any listener or server error.
pub async fn serve_streamable_http<S: ProducerSource>(
    lookup: LookupService<S>,
    config: McpHttpServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service: StreamableHttpService<SadapurneMcp<S>, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(SadapurneMcp::new(lookup.clone())),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                sse_keep_alive: config.sse_keep_alive,
                stateful_mode: config.stateful_mode,
                ..Default::default()
            },
        );

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", service);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("sadapurne mcp listening on http://{}/mcp", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
