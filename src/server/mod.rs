//! HTTP polling endpoint for the game client

pub mod routes;

use crate::command::relay::CommandRelay;
use crate::core::config::ServerConfig;
use crate::core::error::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use routes::{GenerateRequest, GenerateResponse, CHECK_PROMPT};

/// Build the router with all routes and the shared relay
pub fn router(relay: Arc<CommandRelay>) -> Router {
    Router::new()
        .merge(routes::generate_routes())
        .with_state(relay)
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("Polling endpoint listening on http://{}", listener.local_addr()?);
    Ok(listener)
}

/// Serve the polling endpoint on an already-bound listener until the
/// process exits
pub async fn serve(listener: TcpListener, relay: Arc<CommandRelay>) -> Result<()> {
    axum::serve(listener, router(relay)).await?;
    Ok(())
}
