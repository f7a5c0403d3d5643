use std::{env, net::SocketAddr};

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks.
/// `PORT` wins over the config file so platform-injected ports apply.
pub fn load_bind_addr(default_port: u16) -> anyhow::Result<SocketAddr> {
    let cfg = configs::AppConfig::load_and_validate().ok();
    let host = env::var("SERVER_HOST")
        .ok()
        .or_else(|| cfg.as_ref().map(|c| c.server.host.clone()))
        .unwrap_or_else(|| "0.0.0.0".to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .or_else(|| cfg.map(|c| c.server.port))
        .unwrap_or(default_port);
    Ok(format!("{}:{}", host, port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

/// Public entry: bind the resolved address and serve the app until ctrl-c.
pub async fn serve(service: &'static str, app: Router, default_port: u16) -> anyhow::Result<()> {
    let addr = load_bind_addr(default_port)?;
    info!(service, %addr, "listening");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(service, event = "stop", "server stopped");
    Ok(())
}
