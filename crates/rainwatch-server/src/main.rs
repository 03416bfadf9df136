use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use rainwatch_server::{build_app, set_ready, RainUpstream, UpstreamSource};

#[tokio::main]
async fn main() -> Result<()> {
    // Observability
    rainwatch_obs::init("rainwatchd");

    // Config
    let cfg = rainwatch_config::AppConfig::load().unwrap_or_default();
    let http_bind = cfg.http_bind();

    // Upstream client
    let upstream = RainUpstream::new(
        &cfg.upstream_url(),
        &cfg.upstream_login_id(),
        &cfg.upstream_data_key(),
        cfg.request_timeout(),
    )
    .context("Failed to build upstream client")?;

    // Build app and state
    let (app, state) = build_app(Arc::new(upstream) as Arc<dyn UpstreamSource>, cfg.cache_ttl());

    // Start HTTP server
    let addr: SocketAddr = http_bind.parse().context("Invalid HTTP bind address")?;
    let listener = TcpListener::bind(addr)
        .await
        .context("failed to bind TCP listener")?;

    // Mark ready just before serving
    set_ready(&state, true);

    tracing::info!(%addr, "HTTP server listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
