mod config;
mod errors;
mod models;
mod routes;
mod service;

use tracing::{info, warn};

use crate::config::HostConfig;
use crate::service::relay_service::RelayService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medical_chat=debug,tower_http=debug".into()),
        )
        .init();

    // ── Configuration ─────────────────────────────────────────────────────────
    let config = HostConfig::from_env()?;

    if !config.static_dir.join("index.html").exists() {
        warn!(
            "No widget build found in {} (run `trunk build --release` in frontend/)",
            config.static_dir.display()
        );
    }

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let relay = RelayService::new(&config.upstream_url, config.upstream_timeout)?;
    info!("Relaying questions to {}", relay.upstream_url());

    let app = routes::router(relay, &config.static_dir);

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
