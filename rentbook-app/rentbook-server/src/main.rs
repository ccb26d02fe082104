use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use rentbook_api::{build_router, AppState};
use rentbook_core::repositories::{BillRepository, TenantRepository, UserRepository};
use rentbook_infrastructure::MemoryStore;
use rentbook_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Initialize telemetry (guard flushes the file appender on exit)
    let _log_guard = rentbook_shared::telemetry::init_telemetry(&config.log)?;

    info!("Rentbook server starting ({})...", config.app.env);

    // Storage, created once and shared by every service
    let store = Arc::new(MemoryStore::new(config.billing.electricity_unit_rate));
    let users: Arc<dyn UserRepository> = store.clone();
    let tenants: Arc<dyn TenantRepository> = store.clone();
    let bills: Arc<dyn BillRepository> = store;

    // Create App State
    let state = AppState::new(config.clone(), users, tenants, bills)
        .context("failed to initialise services")?;

    // Expired session cleanup
    let sweep_every = Duration::from_secs(config.session.sweep_interval_secs.max(1));
    tokio::spawn(state.sessions.clone().run_sweeper(sweep_every));

    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config
        .app
        .host
        .parse()
        .with_context(|| format!("invalid app.host: {}", config.app.host))?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Rentbook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
