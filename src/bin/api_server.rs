// API Server Binary Entry Point
//
// Purpose: Start the axum API server for the report funnel and estimator
// Usage: cargo run --bin api_server

use effluentic::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "effluentic=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    let config = ServerConfig::from_env()?;

    tracing::info!("Configuration:");
    tracing::info!("  BRAND: {}", config.brand);
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  REPORT_CACHE_TTL_SECS: {}", config.report_cache_ttl_secs);
    if let Some(seed) = config.simulation_seed {
        tracing::info!("  SIMULATION_SEED: {}", seed);
    }

    let state = AppState::new(&config)?;
    tracing::info!(
        "Store: {}, mailer: {}",
        state.store.backend_name(),
        state.notifier.mailer.backend_name()
    );

    // Create router with all endpoints and middleware
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
