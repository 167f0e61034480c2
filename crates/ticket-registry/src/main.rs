//! Ticket Registry - Entry point.

use std::net::SocketAddr;
use ticket_registry::{
    api::{create_router, create_router_with_rate_limit, AppState, RateLimitState},
    config::Config,
    registry::Registry,
};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ticket Registry");

    // State is volatile and starts empty on every launch
    let state = AppState::new(Registry::new());

    let app = match RateLimitState::from_config(&config.rate_limit) {
        Some(rate_limit) => {
            info!("Rate limiting enabled");
            create_router_with_rate_limit(state, rate_limit)
        }
        None => create_router(state),
    };

    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
