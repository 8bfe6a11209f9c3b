use gateway::config::GatewayConfig;
use gateway::router::create_router;
use gateway::state::AppState;
use matching_engine::Exchange;
use std::sync::Arc;
use tokio::net::TcpListener;
use types::clock::SystemClock;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::load()?;
    tracing::info!(
        environment = config.environment.as_str(),
        host = %config.host,
        port = config.port,
        "Starting Gateway API service"
    );

    let state = AppState::new(
        Exchange::in_memory(Arc::new(SystemClock)),
        config.environment,
    );
    let app = create_router(state);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
