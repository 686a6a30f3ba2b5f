use anyhow::Result;
use bloglist_api::{build_state, create_router_with, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    // Pick up a local .env when present; real environment variables win.
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber to log to stdout
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let app = create_router_with(build_state(&config).await?);

    info!("Starting Bloglist API server v{}...", env!("CARGO_PKG_VERSION"));
    info!("Starting at endpoint:{}", config.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    // ---
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler, keep serving until killed.
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
