//! services/api/src/bin/portal.rs

use portal_api::{
    adapters::{connect_pool, DbAdapter, HtmlRenderer},
    config::Config,
    error::ApiError,
    web::{router, AppState},
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Create Tables ---
    info!("Connecting to database at {}...", config.database_url);
    let db_pool = connect_pool(&config.database_url, 5).await.map_err(|e| {
        error!("Error opening database: {}", e);
        e
    })?;
    info!("Connected to SQLite database.");
    let db_adapter = Arc::new(DbAdapter::new(db_pool.clone()));
    db_adapter.create_tables().await?;
    info!("Database tables ready.");

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        db: db_adapter,
        views: Arc::new(HtmlRenderer::new()),
        config: config.clone(),
    });

    // --- 4. Create the Web Router ---
    let app = router(app_state);

    // --- 5. Start the Server ---
    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("Student Result Portal listening on port {}", config.port);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // --- 6. Release the Database ---
    db_pool.close().await;
    info!("Database connection closed.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received.");
}
