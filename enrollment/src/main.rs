//! EnrollmentResponse server.
//!
//! Serves the `EnrollmentResponse` handler set over HTTP on the configured storage backend.

use std::sync::Arc;

use clap::Parser;
use enrollment::{
    backend::StoreBackend,
    memory::InMemoryStore,
    rest::{ServerConfig, StorageKind, init_logging},
};
use tracing::{info, warn};

/// Serves the router until Ctrl+C, then releases the store's connections.
async fn serve<S: StoreBackend + 'static>(storage: S, config: ServerConfig) -> anyhow::Result<()> {
    let storage = Arc::new(storage);
    let addr = config.socket_addr();

    let app = enrollment::app(Arc::clone(&storage), config).build();

    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    match Arc::try_unwrap(storage) {
        Ok(storage) => storage.shutdown().await?,
        Err(_) => warn!("Store still in use at shutdown, skipping cleanup"),
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        storage = %config.storage,
        error_policy = %config.error_policy,
        "Starting EnrollmentResponse server"
    );

    match config.storage {
        StorageKind::Memory => serve(InMemoryStore::new(), config).await,
        StorageKind::Mongodb => start_mongodb(config).await,
    }
}

/// Connects to MongoDB and serves from it.
#[cfg(feature = "mongodb")]
async fn start_mongodb(config: ServerConfig) -> anyhow::Result<()> {
    use enrollment::{backend::StoreBackendBuilder, mongodb::MongoDbStore};

    info!(database = %config.mongodb_database, "Initializing MongoDB backend");

    let store = MongoDbStore::builder(&config.mongodb_uri, &config.mongodb_database)
        .build()
        .await?;

    serve(store, config).await
}

/// Fallback when the mongodb feature is not enabled.
#[cfg(not(feature = "mongodb"))]
async fn start_mongodb(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The mongodb backend requires the 'mongodb' feature. \
         Build with: cargo build -p enrollment --features mongodb"
    )
}
