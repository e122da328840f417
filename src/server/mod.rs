pub mod error;
pub mod handlers;

use axum::routing::post;
use axum::Router;
use log::info;
use std::future::Future;
use std::io;
use std::sync::Arc;

use crate::config::{AppConfig, ConfigError};
use crate::storage::AudioStore;

pub use error::UploadError;
pub use handlers::handle_post_audio;

/// Upload route.
pub const AUDIO_ROUTE: &str = "/audio";

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AudioStore>,
    pub max_body_bytes: Option<usize>,
}

impl AppState {
    pub fn new(store: AudioStore, max_body_bytes: Option<usize>) -> Self {
        Self {
            store: Arc::new(store),
            max_body_bytes,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create storage directory {path:?}: {source}")]
    StorageDir { path: std::path::PathBuf, source: io::Error },
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: std::net::SocketAddr, source: io::Error },
    #[error("server error: {0}")]
    Serve(io::Error),
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(AUDIO_ROUTE, post(handle_post_audio))
        .with_state(state)
}

/// Bind the configured address and serve uploads until `shutdown` resolves.
pub async fn serve<F>(config: &AppConfig, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_addr()?;
    let storage_dir = config.storage_dir();
    let store = AudioStore::open(&storage_dir, config.storage.auto_create_dir)
        .map_err(|source| ServerError::StorageDir { path: storage_dir.clone(), source })?;
    match config.storage.max_body_bytes {
        Some(limit) => info!("Request bodies limited to {} bytes", limit),
        None => info!("Request body size is unlimited"),
    }
    let app = build_router(AppState::new(store, config.storage.max_body_bytes));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!("Server starting on {}, storing uploads in {}", addr, config.storage.dir);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
