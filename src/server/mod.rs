use crate::config::Config;
use anyhow::{Context, Result};
use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use coursereel_catalog::{Dataset, DatasetSource};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod error;
pub mod page;
pub mod routes_api;

use error::ApiError;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Where every request reads the catalog from
    pub source: Arc<dyn DatasetSource>,
}

impl AppContext {
    /// Context reading the catalog file named in the config
    pub fn new(config: Config) -> Self {
        let source = Arc::new(config.catalog.source());
        Self::with_source(config, source)
    }

    pub fn with_source(config: Config, source: Arc<dyn DatasetSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
        }
    }

    /// Load the catalog on the blocking pool.
    pub async fn load_dataset(&self) -> Result<Dataset, ApiError> {
        let source = Arc::clone(&self.source);
        let dataset = tokio::task::spawn_blocking(move || source.load()).await?;
        Ok(dataset)
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    let static_dir = ctx
        .config
        .server
        .static_dir
        .clone()
        .filter(|dir| dir.exists());

    let mut app = Router::new()
        // Health check
        .route("/health", get(health_check))
        .nest("/api", routes_api::api_routes());

    if static_dir.is_none() {
        app = app.route("/", get(page::index)).fallback(not_found);
    }

    let mut app = app
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    // Serve static files if directory is provided
    // Uses SPA fallback: serves index.html for any route that doesn't match a file
    if let Some(dir) = static_dir {
        tracing::info!("Serving static files from {:?}", dir);
        let index_path = dir.join("index.html");
        app = app.fallback_service(
            ServeDir::new(&dir)
                .append_index_html_on_directories(true)
                .not_found_service(ServeFile::new(index_path)),
        );
    }

    app
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let source = Arc::new(config.catalog.source());
    start_server_with_source(config, source).await
}

/// Start the HTTP server reading the catalog from a custom source
pub async fn start_server_with_source(
    config: Config,
    source: Arc<dyn DatasetSource>,
) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    tracing::info!(
        "Catalog file: {:?} (cache {})",
        config.catalog.data_file,
        if config.catalog.cache { "on" } else { "off" }
    );

    let app = create_router(AppContext::with_source(config, source));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
