use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

mod auth;
mod config;
mod error;
mod routes;
mod storage;

use config::ServerConfig;
use storage::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    let store = Store::open(&config.data_file).await?;
    tracing::info!("Using data file {}", config.data_file.display());

    let state = AppState {
        store: Arc::new(store),
    };

    let app = routes::api_router()
        .fallback_service(ServeDir::new(&config.assets_dir))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("Server running on http://{}", config.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
