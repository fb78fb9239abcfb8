use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::store::{ItemRepository, ItemStore};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address `{raw}`: {e}")))
}

/// Item store for a fresh process: seeded unless `store.seed = false`.
pub fn build_store(cfg: &AppConfig) -> Arc<dyn ItemRepository> {
    let store = if cfg.store.seed { ItemStore::seeded() } else { ItemStore::new() };
    Arc::new(store)
}

/// Application router over the given store.
pub fn build_app(items: Arc<dyn ItemRepository>) -> Router {
    routes::build_router(AppState::new(items), build_cors())
}

/// Build the app and serve it until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = build_app(build_store(&cfg));
    let addr = bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, seeded = cfg.store.seed, "mock items API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
