pub mod api;
pub mod banner;
pub mod error;
pub mod extract;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod state;

use std::net::SocketAddr;

use axum::Router;
use domain::{create_pool, Config};
use tower_http::trace::TraceLayer;
#[cfg(feature = "openapi")]
use utoipa_scalar::{Scalar, Servable};

pub use api::create_router;
pub use banner::print_banner;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Full application router: API routes, docs (with `openapi`), request tracing
pub fn build_app(state: AppState) -> Router {
    #[cfg(feature = "openapi")]
    let app = {
        let (router, api) = create_router(state);
        router.merge(Scalar::with_url("/docs", api))
    };

    #[cfg(not(feature = "openapi"))]
    let app = create_router(state);

    app.layer(TraceLayer::new_for_http())
}

pub async fn run_server(addr: SocketAddr, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    if config.uses_data_path() {
        std::fs::create_dir_all(&config.data_path).map_err(|e| {
            format!(
                "Failed to create data directory '{}': {} (check directory permissions)",
                config.data_path.display(),
                e
            )
        })?;
    }

    let pool = create_pool(&config.database_url, config.max_connections).await?;
    let state = AppState::new(pool);
    let app = build_app(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
