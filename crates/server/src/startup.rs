use std::future::Future;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire a fresh in-memory store into the router.
pub fn build_app(cfg: &AppConfig) -> Router {
    let state = AppState::in_memory(cfg.server.max_body_bytes);
    routes::build_router(state, build_cors())
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Public entry: bind the configured address and run the HTTP server.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg);

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    let local = listener.local_addr()?;
    info!(%local, max_body_bytes = cfg.server.max_body_bytes, "users router listening");

    serve(listener, app, shutdown).await?;
    info!(%local, "users router stopped");
    Ok(())
}
