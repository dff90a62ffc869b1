pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use kavach_core::config::EngineConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Events (SSE)
        .route("/api/events", get(routes::events::sse_events))
        // Snapshot
        .route("/api/snapshot", get(routes::snapshot::get_snapshot))
        // Engine lifecycle
        .route("/api/engine", get(routes::engine::get_status))
        .route("/api/engine/start", post(routes::engine::start_engine))
        .route("/api/engine/stop", post(routes::engine::stop_engine))
        // Config
        .route("/api/config", get(routes::config::get_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the dashboard server on `port`.
///
/// With `autostart` the engine begins ticking before the listener accepts
/// connections; otherwise it waits for `POST /api/engine/start`.
pub async fn serve(
    config: EngineConfig,
    seed: Option<u64>,
    port: u16,
    autostart: bool,
) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(config, seed, listener, autostart).await
}

/// Start the dashboard server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    config: EngineConfig,
    seed: Option<u64>,
    listener: tokio::net::TcpListener,
    autostart: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app_state = state::AppState::new(config, seed)?;

    if autostart {
        app_state.control.start().await?;
    }

    let app = build_router(app_state.clone());

    tracing::info!("KAVACH-X dashboard listening on http://localhost:{actual_port}");

    let result = axum::serve(listener, app).await;
    app_state.control.stop().await?;
    result?;
    Ok(())
}
