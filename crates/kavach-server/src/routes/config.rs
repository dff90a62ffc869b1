use axum::extract::State;
use axum::Json;
use kavach_core::config::EngineConfig;

use crate::state::AppState;

/// GET /api/config: effective engine configuration.
pub async fn get_config(State(app): State<AppState>) -> Json<EngineConfig> {
    Json(app.control.config().clone())
}
