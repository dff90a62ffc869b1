use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EngineStatus {
    pub running: bool,
    pub tick: u64,
}

#[derive(Debug, Serialize)]
pub struct StopResponse {
    pub running: bool,
    pub ticks: u64,
}

/// GET /api/engine: whether the engine is ticking and the latest tick.
pub async fn get_status(State(app): State<AppState>) -> Json<EngineStatus> {
    Json(EngineStatus {
        running: app.control.is_running().await,
        tick: app.control.latest().tick,
    })
}

/// POST /api/engine/start: start a fresh engine from the initial state.
pub async fn start_engine(State(app): State<AppState>) -> Result<Json<EngineStatus>, AppError> {
    if !app.control.start().await? {
        warn!("start requested while engine already running");
        return Err(AppError::conflict("engine already running"));
    }
    Ok(Json(EngineStatus {
        running: true,
        tick: app.control.latest().tick,
    }))
}

/// POST /api/engine/stop: halt ticking. No tick runs after this responds.
pub async fn stop_engine(State(app): State<AppState>) -> Result<Json<StopResponse>, AppError> {
    match app.control.stop().await? {
        Some(ticks) => Ok(Json(StopResponse {
            running: false,
            ticks,
        })),
        None => {
            warn!("stop requested while engine not running");
            Err(AppError::conflict("engine not running"))
        }
    }
}
