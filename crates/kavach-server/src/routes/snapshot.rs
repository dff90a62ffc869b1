use axum::extract::State;
use axum::Json;
use kavach_core::DashboardSnapshot;

use crate::state::AppState;

/// GET /api/snapshot: the most recently published snapshot.
pub async fn get_snapshot(State(app): State<AppState>) -> Json<DashboardSnapshot> {
    let latest = app.control.latest();
    Json(DashboardSnapshot::clone(&latest))
}
