use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tracing::warn;

use crate::state::AppState;

/// GET /api/events: SSE stream that emits `snapshot` with the full snapshot
/// JSON, starting with the current one and then once per published tick.
pub async fn sse_events(State(app): State<AppState>) -> impl axum::response::IntoResponse {
    // Subscribe before reading the current value so no tick falls in between.
    let rx = app.control.subscribe_events();
    let current = app.control.latest();
    let first = current.clone();

    let updates = BroadcastStream::new(rx).filter_map(move |msg| match msg {
        Ok(snapshot) if Arc::ptr_eq(&snapshot, &first) => None,
        Ok(snapshot) => Some(snapshot),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            warn!(skipped, "SSE client lagged, snapshots dropped");
            None
        }
    });

    let stream = tokio_stream::once(current).chain(updates).filter_map(|snapshot| {
        match Event::default().event("snapshot").json_data(&*snapshot) {
            Ok(event) => Some(Ok::<Event, Infallible>(event)),
            Err(e) => {
                warn!(error = %e, tick = snapshot.tick, "failed to encode snapshot event");
                None
            }
        }
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
