//! Ambient operational routes: liveness probe and a metrics dump. Not
//! part of the original controller surface — every production HTTP
//! crate in the teacher's stack carries something like this.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::metrics::MetricsSnapshot;
use crate::state::AppState;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn metrics_snapshot(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
