mod dictionary;
mod health;
mod list;
mod string;

use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;

use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/metrics/snapshot", get(health::metrics_snapshot))
        .route("/api/string", get(string::list_keys).post(string::add))
        .route(
            "/api/string/:key",
            get(string::get).put(string::update).delete(string::delete),
        )
        .route("/api/list", get(list::list_keys).post(list::add))
        .route("/api/list/:key", get(list::get).post(list::add_value).delete(list::delete))
        .route(
            "/api/list/:key/:value",
            put(list::update_value).delete(list::delete_value),
        )
        .route("/api/dictionary", get(dictionary::list_keys).post(dictionary::add))
        .route(
            "/api/dictionary/:key",
            get(dictionary::get).post(dictionary::add_value).delete(dictionary::delete),
        )
        .route(
            "/api/dictionary/:key/:subkey",
            put(dictionary::update_value).delete(dictionary::delete_value),
        )
        .with_state(state)
}
