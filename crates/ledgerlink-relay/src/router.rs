//! Axum router wiring.

use axum::routing::{get, post};
use axum::Router;

use crate::app_state::AppState;
use crate::{ingest, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/sensors/data", post(ingest::sensors_data))
        .route("/subscribers", get(ops::subscribers))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
