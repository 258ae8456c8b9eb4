//! Operational HTTP endpoints.
//!
//! - `/healthz`     : liveness
//! - `/readyz`      : readiness (503 while the event stream is down)
//! - `/metrics`     : Prometheus text format
//! - `/subscribers` : current forwarding targets, behind the same bearer
//!                    token as ingest when one is configured

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::app_state::AppState;
use crate::ingest;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.listener_up() {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "event stream down")
    }
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
        .into_response()
}

pub async fn subscribers(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !ingest::check_auth(&state, &headers) {
        return ingest::error_response(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "missing or invalid bearer token",
        );
    }
    let urls = state.subscribers().snapshot().await;
    Json(serde_json::json!({ "subscribers": urls })).into_response()
}
