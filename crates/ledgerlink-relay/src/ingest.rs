//! Sensor ingest endpoint.
//!
//! Accepts one reading over HTTP and relays it, byte for byte, to every
//! current subscriber. The response reports what each delivery did; a
//! subscriber failure is the subscriber's problem, not the sensor's, so the
//! endpoint still answers 200.

use std::time::Instant;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde_json::value::RawValue;

use crate::app_state::AppState;
use crate::forward;

pub(crate) fn check_auth(state: &AppState, headers: &HeaderMap) -> bool {
    let Some(required) = state.cfg().http.auth_token.as_deref() else {
        return true;
    };
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|presented| presented == required)
}

pub(crate) fn error_response(status: StatusCode, code: &str, msg: &str) -> Response {
    (status, Json(serde_json::json!({"code": code, "msg": msg}))).into_response()
}

pub async fn sensors_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !check_auth(&state, &headers) {
        state
            .metrics()
            .ingest_rejected
            .inc(&[("reason", "unauthorized")]);
        return error_response(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "missing or invalid bearer token",
        );
    }

    // Validate without re-encoding; subscribers get the bytes as received.
    if serde_json::from_slice::<&RawValue>(&body).is_err() {
        state
            .metrics()
            .ingest_rejected
            .inc(&[("reason", "bad_payload")]);
        return error_response(StatusCode::BAD_REQUEST, "BAD_PAYLOAD", "body must be json");
    }

    let targets = state.subscribers().snapshot().await;
    let started = Instant::now();
    let report = forward::fan_out(state.http(), &targets, body, state.forward_timeout()).await;
    state.metrics().forward_duration.observe(started.elapsed());
    state
        .metrics()
        .deliveries
        .add(&[("outcome", "ok")], report.delivered as u64);
    state
        .metrics()
        .deliveries
        .add(&[("outcome", "error")], report.failed.len() as u64);
    tracing::info!(
        attempted = report.attempted,
        delivered = report.delivered,
        failed = report.failed.len(),
        "sensor reading relayed"
    );

    (StatusCode::OK, Json(report)).into_response()
}
